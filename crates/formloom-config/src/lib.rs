//! Configuration for formloom: global style defaults and the custom
//! field-type table, loaded from a `formloom.toml` file.
//!
//! Custom field types are registered onto a [`FieldTypeRegistry`] once at
//! application start, before any field is added.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use formloom_engine::fields::registry::{FieldTypeError, FieldTypeRegistry};
use formloom_engine::fields::resolver::StyleDefaults;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// The `[defaults]` section: CSS classes applied to every field unless
/// overridden by a more specific option layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub wrapper_class: String,
    pub wrapper_error_class: String,
    pub label_class: String,
    pub field_class: String,
    pub error_class: String,
}

impl Default for Defaults {
    fn default() -> Self {
        let styles = StyleDefaults::default();
        Self {
            wrapper_class: styles.wrapper_class,
            wrapper_error_class: styles.wrapper_error_class,
            label_class: styles.label_class,
            field_class: styles.field_class,
            error_class: styles.error_class,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,

    /// Custom field types: type name -> template identifier. Registered in
    /// file order.
    pub custom_fields: IndexMap<String, String>,

    /// Where the host application keeps its field templates. Tilde and
    /// environment variables are expanded on load.
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured template dir
        config.templates_dir = config
            .templates_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/formloom");
        PathBuf::from(config_dir.as_ref()).join("formloom.toml")
    }

    /// The configured classes as engine-side style defaults.
    pub fn style_defaults(&self) -> StyleDefaults {
        StyleDefaults {
            wrapper_class: self.defaults.wrapper_class.clone(),
            wrapper_error_class: self.defaults.wrapper_error_class.clone(),
            label_class: self.defaults.label_class.clone(),
            field_class: self.defaults.field_class.clone(),
            error_class: self.defaults.error_class.clone(),
        }
    }

    /// Registers every configured custom field type, in file order.
    ///
    /// A name colliding with a built-in or an earlier entry surfaces as
    /// [`FieldTypeError::Duplicate`].
    pub fn apply_custom_fields(
        &self,
        registry: &mut FieldTypeRegistry,
    ) -> Result<(), FieldTypeError> {
        for (name, template) in &self.custom_fields {
            registry.register_custom(name.clone(), template.clone())?;
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
