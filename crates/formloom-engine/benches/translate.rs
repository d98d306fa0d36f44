use criterion::{Criterion, criterion_group, criterion_main};
use formloom_engine::fields::FieldDescriptor;
use formloom_engine::render::KeyTranslator;
use formloom_engine::rules::{RuleTranslator, Rules};

fn bench_rule_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");
    group.sample_size(50);

    let field = FieldDescriptor::new("username", "text");
    let rules: Rules = "required|alpha_dash|between:3,20|not_in:admin,root,system".into();
    let translator = RuleTranslator::new(&KeyTranslator);

    group.bench_function("translate_text_field", |b| {
        b.iter(|| {
            let attrs = translator
                .translate(std::hint::black_box(&rules), &field)
                .unwrap();
            std::hint::black_box(attrs);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rule_translation);
criterion_main!(benches);
