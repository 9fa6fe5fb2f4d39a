use criterion::{criterion_group, criterion_main, Criterion};
use quick_launcher::matching::{match_text, rank};

fn bench_rank(c: &mut Criterion) {
    let paths: Vec<String> = (0..10_000)
        .map(|i| format!("src/plugins/module_{i}/item_{i}.rs"))
        .collect();
    c.bench_function("rank_10k", |b| {
        b.iter(|| rank(paths.iter(), "mod99it", |p| p.as_str()))
    });
}

fn bench_match_text(c: &mut Criterion) {
    let names: Vec<String> = (0..1_000)
        .map(|i| format!("扩展程序 {i} 张杰"))
        .collect();
    c.bench_function("match_text_1k_fuzzy", |b| {
        b.iter(|| names.iter().filter(|n| match_text("kzzj", n)).count())
    });
}

criterion_group!(benches, bench_rank, bench_match_text);
criterion_main!(benches);
