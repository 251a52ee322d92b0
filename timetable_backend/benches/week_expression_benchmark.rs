use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use timetable_rust::config::Region;
use timetable_rust::parsing::{assemble_weeks, expand_week_range, tokenize};

fn bench_week_range_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_range_expansion");
    let profile = Region::Harbin.profile();

    for token in ["[1-16]", "[3-10]单", "[1-6|10]单", "[1-4|6-8双|10-18单|20]"] {
        group.bench_with_input(BenchmarkId::new("expand", token), &token, |b, input| {
            b.iter(|| black_box(expand_week_range(black_box(input), profile)));
        });
    }

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let profile = Region::Harbin.profile();
    let expression = "张三[1-2]李四[3-4]H304王五[5-16]单正心楼201";

    group.bench_function("harbin_expression", |b| {
        b.iter(|| black_box(tokenize(black_box(expression), profile).count()));
    });

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_weeks");

    let harbin = "张三[1-8]H304李四[9-16]双周正心楼201";
    group.bench_function("harbin", |b| {
        b.iter(|| black_box(assemble_weeks("高等数学", black_box(harbin), Region::Harbin.profile())));
    });

    let shenzhen = "[孙七][1-8周][T2303][周八][9-16双周][T2304]";
    group.bench_function("shenzhen", |b| {
        b.iter(|| black_box(assemble_weeks("电路", black_box(shenzhen), Region::Shenzhen.profile())));
    });

    group.finish();
}

criterion_group!(benches, bench_week_range_expansion, bench_tokenize, bench_assemble);
criterion_main!(benches);
