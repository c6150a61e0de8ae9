//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package ktc-lex --bench lexer_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ktc_lex::{Lexer, LexerConfig};

fn token_count(source: &str) -> usize {
    Lexer::new(source, LexerConfig::default())
        .map(|r| r.unwrap())
        .count()
}

fn bench_lexer_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_declarations");
    let source = "fun add(a: Int, b: Int): Int = a + b\nval x: Int = add(1, 2)";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("small_function", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_lexer_class_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_class_body");
    let source = r#"
        class Point(val x: Int, val y: Int) {
            fun distanceTo(other: Point): Double {
                val dx = x - other.x
                val dy = y - other.y
                return Math.sqrt((dx * dx + dy * dy).toDouble())
            }
        }

        interface Shape {
            fun area(): Double
        }

        sealed class Color {
            object Red : Color()
            object Green : Color()
            object Blue : Color()
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("class_with_methods", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| token_count(black_box(r#"val s = "hello""#)))
    });

    group.bench_function("interpolated_string", |b| {
        b.iter(|| token_count(black_box(r#"val s = "hello ${name.uppercase()}, you are ${age} years old""#)))
    });

    group.bench_function("multiline_string", |b| {
        let source = "val s = \"\"\"\n    line one\n    line two ${value}\n\"\"\"";
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("decimal", |b| b.iter(|| token_count(black_box("val x = 123_456"))));
    group.bench_function("real", |b| b.iter(|| token_count(black_box("val x = 3.14159e10f"))));
    group.bench_function("hex", |b| b.iter(|| token_count(black_box("val x = 0xDEAD_BEEFuL"))));

    group.finish();
}

fn bench_lexer_when_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_when_expression");
    let source = r#"
        fun classify(x: Any): String = when (x) {
            is Int -> "int"
            is String -> "string"
            in 1..10 -> "small"
            else -> "other"
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("when_with_is_and_in", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_declarations,
    bench_lexer_class_body,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_when_expression
);
criterion_main!(benches);
