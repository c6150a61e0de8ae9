//! Parser benchmarks.
//!
//! Run with: `cargo bench --package ktc-par --bench parser_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ktc_par::{Parser, ParserConfig};

fn parse(source: &str) {
    let mut parser = Parser::new(source, ParserConfig::default());
    parser.parse().expect("benchmark source parses");
}

fn bench_parser_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_declarations");
    let source = "fun add(a: Int, b: Int): Int = a + b\nval x: Int = add(1, 2)";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("function_and_property", |b| b.iter(|| parse(black_box(source))));
    group.finish();
}

fn bench_parser_class_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_class_body");
    let source = r#"
        class Point(val x: Int, val y: Int) {
            fun distanceTo(other: Point): Double {
                val dx = x - other.x
                val dy = y - other.y
                return Math.sqrt((dx * dx + dy * dy).toDouble())
            }

            companion object {
                fun origin(): Point = Point(0, 0)
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

        enum class Direction {
            NORTH, SOUTH, EAST, WEST
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("class_with_companion", |b| b.iter(|| parse(black_box(source))));
    group.finish();
}

fn bench_parser_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_expressions");
    let source = r#"
        fun classify(x: Any): String = when (x) {
            is Int -> "int"
            is String -> "string"
            in 1..10 -> "small"
            else -> "other"
        }

        fun pipeline(items: List<Int>): Int =
            items.filter { it % 2 == 0 }.map { it * it }.fold(0) { acc, n -> acc + n }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("when_and_lambda_chain", |b| b.iter(|| parse(black_box(source))));
    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");
    let source = r#"
        fun process(n: Int): Int {
            if (n < 0) {
                return -1
            } else if (n == 0) {
                return 0
            } else {
                var sum = 0
                var i = 0
                while (i < n) {
                    sum += i
                    i++
                }
                for (j in 0 until n) {
                    sum += j
                }
                return sum
            }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("loops_and_branches", |b| b.iter(|| parse(black_box(source))));
    group.finish();
}

fn bench_parser_complex_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");
    let source = r#"
        package com.example.shapes

        import kotlin.math.sqrt

        interface Drawable {
            fun draw(): String
            fun boundingBox(): Rectangle
        }

        data class Point(val x: Double, val y: Double)

        data class Rectangle(val origin: Point, val width: Double, val height: Double)

        class Circle(private val center: Point, private val radius: Double) : Drawable {
            override fun draw(): String = "circle at $center with r=$radius"

            override fun boundingBox(): Rectangle {
                val side = radius * 2
                return Rectangle(Point(center.x - radius, center.y - radius), side, side)
            }

            fun distanceTo(other: Circle): Double {
                val dx = center.x - other.center.x
                val dy = center.y - other.center.y
                return sqrt(dx * dx + dy * dy)
            }
        }

        fun main() {
            val shapes: MutableList<Drawable> = mutableListOf()
            shapes.add(Circle(Point(0.0, 0.0), 1.0))
            for (shape in shapes) {
                println(shape.draw())
            }
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("full_file", |b| b.iter(|| parse(black_box(source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_parser_declarations,
    bench_parser_class_body,
    bench_parser_expressions,
    bench_parser_control_flow,
    bench_parser_complex_file
);
criterion_main!(benches);
