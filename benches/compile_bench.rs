use criterion::{black_box, criterion_group, criterion_main, Criterion};
use siftql::*;

fn make_schema() -> Schema {
    SchemaBuilder::new()
        .column("id", ColumnSpec::new("id"))
        .column("status", ColumnSpec::new("status"))
        .column("port", ColumnSpec::new("port"))
        .column("name", ColumnSpec::new("user_name").searchable().indexed())
        .build()
}

const FILTER_JSON: &str = r#"{
    "operation": "AND",
    "properties": [
        {"column": "status", "op": "eq", "value": "active"},
        {"column": "port", "op": "in", "value": [80, 443, 8080]},
        {"operation": "OR", "properties": [
            {"column": "id", "op": "gt", "value": 1000},
            {"column": "id", "op": "le", "value": 10}
        ]}
    ]
}"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_filter_json", |b| {
        b.iter(|| FilterExpr::from_user_input(black_box(FILTER_JSON), false).unwrap())
    });
}

fn bench_sql_compile(c: &mut Criterion) {
    let schema = make_schema();
    let expr = FilterExpr::from_user_input(FILTER_JSON, false).unwrap();
    c.bench_function("sql_compile", |b| {
        b.iter(|| SqlCompiler.compile(black_box(&expr), &schema).unwrap())
    });
}

fn bench_search_compile(c: &mut Criterion) {
    let schema = make_schema();
    let expr = FilterExpr::from_user_input(
        r#"{
            "operation": "AND",
            "properties": [
                {"column": "name", "op": "fuzzy", "value": "smith"},
                {"column": "status", "op": "eq", "value": "active"}
            ]
        }"#,
        false,
    )
    .unwrap();
    c.bench_function("search_compile", |b| {
        b.iter(|| SearchCompiler.compile(black_box(&expr), &schema).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_sql_compile, bench_search_compile);
criterion_main!(benches);
