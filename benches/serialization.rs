use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_xmldoc::{encode, from_str, to_string, to_value, to_xml_string, Value};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn products(size: u32) -> Value {
    let products: Vec<Product> = (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect();
    to_value(&products).unwrap()
}

fn benchmark_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };
    let text = to_xml_string(&user).unwrap();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_xml_string(black_box(&user)))
    });

    c.bench_function("decode_simple_struct", |b| {
        b.iter(|| from_str(black_box(&text)))
    });
}

fn benchmark_encode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_array");

    for size in [10, 50, 100, 500].iter() {
        let value = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| encode(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_write_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_array");

    for size in [10, 50, 100, 500].iter() {
        let root = encode(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &root, |b, root| {
            b.iter(|| to_string(black_box(root)))
        });
    }
    group.finish();
}

fn benchmark_decode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&encode(&products(*size)).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)).map(|root| root.to_value()))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };
    let text = to_xml_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_xml_string(black_box(&data)))
    });

    c.bench_function("decode_nested_struct", |b| {
        b.iter(|| from_str(black_box(&text)))
    });
}

fn benchmark_boxing(c: &mut Criterion) {
    let mut group = c.benchmark_group("boxing");

    let texts = ["12345", "-3.25", "true", "null", "plain text"];
    group.bench_function("autobox", |b| {
        b.iter(|| {
            for text in texts {
                black_box(Value::autobox(black_box(text)));
            }
        })
    });

    let values = texts.map(Value::autobox);
    group.bench_function("unbox", |b| {
        b.iter(|| {
            for value in &values {
                let _ = black_box(value.unbox());
            }
        })
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    let mut group = c.benchmark_group("xml_vs_json");
    group.bench_function("xml", |b| b.iter(|| to_xml_string(black_box(&user))));
    group.bench_function("json", |b| b.iter(|| serde_json::to_string(black_box(&user))));
    group.finish();
}

criterion_group!(
    benches,
    benchmark_simple,
    benchmark_encode_array,
    benchmark_write_array,
    benchmark_decode_array,
    benchmark_nested,
    benchmark_boxing,
    benchmark_comparison_with_json
);
criterion_main!(benches);
