#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use canon_bencode::{decode, encode, validate_canonical, Dict, Encoder, Value};

fn sample_small() -> Vec<u8> {
    b"d1:ai1ee".to_vec()
}

fn sample_medium() -> Vec<u8> {
    let mut dict = Dict::new();
    for i in 0..64_i64 {
        dict.insert(format!("k{i:03}").into_bytes(), Value::Integer(i));
    }
    dict.insert(b"pieces".to_vec(), Value::Bytes(vec![0xab; 20 * 64]));
    encode(&Value::Dict(dict))
}

fn bench_codec(c: &mut Criterion) {
    let small = sample_small();

    c.bench_function("validate_canonical_small", |b| {
        b.iter(|| {
            validate_canonical(black_box(&small)).unwrap();
        })
    });

    let medium = sample_medium();

    c.bench_function("validate_canonical_medium", |b| {
        b.iter(|| {
            validate_canonical(black_box(&medium)).unwrap();
        })
    });

    c.bench_function("decode_medium", |b| {
        b.iter(|| {
            let v = decode(black_box(&medium)).unwrap();
            black_box(v);
        })
    });

    let decoded = decode(&medium).unwrap();
    c.bench_function("encode_medium", |b| {
        b.iter(|| {
            let bytes = encode(black_box(&decoded));
            black_box(bytes);
        })
    });

    c.bench_function("encoder_stream_medium", |b| {
        b.iter(|| {
            let mut enc = Encoder::with_capacity(medium.len());
            enc.dict(|d| {
                for i in (0..64_i64).rev() {
                    d.entry_value(format!("k{i:03}").as_bytes(), &Value::Integer(i));
                }
                Ok::<_, ()>(())
            })
            .unwrap();
            black_box(enc.into_vec());
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
