use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use oclfilt_rs::{DecodeOptions, Outcome, StationReader};
use std::io::Cursor;

fn vint(value: i64) -> String {
    let digits = value.to_string();
    format!("{}{}", digits.len(), digits)
}

fn vfloat(value: f64, precision: u32) -> String {
    let digits = ((value * 10f64.powi(precision as i32)).round() as i64).to_string();
    format!("{}{}{}{}", digits.len(), digits.len(), precision, digits)
}

/// Encode one synthetic observed station with the given number of levels.
fn make_station(station_number: i64, levels: usize) -> String {
    let mut body = String::new();
    body += &vint(station_number);
    body += "90";
    body += &vint(4321);
    body += "19880615";
    body += &vfloat(12.5, 2);
    body += &vfloat(47.25, 4);
    body += &vfloat(-122.5, 4);
    body += &vint(levels as i64);
    body += "0";
    body += "02";
    for code in [1i64, 2] {
        body += &vint(code);
        body += "0";
    }
    body += "-"; // character/PI block

    // Secondary header with a bottom depth, so header-only decoding can
    // actually skip the profile.
    let sec = format!("{}{}{}", vint(1), vint(10), vfloat(300.0, 1));
    body += &vint(sec.len() as i64);
    body += &sec;

    body += "-"; // biological header
    for i in 0..levels {
        body += &vfloat(i as f64 * 5.0, 1);
        body += "0";
        body += &vfloat(10.0 + i as f64 * 0.01, 2);
        body += "0";
        body += &vfloat(34.0 + i as f64 * 0.001, 3);
        body += "0";
    }

    // The leading field counts the whole station including itself.
    let body_len = body.len() as i64;
    let mut total = body_len + 2;
    while total != body_len + 1 + total.to_string().len() as i64 {
        total += 1;
    }
    format!("{}{}\n", vint(total), body)
}

fn make_stream(stations: usize, levels: usize) -> String {
    (0..stations).map(|i| make_station(i as i64, levels)).collect()
}

fn bench_decode(c: &mut Criterion) {
    let stream = make_stream(100, 50);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(100));

    group.bench_function("full/100sta/50lvl", |b| {
        b.iter(|| {
            let count = StationReader::new(Cursor::new(black_box(stream.as_bytes())))
                .filter(|r| matches!(r, Ok(Outcome::Decoded { .. })))
                .count();
            assert_eq!(count, 100);
        })
    });

    group.bench_function("header_only/100sta/50lvl", |b| {
        b.iter(|| {
            let count = StationReader::new(Cursor::new(black_box(stream.as_bytes())))
                .with_options(DecodeOptions::new().without_profile())
                .filter(|r| matches!(r, Ok(Outcome::Decoded { .. })))
                .count();
            assert_eq!(count, 100);
        })
    });

    group.bench_function("skip_to_last/100sta/50lvl", |b| {
        b.iter(|| {
            let count = StationReader::new(Cursor::new(black_box(stream.as_bytes())))
                .with_options(DecodeOptions::new().with_skip_to(99))
                .filter(|r| matches!(r, Ok(Outcome::Decoded { .. })))
                .count();
            assert_eq!(count, 1);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
