use criterion::{criterion_group, criterion_main, Criterion};
use geopos::io::wkb::{read_wkb, to_wkb, WkbOptions};
use geopos::{CoordinateType, Geometry, LineString, PositionSeries};

fn create_data() -> Geometry {
    // A long zig-zag chain.
    let mut values = Vec::with_capacity(100_000 * 2);
    for i in 0..100_000 {
        values.push(i as f64);
        values.push((i % 2) as f64);
    }
    LineString::new(PositionSeries::view(values, CoordinateType::XY)).into()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geometry = create_data();
    let buf = to_wkb(&geometry, &WkbOptions::default()).unwrap();

    c.bench_function("encode LineString to WKB", |b| {
        b.iter(|| {
            let _buf = to_wkb(&geometry, &WkbOptions::default()).unwrap();
        })
    });

    c.bench_function("decode LineString from WKB", |b| {
        b.iter(|| {
            let _geometry = read_wkb(&buf).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
