use criterion::{criterion_group, criterion_main, Criterion};
use plainmap::{decode, encode, rotate_forward, rotate_inverse, threshold, to_gray, PixelBuffer};
use std::hint::black_box;

fn make_image(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let value = ((x * 13) ^ (y * 7) ^ (x * y) ^ (c * 29)) & 0xFF;
                data.push(value as u8);
            }
        }
    }
    PixelBuffer::new(data, width, height, channels, 255).unwrap()
}

fn bench_codec(c: &mut Criterion) {
    let image = make_image(256, 256, 3);
    let text = encode(&image);

    c.bench_function("encode_p3_256", |b| b.iter(|| encode(black_box(&image))));
    c.bench_function("decode_p3_256", |b| {
        b.iter(|| decode(black_box(&text)).unwrap())
    });
}

fn bench_ops(c: &mut Criterion) {
    let color = make_image(512, 512, 3);
    let gray = to_gray(&color).unwrap();

    c.bench_function("to_gray_512", |b| b.iter(|| to_gray(black_box(&color)).unwrap()));
    c.bench_function("threshold_512", |b| {
        b.iter(|| threshold(black_box(&gray)).unwrap())
    });
}

fn bench_rotation(c: &mut Criterion) {
    let gray = make_image(512, 384, 1);

    c.bench_function("rotate_forward_55", |b| {
        b.iter(|| rotate_forward(black_box(&gray), black_box(55.0)).unwrap())
    });
    c.bench_function("rotate_inverse_55", |b| {
        b.iter(|| rotate_inverse(black_box(&gray), black_box(55.0)).unwrap())
    });
    #[cfg(feature = "rayon")]
    c.bench_function("rotate_inverse_par_55", |b| {
        b.iter(|| plainmap::rotate_inverse_par(black_box(&gray), black_box(55.0)).unwrap())
    });
}

criterion_group!(benches, bench_codec, bench_ops, bench_rotation);
criterion_main!(benches);
