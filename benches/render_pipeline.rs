// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_enhancer::domain::{AdjustmentKind, AdjustmentSettings};
use image_enhancer::media::{compile, render, RenderOptions, SourceImage};
use image_rs::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::hint::black_box;
use std::io::Cursor;

fn sample_source(width: u32, height: u32) -> SourceImage {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode sample png");
    SourceImage::new(bytes, Some("sample.png".into()))
}

fn render_pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pipeline");
    let source = sample_source(640, 480);
    let options = RenderOptions::default();

    let neutral = AdjustmentSettings::default();
    let color_only = AdjustmentSettings::default()
        .with(AdjustmentKind::Brightness, 120)
        .with(AdjustmentKind::Contrast, 110)
        .with(AdjustmentKind::Saturation, 140);
    let everything = color_only
        .with(AdjustmentKind::Sharpness, 50)
        .with(AdjustmentKind::Blur, 40);

    group.bench_function("compile_filter", |b| {
        b.iter(|| black_box(compile(black_box(&everything))));
    });

    for (name, settings) in [
        ("render_neutral", neutral),
        ("render_color", color_only),
        ("render_sharpen_blur", everything),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(render(&source, &settings, &options).expect("render")));
        });
    }

    group.finish();
}

criterion_group!(benches, render_pipeline_benchmark);
criterion_main!(benches);
