use criterion::{criterion_group, criterion_main, Criterion};

use cardforge::{compose, export, ExportFormat, RenderParams, ResolvedAssets};

// Benchmarks exercise the synchronous half of the pipeline: compositing and
// encoding. Asset resolution is network-bound and excluded.

fn bench_compose(c: &mut Criterion) {
    let mut params = RenderParams::default();
    params.background.value.clear();
    params.icon.source.value.clear();
    let assets = ResolvedAssets::default();

    c.bench_function("compose_1200x630", |b| {
        b.iter(|| {
            let _ = compose(&params, &assets);
        })
    });
}

fn bench_compose_with_background(c: &mut Criterion) {
    let mut params = RenderParams::default();
    params.background.value.clear();
    params.icon.source.value.clear();
    params.background_opacity = 0.8;

    let bg = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        256,
        256,
        image::Rgba([120, 130, 140, 255]),
    ));
    let assets = ResolvedAssets {
        background: Some(bg),
        icon: None,
    };

    c.bench_function("compose_1200x630_with_background", |b| {
        b.iter(|| {
            let _ = compose(&params, &assets);
        })
    });
}

fn bench_export_png(c: &mut Criterion) {
    let mut params = RenderParams::default();
    params.background.value.clear();
    params.icon.source.value.clear();
    let surface = compose(&params, &ResolvedAssets::default());

    c.bench_function("export_png_1200x630", |b| {
        b.iter(|| {
            let _ = export(&surface, ExportFormat::Png).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_compose,
    bench_compose_with_background,
    bench_export_png
);
criterion_main!(benches);
