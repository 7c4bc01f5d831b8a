use dotscreen::halftone;
use dotscreen::image::{Color, Raster};
use dotscreen::preset::Preset;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn gradient_raster(width: i32, height: i32) -> Raster {
    let mut raster = Raster::new((width, height).into());
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x + y) * 255 / (width + height)) as u8;
            raster.set_pixel((x, y).into(), Color::new(r, g, b));
        }
    }
    raster
}

fn render_bench(c: &mut Criterion) {
    let src = gradient_raster(640, 480);

    c.bench_function("Bold halftone, 640x480", |b| {
        let options = Preset::Bold.options();
        b.iter(|| black_box(halftone::render(&src, &options).unwrap()));
    });

    c.bench_function("Benday halftone, 640x480", |b| {
        let options = Preset::Benday.options();
        b.iter(|| black_box(halftone::render(&src, &options).unwrap()));
    });
}

criterion_group!(benches, render_bench);
criterion_main!(benches);
