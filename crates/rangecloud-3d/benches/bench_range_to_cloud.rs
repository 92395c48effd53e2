use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use rangecloud_3d::{build_point_cloud_with, AxisCalibration, RangeCalibration, ZeroFilter};
use rangecloud_image::{ImageSize, RangeImage};

// profiler sized frames with every fourth sample invalid
fn make_range_image(size: ImageSize) -> RangeImage {
    let data = (0..size.width * size.height)
        .map(|i| if i % 4 == 0 { 0 } else { (i % 4096) as u16 + 1 })
        .collect();
    RangeImage::new(size, data).expect("valid size")
}

fn bench_build_point_cloud(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_point_cloud");

    let calib = RangeCalibration::new(
        AxisCalibration::new(-20.0, 0.05),
        AxisCalibration::new(0.0, 0.1),
        AxisCalibration::new(-50.0, 0.001),
    );

    for (width, height) in [(512, 256), (1280, 1024), (2048, 2000)].iter() {
        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = make_range_image(size);
        let parameter_string = format!("{}x{}", width, height);

        for filter in [ZeroFilter::RawOnly, ZeroFilter::RawAndWorld] {
            group.bench_with_input(
                BenchmarkId::new(format!("{filter:?}"), &parameter_string),
                &image,
                |b, image| {
                    b.iter(|| black_box(build_point_cloud_with(image, &calib, filter)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build_point_cloud);
criterion_main!(benches);
