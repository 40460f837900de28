use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use grayconv_image::Image;
use grayconv_imgproc::filter::{convolve_with, kernels::Kernel2d, ConvolveConfig};
use grayconv_imgproc::parallel::ExecutionStrategy;

use image::GrayImage;

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolution");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 7, 21].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image_data = (0..width * height).map(|i| (i % 251) as u8).collect();
            let image = Image::<u8, 1>::new([*width, *height].into(), image_data).unwrap();
            let kernel = Kernel2d::box_blur(*kernel_size).unwrap();

            group.bench_with_input(
                BenchmarkId::new("convolve_serial", &parameter_string),
                &(&image, &kernel),
                |b, i| {
                    let config = ConvolveConfig::default();
                    b.iter(|| black_box(convolve_with(i.0, i.1, &config)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("convolve_parallel_rows", &parameter_string),
                &(&image, &kernel),
                |b, i| {
                    let config =
                        ConvolveConfig::default().with_strategy(ExecutionStrategy::ParallelRows);
                    b.iter(|| black_box(convolve_with(i.0, i.1, &config)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("filter_clamped_imageproc", &parameter_string),
                &(&image, &kernel),
                |b, i| {
                    let gray = GrayImage::from_raw(
                        i.0.cols() as u32,
                        i.0.rows() as u32,
                        i.0.as_slice().to_vec(),
                    )
                    .unwrap();
                    let weights = i.1.as_slice().iter().map(|&w| w as f32).collect::<Vec<_>>();
                    b.iter(|| {
                        let kernel = imageproc::kernel::Kernel::new(
                            &weights,
                            *kernel_size as u32,
                            *kernel_size as u32,
                        );
                        black_box(imageproc::filter::filter_clamped::<_, f32, u8>(&gray, kernel))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_convolution);
criterion_main!(benches);
