//! Native vs Composite Register Benchmarks
//!
//! Compares the two representations of the same register width over slices
//! of increasing size, so the cost of lane decomposition is visible next to
//! the single-register path and a plain scalar loop.
//!
//! # Benchmark Categories
//!
//! ## 1. **Elementwise arithmetic**
//! - Scalar loop (baseline)
//! - `Native<f32, 8>`: one 256-bit register as an element array
//! - `F32x8`: the 256-bit alias, `__m256`-backed on AVX2 builds
//! - `Composite<Native<f32, 4>>`: two 128-bit lanes
//! - `Composite<Composite<Native<f32, 4>>>`: 512 bits from four 128-bit lanes
//!
//! ## 2. **Horizontal reductions**
//! - `reduce_min` through the halving tree on each representation
//!
//! ## 3. **Transcendental functions**
//! - `SliceMath::asin` and `par_asin` against the scalar routine

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdreg::simd::{slice, Capabilities, Composite, F32x8, Native, SimdRegister, SliceMath};

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

type Native256 = Native<f32, 8>;
type Composite256 = Composite<Native<f32, 4>>;
type Composite512 = Composite<Composite<Native<f32, 4>>>;

/// Vector sizes across the cache hierarchy.
const VECTOR_SIZES: &[usize] = &[
    1_024,     // 4 KiB - L1 cache
    16_384,    // 64 KiB - L1→L2 transition
    262_144,   // 1 MiB - L2 cache, parallel threshold
    1_048_576, // 4 MiB - L3 cache
];

// ================================================================================================
// TEST DATA GENERATION
// ================================================================================================

/// Reproducible values in [-1, 1), valid input for every function benchmarked here.
fn generate_test_data(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0..1.0)).collect()
}

// ================================================================================================
// BENCHMARK IMPLEMENTATIONS
// ================================================================================================

fn mul_add_with<R: SimdRegister<Elem = f32>>(a: &[f32], b: &[f32]) -> Vec<f32> {
    // a * b + a
    slice::zip_map::<R, _>(a, b, |x, y| x.mul_add(y, x)).unwrap_or_default()
}

fn benchmark_arithmetic(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("MulAdd {}", format_size(size)));
        group.throughput(Throughput::Bytes(
            (2 * size * std::mem::size_of::<f32>()) as u64,
        ));

        let a = generate_test_data(size, 42);
        let b = generate_test_data(size, 43);
        let inputs = (a.as_slice(), b.as_slice());

        group.bench_with_input(BenchmarkId::new("Scalar", size), &inputs, |bench, (a, b)| {
            bench.iter(|| {
                black_box(
                    a.iter()
                        .zip(b.iter())
                        .map(|(x, y)| x.mul_add(*y, *x))
                        .collect::<Vec<f32>>(),
                )
            })
        });

        group.bench_with_input(
            BenchmarkId::new("Native 256", size),
            &inputs,
            |bench, (a, b)| bench.iter(|| black_box(mul_add_with::<Native256>(a, b))),
        );

        group.bench_with_input(
            BenchmarkId::new("Alias 256", size),
            &inputs,
            |bench, (a, b)| bench.iter(|| black_box(mul_add_with::<F32x8>(a, b))),
        );

        group.bench_with_input(
            BenchmarkId::new("Composite 256", size),
            &inputs,
            |bench, (a, b)| bench.iter(|| black_box(mul_add_with::<Composite256>(a, b))),
        );

        group.bench_with_input(
            BenchmarkId::new("Composite 512", size),
            &inputs,
            |bench, (a, b)| bench.iter(|| black_box(mul_add_with::<Composite512>(a, b))),
        );

        group.finish();
    }
}

fn benchmark_reductions(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("ReduceMin {}", format_size(size)));
        group.throughput(Throughput::Bytes((size * std::mem::size_of::<f32>()) as u64));

        let data = generate_test_data(size, 44);
        let input = data.as_slice();

        group.bench_with_input(BenchmarkId::new("Scalar", size), input, |b, input| {
            b.iter(|| black_box(input.iter().copied().fold(f32::INFINITY, f32::min)))
        });

        group.bench_with_input(BenchmarkId::new("Native 256", size), input, |b, input| {
            b.iter(|| black_box(slice::reduce_min::<Native256>(black_box(input))))
        });

        group.bench_with_input(BenchmarkId::new("Alias 256", size), input, |b, input| {
            b.iter(|| black_box(slice::reduce_min::<F32x8>(black_box(input))))
        });

        group.bench_with_input(BenchmarkId::new("Composite 256", size), input, |b, input| {
            b.iter(|| black_box(slice::reduce_min::<Composite256>(black_box(input))))
        });

        group.finish();
    }
}

fn benchmark_math(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group(format!("Asin {}", format_size(size)));
        group.throughput(Throughput::Bytes((size * std::mem::size_of::<f32>()) as u64));

        let data = generate_test_data(size, 45);
        let input = data.as_slice();

        group.bench_with_input(BenchmarkId::new("Scalar", size), input, |b, input| {
            b.iter(|| black_box(input.iter().map(|x| x.asin()).collect::<Vec<f32>>()))
        });

        group.bench_with_input(BenchmarkId::new("SIMD", size), input, |b, input| {
            b.iter(|| black_box(SliceMath::asin(input)))
        });

        group.bench_with_input(
            BenchmarkId::new("Parallel SIMD", size),
            input,
            |b, input| b.iter(|| black_box(black_box(input).par_asin())),
        );

        group.finish();
    }
}

// ================================================================================================
// UTILITY FUNCTIONS
// ================================================================================================

/// Formats vector sizes into human-readable strings.
fn format_size(elements: usize) -> String {
    let bytes = elements * std::mem::size_of::<f32>();

    if bytes >= 1_048_576 {
        format!("{:.1} MiB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

fn all_benchmarks(c: &mut Criterion) {
    let caps = Capabilities::current();
    println!(
        "Starting register benchmarks on {} (256-bit native: {}, 512-bit native: {}, avx2 registers: {})",
        caps.backend, caps.native_256, caps.native_512, caps.avx2_registers
    );

    let start_time = Instant::now();

    benchmark_arithmetic(c);
    benchmark_reductions(c);
    benchmark_math(c);

    println!(
        "Benchmark suite completed in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
}

// ================================================================================================
// CRITERION INTEGRATION
// ================================================================================================

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
