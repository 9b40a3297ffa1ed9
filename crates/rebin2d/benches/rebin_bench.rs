//! Criterion benchmarks for the rebin engine.
//! Focus sizes: square grids with n in {32, 64, 128} cells per side.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rebin2d::geom::{Point2, Quadrilateral};
use rebin2d::rebin::{QuadSource, RebinCfg};
use rebin2d::{rebin, rebin_with, InputGrid, NoHooks, RowEdges};

fn random_grid(n: usize, seed: u64) -> InputGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<f64> = (0..=n).map(|i| i as f64).collect();
    let signal: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0.0..100.0)).collect())
        .collect();
    let variance = signal.clone();
    InputGrid::new(RowEdges::Shared(edges.clone()), edges, signal, variance, false).unwrap()
}

/// Coarser output boundaries, offset so input edges rarely coincide with
/// output edges.
fn coarse_edges(n: usize) -> Vec<f64> {
    (0..=n / 2).map(|i| 0.3 + 1.9 * i as f64).collect()
}

struct Sheared<'a> {
    input: &'a InputGrid,
}

impl QuadSource for Sheared<'_> {
    fn quad(&self, row: usize, col: usize) -> Quadrilateral {
        let x = self.input.x_edges(row);
        let y = self.input.y_edges();
        let dx = 0.25 * (y[row + 1] - y[row]);
        Quadrilateral::new(
            Point2::new(x[col], y[row]),
            Point2::new(x[col + 1], y[row]),
            Point2::new(x[col + 1] + dx, y[row + 1]),
            Point2::new(x[col] + dx, y[row + 1]),
        )
    }
}

fn bench_rebin(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebin");
    let sequential = RebinCfg {
        parallel: false,
        ..RebinCfg::default()
    };
    for &n in &[32usize, 64, 128] {
        let input = random_grid(n, 43);
        let x_out = coarse_edges(n);
        let y_out = coarse_edges(n);

        group.bench_with_input(BenchmarkId::new("rectangle_path", n), &n, |b, _| {
            b.iter(|| rebin(&input, &x_out, &y_out, &sequential).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("trapezoid_path", n), &n, |b, _| {
            let quads = Sheared { input: &input };
            b.iter(|| rebin_with(&input, &x_out, &y_out, &sequential, &quads, &NoHooks).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            b.iter(|| rebin(&input, &x_out, &y_out, &RebinCfg::default()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rebin);
criterion_main!(benches);
