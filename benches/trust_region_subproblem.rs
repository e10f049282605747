// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ndarray::{Array1, Array2};
use newton_tr::solver::trustregion::solve_tr_subproblem;

/// A fixed tridiagonal-ish symmetric matrix, large enough to exercise the O(n^3)
/// eigendecomposition that dominates the cost of a single subproblem solve.
fn make_hessian(n: usize, indefinite: bool) -> Array2<f64> {
    let mut h = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let diag = if indefinite && i == 0 {
            -1.0
        } else {
            2.0 + (i as f64)
        };
        h[[i, i]] = diag;
        if i + 1 < n {
            h[[i, i + 1]] = 0.5;
            h[[i + 1, i]] = 0.5;
        }
    }
    h
}

fn make_gradient(n: usize) -> Array1<f64> {
    Array1::from_iter((0..n).map(|i| ((i as f64) * 0.37).sin()))
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("MoreSorensen");
    for n in [4usize, 16, 64] {
        let g = make_gradient(n);
        let h_pd = make_hessian(n, false);
        let h_indef = make_hessian(n, true);

        group.bench_with_input(BenchmarkId::new("interior", n), &n, |bencher, _| {
            bencher.iter(|| solve_tr_subproblem(black_box(&g), black_box(&h_pd), black_box(100.0), black_box(20)))
        });

        group.bench_with_input(BenchmarkId::new("boundary_indefinite", n), &n, |bencher, _| {
            bencher.iter(|| solve_tr_subproblem(black_box(&g), black_box(&h_indef), black_box(0.1), black_box(20)))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
