// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use newton_tr::core::{CostFunction, Error, Executor, Gradient};
use newton_tr::solver::linesearch::condition::ArmijoCondition;
use newton_tr::solver::linesearch::BacktrackingLineSearch;
use newton_tr::solver::quasinewton::LBFGS;
use argmin_testfunctions::rosenbrock;
use finitediff::FiniteDiff;
use ndarray::Array1;

struct RosenbrockNd {
    a: f64,
    b: f64,
}

impl CostFunction for RosenbrockNd {
    type Param = Array1<f64>;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, Error> {
        Ok(rosenbrock(&p.to_vec(), self.a, self.b))
    }
}

impl Gradient for RosenbrockNd {
    type Param = Array1<f64>;
    type Gradient = Array1<f64>;

    fn gradient(&self, p: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok((*p).forward_diff(&|x| rosenbrock(&x.to_vec(), self.a, self.b)))
    }
}

fn run_lbfgs(
    a: f64,
    b: f64,
    init_param: &[f64],
    c1: f64,
    m: usize,
    iterations: u64,
) -> Result<(), Error> {
    let cost = RosenbrockNd { a, b };
    let init_param: Array1<f64> = Array1::from_vec(Vec::from(init_param));

    let linesearch = BacktrackingLineSearch::new(ArmijoCondition::new(c1)?);
    let solver = LBFGS::new(linesearch, m);

    Executor::new(cost, solver)
        .configure(|state| state.param(init_param).max_iters(iterations))
        .ctrlc(false)
        .run()?;
    Ok(())
}

fn criterion_benchmark(c: &mut Criterion) {
    let a = 1.0;
    let b = 100.0;
    let init_param = vec![-1.2, 1.0, -10.0, 2.0, 3.0, 2.0, 4.0, 10.0];
    let c1 = 1e-4;
    let m = 7;
    let iterations: u64 = 100;
    let mut group = c.benchmark_group("LBFGS");
    for i in 2..init_param.len() {
        group.bench_with_input(BenchmarkId::new("ndarray", i), &i, |bencher, i| {
            bencher.iter(|| {
                run_lbfgs(
                    black_box(a),
                    black_box(b),
                    black_box(&init_param[0..*i]),
                    black_box(c1),
                    black_box(m),
                    black_box(iterations),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
