// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Moré-Sorensen trust-region subproblem solver
//!
//! Solves `min_s gᵀs + ½ sᵀHs  s.t. ‖s‖ ≤ Δ` for an arbitrary symmetric, possibly
//! indefinite `H` via the classical eigendecomposition-based approach: separate the
//! problem in the eigenbasis of `H`, then root-find the secular equation `φ(λ) = Δ`,
//! special-casing the interior and hard-case regimes.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization, §4.3.
//! Springer. ISBN 0-387-30303-0.
//!
//! \[1\] Moré, J. J. and Sorensen, D. C. (1983). Computing a trust region step.
//! SIAM J. Sci. Stat. Comput. 4(3), 553-572.

use crate::core::{
    ArgminFloat, CostFunction, Error, Gradient, Hessian, IterState, Problem, Solver,
    TerminationReason, TrustRegionRadius, KV,
};
use ndarray::{Array1, Array2};
use ndarray_linalg::{Lapack, Scalar};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Result of a single call to [`solve_tr_subproblem`].
#[derive(Clone, Debug)]
pub struct SubproblemSolution<F> {
    /// The computed step `s`.
    pub step: Array1<F>,
    /// The model value `gᵀs + ½ sᵀHs` at `s`.
    pub model_value: F,
    /// True iff `λ = 0`, `H` is positive definite and `‖s‖ < Δ`.
    pub interior: bool,
    /// The Lagrange multiplier (0 when interior).
    pub lambda: F,
    /// True iff the hard case was detected and handled.
    pub hard_case: bool,
    /// True iff the root-finder converged to tolerance within `max_iters`.
    pub reached_solution: bool,
}

fn model_value<F: ArgminFloat>(g: &Array1<F>, h: &Array2<F>, s: &Array1<F>) -> F {
    let half = F::from_f64(0.5).unwrap();
    g.dot(s) + half * s.dot(&h.dot(s))
}

fn euclidean_norm<F: ArgminFloat>(v: &Array1<F>) -> F {
    v.dot(v).sqrt()
}

fn infinity_norm<F: ArgminFloat>(h: &Array2<F>) -> F {
    h.rows()
        .into_iter()
        .map(|row| row.iter().fold(F::zero(), |acc, v| acc + v.abs()))
        .fold(F::zero(), |a, b| a.max(b))
}

/// Structural (Δ-independent) hard-case check described in §6/§8.
///
/// `eigenvalues` must be ascending. Returns `(hard_case, lambda_index)` where
/// `lambda_index` is the 1-based index `j*` of the first `ĝⱼ ≠ 0`, or `n + 1` if `ĝ` is
/// entirely zero. This is the purely structural half of the hard-case trigger; the full
/// solver additionally requires the reduced subproblem's norm to be `< Δ` before
/// actually taking the hard-case branch (see module docs and `DESIGN.md`).
pub fn check_hard_case_candidate<F: ArgminFloat>(eigenvalues: &[F], g_hat: &[F]) -> (bool, usize) {
    let n = eigenvalues.len();
    if n == 0 {
        return (false, 0);
    }
    let lambda1 = eigenvalues[0];
    if !(lambda1 < F::zero()) {
        return (false, 0);
    }

    let gnorm = g_hat
        .iter()
        .fold(F::zero(), |acc, &v| acc + v * v)
        .sqrt();
    let tol = F::from_f64(1e-10).unwrap() * gnorm.max(F::one());

    match g_hat.iter().position(|&v| v.abs() > tol) {
        None => (true, n + 1),
        Some(j_star) => {
            let prefix_tied = eigenvalues[..j_star]
                .iter()
                .all(|&lam| (lam - lambda1).abs() <= tol);
            if prefix_tied && eigenvalues[j_star] > lambda1 + tol {
                (true, j_star + 1)
            } else {
                (false, 0)
            }
        }
    }
}

/// Solves the trust-region subproblem `min_s gᵀs + ½ sᵀHs  s.t. ‖s‖ ≤ Δ`.
///
/// Never raises: a non-finite `g`/`H` yields `reached_solution = false` with `s = 0`,
/// leaving the caller (the trust-region outer loop) to reject the step.
pub fn solve_tr_subproblem<F>(
    g: &Array1<F>,
    h: &Array2<F>,
    delta: F,
    max_iters: u64,
) -> SubproblemSolution<F>
where
    F: ArgminFloat + Lapack + Scalar<Real = F>,
{
    let n = g.len();
    let poisoned = || SubproblemSolution {
        step: Array1::zeros(n),
        model_value: F::zero(),
        interior: false,
        lambda: F::zero(),
        hard_case: false,
        reached_solution: false,
    };

    if !g.iter().all(|v| v.is_finite()) || !h.iter().all(|v| v.is_finite()) {
        return poisoned();
    }

    let half = F::from_f64(0.5).unwrap();
    let sym_h = (h + &h.t()).mapv(|v| v * half);

    let (eigvals, q) = crate::linalg::eigh(&sym_h);
    if eigvals.iter().any(|v| !v.is_finite()) || q.iter().any(|v| !v.is_finite()) {
        return poisoned();
    }

    let g_hat = q.t().dot(g);
    let lambda1 = eigvals[0];

    let eps_pd = F::from_f64(1e-10).unwrap() * infinity_norm(&sym_h).max(F::one());

    // A. Interior case.
    if lambda1 > eps_pd {
        let norm_sq = (0..n).fold(F::zero(), |acc, i| acc + (g_hat[i] / eigvals[i]).powi(2));
        if norm_sq.sqrt() <= delta {
            let s_hat: Array1<F> = Array1::from_iter((0..n).map(|i| -g_hat[i] / eigvals[i]));
            let s = q.dot(&s_hat);
            return SubproblemSolution {
                model_value: model_value(g, &sym_h, &s),
                step: s,
                interior: true,
                lambda: F::zero(),
                hard_case: false,
                reached_solution: true,
            };
        }
    }

    // C. Hard case. `check_hard_case_candidate` is purely structural; the Δ-dependent
    // norm check below is what actually decides whether this branch applies (see
    // module docs).
    let (candidate, _) = check_hard_case_candidate(eigvals.as_slice().unwrap(), g_hat.as_slice().unwrap());
    if candidate {
        let mut reduced_norm_sq = F::zero();
        for i in 0..n {
            if eigvals[i] > lambda1 {
                reduced_norm_sq = reduced_norm_sq + (g_hat[i] / (eigvals[i] - lambda1)).powi(2);
            }
        }
        let reduced_norm = reduced_norm_sq.sqrt();
        if reduced_norm < delta {
            let tau_sq = delta * delta - reduced_norm_sq;
            let tau = if tau_sq > F::zero() { tau_sq.sqrt() } else { F::zero() };

            let mut s_hat = Array1::<F>::zeros(n);
            for i in 0..n {
                if eigvals[i] > lambda1 {
                    s_hat[i] = -g_hat[i] / (eigvals[i] - lambda1);
                }
            }
            // q₁ is any unit eigenvector of λ₁; index 0 is one since eigvals is ascending.
            s_hat[0] = s_hat[0] + tau;
            let s = q.dot(&s_hat);
            return SubproblemSolution {
                model_value: model_value(g, &sym_h, &s),
                step: s,
                interior: false,
                lambda: -lambda1,
                hard_case: true,
                reached_solution: true,
            };
        }
    }

    // B. Boundary case (easy): safeguarded Newton on φ(λ) = Δ.
    let phi = |lambda: F| -> F {
        (0..n)
            .fold(F::zero(), |acc, i| {
                acc + (g_hat[i] / (eigvals[i] + lambda)).powi(2)
            })
            .sqrt()
    };

    let eps = F::from_f64(1e-12).unwrap();
    let mut lo = F::zero().max(-lambda1) + eps;
    let g_norm = euclidean_norm(g);
    let mut hi = g_norm / delta + infinity_norm(&sym_h);
    if hi <= lo {
        hi = lo + F::one();
    }

    let mut lambda = lo + (hi - lo) * F::from_f64(0.5).unwrap();
    let tol_tr = F::from_f64(1e-10).unwrap() * delta.max(F::one());
    let mut reached = false;

    for _ in 0..max_iters {
        let phi_val = phi(lambda);
        if !phi_val.is_finite() {
            break;
        }
        if (phi_val - delta).abs() <= tol_tr {
            reached = true;
            break;
        }

        if phi_val > delta {
            lo = lambda;
        } else {
            hi = lambda;
        }

        let phi_prime = -(0..n).fold(F::zero(), |acc, i| {
            let denom = eigvals[i] + lambda;
            acc + (g_hat[i] * g_hat[i]) / (denom * denom * denom)
        }) / phi_val;

        let newton_step =
            (phi_val - delta) / delta * (phi_val * phi_val) / phi_prime;
        let mut next = lambda + newton_step;
        if !next.is_finite() || next <= lo || next >= hi {
            next = lo + (hi - lo) * F::from_f64(0.5).unwrap();
        }
        lambda = next;
    }

    let s_hat: Array1<F> = Array1::from_iter((0..n).map(|i| -g_hat[i] / (eigvals[i] + lambda)));
    let s = q.dot(&s_hat);

    SubproblemSolution {
        model_value: model_value(g, &sym_h, &s),
        step: s,
        interior: false,
        lambda,
        hard_case: false,
        reached_solution: reached,
    }
}

/// [`Solver`] wrapper around [`solve_tr_subproblem`], for use as the trust-region
/// subproblem inside [`TrustRegion`](crate::solver::trustregion::TrustRegion).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MoreSorensen<F> {
    radius: F,
    max_iters: u64,
    hard_case: bool,
    done: bool,
}

impl<F: ArgminFloat> MoreSorensen<F> {
    /// Constructor. Defaults to a radius of `1.0` and `20` root-finder iterations.
    pub fn new() -> Self {
        MoreSorensen {
            radius: F::from_f64(1.0).unwrap(),
            max_iters: 20,
            hard_case: false,
            done: false,
        }
    }

    /// Set the maximum number of root-finder iterations.
    #[must_use]
    pub fn max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }
}

impl<F: ArgminFloat> Default for MoreSorensen<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ArgminFloat> TrustRegionRadius<F> for MoreSorensen<F> {
    fn set_radius(&mut self, radius: F) {
        self.radius = radius;
        self.done = false;
    }
}

impl<O, F> Solver<O, IterState<Array1<F>, Array1<F>, (), Array2<F>, F>> for MoreSorensen<F>
where
    O: CostFunction<Param = Array1<F>, Output = F>
        + Gradient<Param = Array1<F>, Gradient = Array1<F>>
        + Hessian<Param = Array1<F>, Hessian = Array2<F>>,
    F: ArgminFloat + Lapack + Scalar<Real = F>,
{
    const NAME: &'static str = "Moré-Sorensen";

    fn init(
        &mut self,
        _problem: &mut Problem<O>,
        mut state: IterState<Array1<F>, Array1<F>, (), Array2<F>, F>,
    ) -> Result<(IterState<Array1<F>, Array1<F>, (), Array2<F>, F>, Option<KV>), Error> {
        let g = state.take_gradient().ok_or_else(crate::argmin_error_closure!(
            NotInitialized,
            "MoreSorensen: gradient must be set."
        ))?;
        let h = state.take_hessian().ok_or_else(crate::argmin_error_closure!(
            NotInitialized,
            "MoreSorensen: hessian must be set."
        ))?;

        if h.nrows() != h.ncols() || h.nrows() != g.len() {
            return Err(crate::core::ArgminError::DimensionMismatch {
                text: format!(
                    "MoreSorensen: gradient has length {} but Hessian is {}x{}.",
                    g.len(),
                    h.nrows(),
                    h.ncols()
                ),
            }
            .into());
        }

        let sol = solve_tr_subproblem(&g, &h, self.radius, self.max_iters);
        self.hard_case = sol.hard_case;
        self.done = true;

        let kv = make_kv!(
            "lambda" => sol.lambda.to_f64().unwrap_or(f64::NAN);
            "interior" => sol.interior;
            "hard_case" => sol.hard_case;
            "reached_solution" => sol.reached_solution;
        );

        Ok((
            state
                .param(sol.step)
                .cost(sol.model_value)
                .gradient(g)
                .hessian(h),
            Some(kv),
        ))
    }

    fn next_iter(
        &mut self,
        _problem: &mut Problem<O>,
        state: IterState<Array1<F>, Array1<F>, (), Array2<F>, F>,
    ) -> Result<(IterState<Array1<F>, Array1<F>, (), Array2<F>, F>, Option<KV>), Error> {
        Ok((state, None))
    }

    fn terminate(&mut self, _state: &IterState<Array1<F>, Array1<F>, (), Array2<F>, F>) -> TerminationReason {
        if !self.done {
            TerminationReason::NotTerminated
        } else if self.hard_case {
            TerminationReason::HardCaseDetected
        } else {
            TerminationReason::TargetPrecisionReached
        }
    }
}
