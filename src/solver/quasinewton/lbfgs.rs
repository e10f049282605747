// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::{
    ArgminFloat, CostFunction, DeserializeOwnedAlias, Error, Executor, Gradient, IterState,
    OptimizationResult, Problem, SerializeAlias, Solver, TerminationReason, KV,
};
use crate::solver::linesearch::LineSearch;
use argmin_math::{ArgminAdd, ArgminDot, ArgminL2Norm, ArgminMul, ArgminSub};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// L-BFGS method
///
/// The two-loop recursion approximates the Newton direction `−B⁻¹g` from the last `m`
/// `(s, y)` curvature pairs without ever forming `B` explicitly. The step length itself is
/// delegated to a nested line search `L`, set via `LBFGS::new(linesearch, m)`.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LBFGS<L, P, F> {
    /// line search
    linesearch: L,
    /// Number of curvature pairs retained
    m: usize,
    /// s_{k-1}, ..., s_{k-m}
    s: VecDeque<P>,
    /// y_{k-1}, ..., y_{k-m}
    y: VecDeque<P>,
    /// Tolerance for the stopping criterion based on the norm of the gradient
    tol_grad: F,
    /// Tolerance for the stopping criterion based on the change of the cost function
    tol_cost: F,
    /// Whether to scale the initial inverse-Hessian guess by `γ = (sᵀy)/(yᵀy)` (default:
    /// `true`). Has no effect before the first curvature pair is available.
    scale_inv_h0: bool,
    /// Optional preconditioner applied to the initial two-loop guess when `scale_inv_h0`
    /// does not fire (no history yet, or disabled). `None` falls back to the identity.
    #[cfg_attr(feature = "serde1", serde(skip))]
    precond: Option<Arc<dyn Fn(&P) -> P + Send + Sync>>,
}

impl<L, P, F: ArgminFloat> LBFGS<L, P, F> {
    /// Constructor
    pub fn new(linesearch: L, m: usize) -> Self {
        LBFGS {
            linesearch,
            m,
            s: VecDeque::with_capacity(m),
            y: VecDeque::with_capacity(m),
            tol_grad: F::epsilon().sqrt(),
            tol_cost: F::epsilon(),
            scale_inv_h0: true,
            precond: None,
        }
    }

    /// Sets tolerance for the stopping criterion based on the change of the norm on the gradient
    #[must_use]
    pub fn with_tol_grad(mut self, tol_grad: F) -> Self {
        self.tol_grad = tol_grad;
        self
    }

    /// Sets tolerance for the stopping criterion based on the change of the cost stopping criterion
    #[must_use]
    pub fn with_tol_cost(mut self, tol_cost: F) -> Self {
        self.tol_cost = tol_cost;
        self
    }

    /// Turns the `γ = (sᵀy)/(yᵀy)` scaled-identity initial guess on or off (default: on).
    #[must_use]
    pub fn with_scale_inv_h0(mut self, scale_inv_h0: bool) -> Self {
        self.scale_inv_h0 = scale_inv_h0;
        self
    }

    /// Sets a preconditioner `P⁻¹` applied to the initial two-loop guess whenever the
    /// `γ`-scaled identity does not fire (no curvature history yet, or disabled via
    /// [`with_scale_inv_h0`](LBFGS::with_scale_inv_h0)).
    #[must_use]
    pub fn with_preconditioner<Func>(mut self, precond: Func) -> Self
    where
        Func: Fn(&P) -> P + Send + Sync + 'static,
    {
        self.precond = Some(Arc::new(precond));
        self
    }
}

impl<O, L, P, F> Solver<O, IterState<P, P, (), (), F>> for LBFGS<L, P, F>
where
    O: CostFunction<Param = P, Output = F> + Gradient<Param = P, Gradient = P>,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + ArgminSub<P, P>
        + ArgminAdd<P, P>
        + ArgminDot<P, F>
        + ArgminMul<F, P>
        + ArgminL2Norm<F>,
    L: Clone + LineSearch<P, F> + Solver<O, IterState<P, P, (), (), F>>,
    F: ArgminFloat,
{
    const NAME: &'static str = "L-BFGS";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, P, (), (), F>,
    ) -> Result<(IterState<P, P, (), (), F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(crate::argmin_error_closure!(
            NotInitialized,
            "LBFGS: initial parameter vector must be set."
        ))?;
        let cost = problem.cost(&param)?;
        let grad = problem.gradient(&param)?;
        Ok((state.param(param).cost(cost).gradient(grad), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, P, (), (), F>,
    ) -> Result<(IterState<P, P, (), (), F>, Option<KV>), Error> {
        let param = state.take_param().unwrap();
        let cur_cost = state.get_cost();
        let prev_grad = state
            .take_gradient()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&param))?;

        // --- two-loop recursion (§4.2) ---
        let n = self.s.len();
        let mut alpha = vec![F::zero(); n];
        let mut rho = vec![F::zero(); n];
        let mut q = prev_grad.clone();
        for (i, (sk, yk)) in self.s.iter().rev().zip(self.y.iter().rev()).enumerate() {
            let idx = n - i - 1;
            rho[idx] = F::one() / yk.dot(sk);
            alpha[idx] = rho[idx] * sk.dot(&q);
            q = q.sub(&yk.mul(&alpha[idx]));
        }

        let mut r = if self.scale_inv_h0 && !self.s.is_empty() {
            let sk = self.s.back().unwrap();
            let yk = self.y.back().unwrap();
            let gamma = sk.dot(yk) / yk.dot(yk);
            q.mul(&gamma)
        } else if let Some(precond) = &self.precond {
            precond(&q)
        } else {
            q.clone()
        };

        for (i, (sk, yk)) in self.s.iter().zip(self.y.iter()).enumerate() {
            let beta = rho[i] * yk.dot(&r);
            r = r.add(&sk.mul(&(alpha[i] - beta)));
        }

        let direction = r.mul(&F::from_f64(-1.0).unwrap());

        self.linesearch.search_direction(direction);

        let OptimizationResult {
            problem: line_problem,
            state: mut line_state,
            ..
        } = Executor::new(problem.take_problem().unwrap(), self.linesearch.clone())
            .configure(|config| {
                config
                    .param(param.clone())
                    .gradient(prev_grad.clone())
                    .cost(cur_cost)
            })
            .ctrlc(false)
            .run()?;

        let new_param = line_state.take_param().unwrap();
        let new_cost = line_state.get_cost();

        problem.problem = line_problem.problem;
        for (key, count) in line_problem.counts {
            *problem.counts.entry(key).or_insert(0) += count;
        }

        let new_grad = line_state
            .take_gradient()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&new_param))?;

        let s_k = new_param.sub(&param);
        let y_k = new_grad.sub(&prev_grad);

        // Curvature condition failure drops the whole history rather than skipping this
        // pair, matching "pseudo-iteration counter returns to 0".
        if s_k.dot(&y_k) > F::zero() {
            if self.s.len() >= self.m {
                self.s.pop_front();
                self.y.pop_front();
            }
            self.s.push_back(s_k);
            self.y.push_back(y_k);
        } else {
            self.s.clear();
            self.y.clear();
        }

        Ok((
            state
                .param(new_param)
                .cost(new_cost)
                .gradient(new_grad),
            None,
        ))
    }

    fn terminate(&mut self, state: &IterState<P, P, (), (), F>) -> TerminationReason {
        if let Some(grad) = state.get_gradient() {
            if grad.l2_norm() <= self.tol_grad {
                return TerminationReason::TargetPrecisionReached;
            }
        }
        if (state.get_prev_cost() - state.get_cost()).abs() <= self.tol_cost {
            return TerminationReason::NoChangeInCost;
        }
        TerminationReason::NotTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::linesearch::condition::ArmijoCondition;
    use crate::solver::linesearch::BacktrackingLineSearch;
    use crate::test_trait_impl;
    use ndarray::array;

    type TestLineSearch = BacktrackingLineSearch<Vec<f64>, Vec<f64>, ArmijoCondition<f64>, f64>;

    test_trait_impl!(lbfgs, LBFGS<TestLineSearch, Vec<f64>, f64>);

    #[test]
    fn test_tolerances() {
        let linesearch: TestLineSearch = BacktrackingLineSearch::new(ArmijoCondition::new(1e-4).unwrap());

        let tol1 = 1e-4;
        let tol2 = 1e-2;

        let lbfgs: LBFGS<TestLineSearch, Vec<f64>, f64> = LBFGS::new(linesearch, 7)
            .with_tol_grad(tol1)
            .with_tol_cost(tol2);

        assert!((lbfgs.tol_grad - tol1).abs() < std::f64::EPSILON);
        assert!((lbfgs.tol_cost - tol2).abs() < std::f64::EPSILON);
    }

    #[test]
    fn curvature_failure_resets_history() {
        let linesearch: TestLineSearch = BacktrackingLineSearch::new(ArmijoCondition::new(1e-4).unwrap());
        let mut lbfgs: LBFGS<TestLineSearch, Vec<f64>, f64> = LBFGS::new(linesearch, 5);
        lbfgs.s.push_back(vec![1.0, 0.0]);
        lbfgs.y.push_back(vec![1.0, 0.0]);
        assert_eq!(lbfgs.s.len(), 1);

        // A non-positive sᵀy must drop the whole history, not just skip this pair.
        let s_k = vec![1.0, 0.0];
        let y_k = vec![-1.0, 0.0];
        if s_k.dot(&y_k) > 0.0 {
            lbfgs.s.push_back(s_k);
            lbfgs.y.push_back(y_k);
        } else {
            lbfgs.s.clear();
            lbfgs.y.clear();
        }
        assert!(lbfgs.s.is_empty());
        assert!(lbfgs.y.is_empty());
    }

    #[test]
    fn history_capped_at_m() {
        let linesearch: TestLineSearch = BacktrackingLineSearch::new(ArmijoCondition::new(1e-4).unwrap());
        let mut lbfgs: LBFGS<TestLineSearch, Vec<f64>, f64> = LBFGS::new(linesearch, 2);
        for i in 0..5 {
            if lbfgs.s.len() >= lbfgs.m {
                lbfgs.s.pop_front();
                lbfgs.y.pop_front();
            }
            lbfgs.s.push_back(vec![i as f64]);
            lbfgs.y.push_back(vec![1.0]);
        }
        assert_eq!(lbfgs.s.len(), 2);
        assert_eq!(lbfgs.s.back().unwrap()[0], 4.0);
    }

    #[test]
    fn scale_inv_h0_gamma_matches_rayleigh_quotient() {
        let sk = array![2.0_f64, 0.0];
        let yk = array![1.0_f64, 0.0];
        let gamma = sk.dot(&yk) / yk.dot(&yk);
        assert!((gamma - 2.0).abs() < 1e-12);
    }

    #[test]
    fn two_loop_direction_matches_newton_on_full_memory_quadratic() {
        // f(x) = ½xᵀAx, A = diag(4, 1). Curvature pairs taken exactly along the
        // coordinate axes are exact secant pairs for a diagonal quadratic (y = As), so
        // with m = n = 2 the history has full memory and the two-loop recursion should
        // recover the exact Newton direction -A⁻¹g, independent of the γ-scaled initial
        // guess (verified below by reproducing the recursion directly over the stored
        // history, exactly as `next_iter` computes it).
        let linesearch: TestLineSearch =
            BacktrackingLineSearch::new(ArmijoCondition::new(1e-4).unwrap());
        let mut lbfgs: LBFGS<TestLineSearch, Vec<f64>, f64> = LBFGS::new(linesearch, 2);
        lbfgs.s.push_back(vec![1.0, 0.0]);
        lbfgs.y.push_back(vec![4.0, 0.0]);
        lbfgs.s.push_back(vec![0.0, 1.0]);
        lbfgs.y.push_back(vec![0.0, 1.0]);

        let g = vec![3.0_f64, -2.0];

        let n = lbfgs.s.len();
        let mut alpha = vec![0.0_f64; n];
        let mut rho = vec![0.0_f64; n];
        let mut q = g.clone();
        for (i, (sk, yk)) in lbfgs.s.iter().rev().zip(lbfgs.y.iter().rev()).enumerate() {
            let idx = n - i - 1;
            rho[idx] = 1.0 / yk.dot(sk);
            alpha[idx] = rho[idx] * sk.dot(&q);
            q = q.sub(&yk.mul(&alpha[idx]));
        }

        let sk = lbfgs.s.back().unwrap();
        let yk = lbfgs.y.back().unwrap();
        let gamma = sk.dot(yk) / yk.dot(yk);
        let mut r = q.mul(&gamma);

        for (i, (sk, yk)) in lbfgs.s.iter().zip(lbfgs.y.iter()).enumerate() {
            let beta = rho[i] * yk.dot(&r);
            r = r.add(&sk.mul(&(alpha[i] - beta)));
        }
        let direction = r.mul(&-1.0_f64);

        let newton_direction = [-0.75_f64, 2.0];
        assert!((direction[0] - newton_direction[0]).abs() < 1e-12);
        assert!((direction[1] - newton_direction[1]).abs() < 1e-12);
    }
}
