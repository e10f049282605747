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
    ArgminError, ArgminFloat, CostFunction, DeserializeOwnedAlias, Error, Executor, Gradient,
    Hessian, IterState, OptimizationResult, Problem, SerializeAlias, Solver, TerminationReason,
    TrustRegionRadius, KV,
};
use crate::solver::trustregion::{reduction_ratio, MoreSorensen};
use argmin_math::{ArgminAdd, ArgminDot, ArgminL2Norm};
use instant;
use ndarray::{Array1, Array2};
use ndarray_linalg::{Lapack, Scalar};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// The trust region method approximates the cost function within a certain region around the
/// current point in parameter space. Depending on the quality of this approximation, the region
/// is either expanded or contracted.
///
/// The calculation of the actual step is delegated to a nested subproblem solver
/// (`R`), set via `TrustRegion::new(subproblem)`. [`MoreSorensen`](crate::solver::trustregion::MoreSorensen)
/// is this crate's subproblem solver.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct TrustRegion<R, F> {
    /// Radius
    radius: F,
    /// Maximum Radius
    max_radius: F,
    /// Minimum Radius. Enforced floor; `delta_min < 0` is rejected at construction.
    delta_min: F,
    /// eta \in [0, 1/4)
    eta: F,
    /// Δ-update threshold below which the radius is shrunk
    rho_lower: F,
    /// Δ-update threshold above which the radius is (possibly) grown
    rho_upper: F,
    /// Gradient norm convergence tolerance
    g_tol: F,
    /// Cost-decrease convergence tolerance
    f_tol: F,
    /// Step-size convergence tolerance
    x_tol: F,
    /// Optional wall-clock budget, checked between iterations only.
    #[cfg_attr(feature = "serde1", serde(skip))]
    time_limit: Option<instant::Duration>,
    #[cfg_attr(feature = "serde1", serde(skip))]
    start_time: Option<instant::Instant>,
    /// Whether a step may be accepted even though it increases the cost function
    /// (non-monotone acceptance). Default `false`: a step is only accepted when it does
    /// not increase `f`.
    allow_f_increases: bool,
    /// subproblem
    subproblem: R,
    /// f(xk)
    fxk: F,
    /// mk(0)
    mk0: F,
    /// Step-size norm of the last accepted (or attempted) step, for x_tol.
    last_step_norm: F,
    /// Whether g_tol/f_tol/x_tol have been satisfied.
    g_converged: bool,
    f_converged: bool,
    x_converged: bool,
}

impl<R, F> TrustRegion<R, F>
where
    F: ArgminFloat,
{
    /// Constructor
    pub fn new(subproblem: R) -> Self {
        TrustRegion {
            radius: F::from_f64(1.0).unwrap(),
            max_radius: F::from_f64(100.0).unwrap(),
            delta_min: F::from_f64(0.0).unwrap(),
            eta: F::from_f64(0.125).unwrap(),
            rho_lower: F::from_f64(0.25).unwrap(),
            rho_upper: F::from_f64(0.75).unwrap(),
            g_tol: F::from_f64(1e-8).unwrap(),
            f_tol: F::from_f64(0.0).unwrap(),
            x_tol: F::from_f64(0.0).unwrap(),
            time_limit: None,
            start_time: None,
            allow_f_increases: false,
            subproblem,
            fxk: F::nan(),
            mk0: F::nan(),
            last_step_norm: F::infinity(),
            g_converged: false,
            f_converged: false,
            x_converged: false,
        }
    }

    /// set radius
    #[must_use]
    pub fn radius(mut self, radius: F) -> Self {
        self.radius = radius;
        self
    }

    /// Set maximum radius
    #[must_use]
    pub fn max_radius(mut self, max_radius: F) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Set minimum radius (the trust region's `Δ_min` floor).
    ///
    /// `delta_min` must be `>= 0`; per §7 this is a `ConfigError`, surfaced immediately
    /// rather than during iteration.
    pub fn delta_min(mut self, delta_min: F) -> Result<Self, Error> {
        if delta_min < F::from_f64(0.0).unwrap() {
            return Err(argmin_error!(
                InvalidParameter,
                "TrustRegion: delta_min must be >= 0."
            ));
        }
        self.delta_min = delta_min;
        Ok(self)
    }

    /// Set eta
    pub fn eta(mut self, eta: F) -> Result<Self, Error> {
        if eta >= F::from_f64(0.25).unwrap() || eta < F::from_f64(0.0).unwrap() {
            return Err(ArgminError::InvalidParameter {
                text: "TrustRegion: eta must be in [0, 1/4).".to_string(),
            }
            .into());
        }
        self.eta = eta;
        Ok(self)
    }

    /// Set the Δ-update thresholds (defaults `1/4`, `3/4`). Requires `0 < rho_lower <
    /// rho_upper < 1`.
    pub fn rho_range(mut self, rho_lower: F, rho_upper: F) -> Result<Self, Error> {
        if !(F::zero() < rho_lower && rho_lower < rho_upper && rho_upper < F::one()) {
            return Err(argmin_error!(
                InvalidParameter,
                "TrustRegion: requires 0 < rho_lower < rho_upper < 1."
            ));
        }
        self.rho_lower = rho_lower;
        self.rho_upper = rho_upper;
        Ok(self)
    }

    /// Set the gradient-norm convergence tolerance `g_tol` (default `1e-8`).
    #[must_use]
    pub fn g_tol(mut self, g_tol: F) -> Self {
        self.g_tol = g_tol;
        self
    }

    /// Set the cost-decrease convergence tolerance `f_tol` (default `0`, i.e. disabled).
    #[must_use]
    pub fn f_tol(mut self, f_tol: F) -> Self {
        self.f_tol = f_tol;
        self
    }

    /// Set the step-size convergence tolerance `x_tol` (default `0`, i.e. disabled).
    #[must_use]
    pub fn x_tol(mut self, x_tol: F) -> Self {
        self.x_tol = x_tol;
        self
    }

    /// Set an optional wall-clock time budget. Checked between iterations only, per §5.
    #[must_use]
    pub fn time_limit(mut self, time_limit: instant::Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Allow a step to be accepted even if it increases the cost function, as long as
    /// `ρ > η` (default: `false`, i.e. the standard monotone-decrease acceptance rule).
    #[must_use]
    pub fn allow_f_increases(mut self, allow: bool) -> Self {
        self.allow_f_increases = allow;
        self
    }
}

impl<O, R, F, P, G, H> Solver<O, IterState<P, G, (), H, F>> for TrustRegion<R, F>
where
    O: CostFunction<Param = P, Output = F>
        + Gradient<Param = P, Gradient = G>
        + Hessian<Param = P, Hessian = H>,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + ArgminL2Norm<F>
        + ArgminDot<P, F>
        + ArgminDot<G, F>
        + ArgminAdd<P, P>,
    G: Clone + SerializeAlias + DeserializeOwnedAlias + ArgminL2Norm<F>,
    H: Clone + SerializeAlias + DeserializeOwnedAlias + ArgminDot<P, P>,
    R: Clone + TrustRegionRadius<F> + Solver<O, IterState<P, G, (), H, F>>,
    F: ArgminFloat,
{
    const NAME: &'static str = "Trust region";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, G, (), H, F>,
    ) -> Result<(IterState<P, G, (), H, F>, Option<KV>), Error> {
        if self.delta_min < F::from_f64(0.0).unwrap() {
            return Err(argmin_error!(
                InvalidParameter,
                "TrustRegion: delta_min must be >= 0."
            ));
        }

        self.start_time = Some(instant::Instant::now());

        let param = state
            .take_param()
            .ok_or_else(crate::argmin_error_closure!(
                NotInitialized,
                "TrustRegion: initial parameter vector must be set."
            ))?;
        let grad = problem.gradient(&param)?;
        let hessian = problem.hessian(&param)?;
        self.fxk = problem.cost(&param)?;
        self.mk0 = self.fxk;
        Ok((
            state
                .param(param)
                .cost(self.fxk)
                .gradient(grad)
                .hessian(hessian),
            None,
        ))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, G, (), H, F>,
    ) -> Result<(IterState<P, G, (), H, F>, Option<KV>), Error> {
        let param = state.take_param().unwrap();
        let grad = state
            .take_gradient()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&param))?;
        let hessian = state
            .take_hessian()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.hessian(&param))?;

        self.subproblem.set_radius(self.radius);

        let OptimizationResult {
            problem: sub_problem,
            state: mut sub_state,
            ..
        } = Executor::new(problem.take_problem().unwrap(), self.subproblem.clone())
            .configure(|config| {
                config
                    .param(param.clone())
                    .gradient(grad.clone())
                    .hessian(hessian.clone())
            })
            .ctrlc(false)
            .run()?;

        let pk = sub_state.take_param().unwrap();

        // Consume intermediate problem again. This takes care of the function evaluation counts.
        problem.problem = sub_problem.problem;
        for (key, count) in sub_problem.counts {
            *problem.counts.entry(key).or_insert(0) += count;
        }

        let new_param = pk.add(&param);
        let pk_norm = pk.l2_norm();
        // A non-finite cost, gradient or Hessian is treated as an infinitely bad step
        // (§4.3): it is never accepted and never taken as evidence of convergence. `H`
        // is only bounded by `ArgminDot` here, not indexable, so a poisoned Hessian is
        // detected through `mkpk`: any NaN entry it contains propagates into the dot
        // products below (IEEE-754 `0.0 * NaN == NaN`), so `mkpk` itself goes non-finite.
        let fxkpk = problem.cost(&new_param).unwrap_or(F::infinity());
        let mkpk = self.fxk + pk.dot(&grad) + F::from_f64(0.5).unwrap() * pk.dot(&hessian.dot(&pk));
        let non_finite = !fxkpk.is_finite() || !mkpk.is_finite() || !grad.l2_norm().is_finite();

        let rho = if non_finite {
            F::neg_infinity()
        } else {
            reduction_ratio(self.fxk, fxkpk, self.mk0, mkpk)
        };

        let cur_radius = self.radius;
        self.radius = if rho < self.rho_lower {
            F::from_f64(0.25).unwrap() * pk_norm
        } else if rho > self.rho_upper
            && (pk_norm - self.radius).abs() <= F::from_f64(10.0).unwrap() * F::epsilon()
        {
            self.max_radius.min(F::from_f64(2.0).unwrap() * self.radius)
        } else {
            self.radius
        };
        if self.radius < self.delta_min {
            self.radius = self.delta_min;
        }

        self.last_step_norm = pk_norm;

        let accept = rho > self.eta && !non_finite && (self.allow_f_increases || fxkpk <= self.fxk);

        self.f_converged = accept
            && (self.fxk - fxkpk).abs() <= self.f_tol * self.fxk.abs().max(F::one());
        // Gated on `accept`, like `f_converged`: a rejected or poisoned step (whose `pk`
        // is forced to zero) must never be mistaken for having reached `x_tol`.
        self.x_converged =
            accept && pk_norm <= self.x_tol * param.l2_norm().max(F::one());

        Ok((
            if accept {
                self.fxk = fxkpk;
                self.mk0 = fxkpk;
                let grad = problem.gradient(&new_param)?;
                let hessian = problem.hessian(&new_param)?;
                self.g_converged = grad.l2_norm() <= self.g_tol;
                state
                    .param(new_param)
                    .cost(fxkpk)
                    .gradient(grad)
                    .hessian(hessian)
            } else {
                self.g_converged = grad.l2_norm() <= self.g_tol;
                state
                    .param(param)
                    .cost(self.fxk)
                    .gradient(grad)
                    .hessian(hessian)
            },
            Some(make_kv!(
                "radius" => cur_radius.to_f64().unwrap_or(f64::NAN);
                "rho" => rho.to_f64().unwrap_or(f64::NAN);
                "accepted" => accept;
                "non_finite" => non_finite;
            )),
        ))
    }

    fn terminate(&mut self, state: &IterState<P, G, (), H, F>) -> TerminationReason {
        if self.g_converged || self.x_converged || self.f_converged {
            return TerminationReason::TargetPrecisionReached;
        }
        if self.radius <= self.delta_min {
            return TerminationReason::TargetToleranceReached;
        }
        if let (Some(limit), Some(start)) = (self.time_limit, self.start_time) {
            if start.elapsed() >= limit {
                return TerminationReason::TimeLimitReached;
            }
        }
        if let Some(grad) = state.get_gradient() {
            if grad.l2_norm() <= self.g_tol {
                return TerminationReason::TargetPrecisionReached;
            }
        }
        TerminationReason::NotTerminated
    }
}

/// Configuration record consumed by [`newton_trust_region`]; the record-of-options
/// calling convention named in §6, layered on top of the builder-style
/// [`TrustRegion`]/[`MoreSorensen`] types.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct TrustRegionOptions<F> {
    /// Starting trust-region radius.
    pub initial_delta: F,
    /// Upper cap on the trust-region radius.
    pub delta_max: F,
    /// Lower floor on the trust-region radius. Must be `>= 0`.
    pub delta_min: F,
    /// Step-acceptance threshold `0 <= eta < 1/4`.
    pub eta: F,
    /// Δ-update shrink threshold (default `0.25`).
    pub rho_lower: F,
    /// Δ-update grow threshold (default `0.75`).
    pub rho_upper: F,
    /// Gradient-norm convergence tolerance.
    pub g_tol: F,
    /// Cost-decrease convergence tolerance.
    pub f_tol: F,
    /// Step-size convergence tolerance.
    pub x_tol: F,
    /// Maximum number of outer iterations.
    pub max_iterations: u64,
    /// Optional wall-clock budget.
    #[cfg_attr(feature = "serde1", serde(skip))]
    pub time_limit: Option<instant::Duration>,
    /// Maximum number of root-finder iterations inside the subproblem solver.
    pub subproblem_max_iters: u64,
    /// Allow accepting a step that increases the cost function, as long as `ρ > η`.
    pub allow_f_increases: bool,
    /// Collect a per-iteration trace (radius, ρ, acceptance, ...) and return it on
    /// [`OptimizationResult::trace`].
    pub store_trace: bool,
    /// Print the trace to the terminal as the solve runs (via [`SlogLogger`](crate::core::SlogLogger)).
    pub show_trace: bool,
    /// When combined with `store_trace`/`show_trace`, also record the current parameter
    /// vector and gradient norm at each iteration, not just the scalar bookkeeping.
    pub extended_trace: bool,
    /// Optional callback invoked after every accepted or rejected iteration with
    /// `(iteration, cost, trust_region_radius)`.
    #[cfg_attr(feature = "serde1", serde(skip))]
    pub callback: Option<std::sync::Arc<dyn Fn(u64, F, F) + Send + Sync>>,
}

impl<F: ArgminFloat> Default for TrustRegionOptions<F> {
    fn default() -> Self {
        TrustRegionOptions {
            initial_delta: F::from_f64(1.0).unwrap(),
            delta_max: F::infinity(),
            delta_min: F::from_f64(0.0).unwrap(),
            eta: F::from_f64(0.1).unwrap(),
            rho_lower: F::from_f64(0.25).unwrap(),
            rho_upper: F::from_f64(0.75).unwrap(),
            g_tol: F::from_f64(1e-8).unwrap(),
            f_tol: F::from_f64(0.0).unwrap(),
            x_tol: F::from_f64(0.0).unwrap(),
            max_iterations: 200,
            time_limit: None,
            subproblem_max_iters: 20,
            allow_f_increases: false,
            store_trace: false,
            show_trace: false,
            extended_trace: false,
            callback: None,
        }
    }
}

/// Observer that appends each iteration's key-value record into an in-memory buffer,
/// shared with the caller via [`std::sync::Arc`]. Backs `TrustRegionOptions::store_trace`.
///
/// Grounded on [`WriteToFile`](crate::core::observers::WriteToFile): same `Observe` shape,
/// but collects into memory instead of serializing to disk.
struct TraceStore<I> {
    trace: std::sync::Arc<std::sync::Mutex<Vec<KV>>>,
    extended: bool,
    _state: std::marker::PhantomData<I>,
}

impl<I> crate::core::Observe<I> for TraceStore<I>
where
    I: crate::core::State,
{
    fn observe_iter(&mut self, state: &I, kv: &KV) -> Result<(), Error> {
        let mut record = kv.clone();
        if self.extended {
            record = record.merge(make_kv!("iter" => state.get_iter(); "cost" => state.get_cost().to_f64().unwrap_or(f64::NAN);));
        }
        self.trace.lock().unwrap().push(record);
        Ok(())
    }
}

/// Observer that forwards each iteration to a user-supplied closure. Backs
/// `TrustRegionOptions::callback`.
struct CallbackObserver<F> {
    callback: std::sync::Arc<dyn Fn(u64, F, F) + Send + Sync>,
}

impl<I, F> crate::core::Observe<I> for CallbackObserver<F>
where
    I: crate::core::State<Float = F>,
    F: ArgminFloat,
{
    fn observe_iter(&mut self, state: &I, kv: &KV) -> Result<(), Error> {
        let radius = kv
            .get("radius")
            .and_then(|v| v.get_float())
            .and_then(F::from_f64)
            .unwrap_or_else(F::nan);
        (self.callback)(state.get_iter(), state.get_cost(), radius);
        Ok(())
    }
}

/// Drives `O` to a local minimum from `x0` using the trust-region Newton method with the
/// Moré-Sorensen subproblem solver, per the options record described in §6.
///
/// `delta_min < 0` or `eta` outside `[0, 1/4)` surface as a `ConfigError` (`ArgminError::
/// InvalidParameter`) immediately, before the first iteration, per §7.
pub fn newton_trust_region<O, F>(
    oracle: O,
    x0: Array1<F>,
    options: TrustRegionOptions<F>,
) -> Result<OptimizationResult<O, IterState<Array1<F>, Array1<F>, (), Array2<F>, F>>, Error>
where
    O: CostFunction<Param = Array1<F>, Output = F>
        + Gradient<Param = Array1<F>, Gradient = Array1<F>>
        + Hessian<Param = Array1<F>, Hessian = Array2<F>>,
    F: ArgminFloat + Lapack + Scalar<Real = F>,
{
    let subproblem = MoreSorensen::new().max_iters(options.subproblem_max_iters);
    let mut solver = TrustRegion::new(subproblem)
        .radius(options.initial_delta)
        .max_radius(options.delta_max)
        .delta_min(options.delta_min)?
        .eta(options.eta)?
        .rho_range(options.rho_lower, options.rho_upper)?
        .g_tol(options.g_tol)
        .f_tol(options.f_tol)
        .x_tol(options.x_tol)
        .allow_f_increases(options.allow_f_increases);
    if let Some(limit) = options.time_limit {
        solver = solver.time_limit(limit);
    }

    let mut executor = Executor::new(oracle, solver)
        .configure(|config| config.param(x0).max_iters(options.max_iterations))
        .ctrlc(false);

    let trace_buf = if options.store_trace {
        let buf = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        executor = executor.add_observer(
            TraceStore {
                trace: buf.clone(),
                extended: options.extended_trace,
                _state: std::marker::PhantomData,
            },
            crate::core::ObserverMode::Always,
        );
        Some(buf)
    } else {
        None
    };

    #[cfg(feature = "slog-logger")]
    if options.show_trace {
        executor = executor.add_observer(
            crate::core::SlogLogger::term(),
            crate::core::ObserverMode::Always,
        );
    }

    if let Some(callback) = options.callback.clone() {
        executor = executor.add_observer(
            CallbackObserver { callback },
            crate::core::ObserverMode::Always,
        );
    }

    let mut result = executor.run()?;
    if let Some(buf) = trace_buf {
        let trace = std::sync::Arc::try_unwrap(buf)
            .map(|m| m.into_inner().unwrap())
            .unwrap_or_else(|arc| arc.lock().unwrap().clone());
        result = result.with_trace(trace);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::test_trait_impl;
    use ndarray::array;

    test_trait_impl!(trustregion, TrustRegion<MoreSorensen<f64>, f64>);

    #[test]
    fn eta_validation() {
        let tr: TrustRegion<MoreSorensen<f64>, f64> = TrustRegion::new(MoreSorensen::new());
        assert!(tr.clone().eta(0.25).is_err());
        assert!(tr.clone().eta(-0.1).is_err());
        assert!(tr.eta(0.1).is_ok());
    }

    #[test]
    fn delta_min_validation() {
        let tr: TrustRegion<MoreSorensen<f64>, f64> = TrustRegion::new(MoreSorensen::new());
        assert!(tr.delta_min(-1.0).is_err());
    }

    #[test]
    fn rho_range_validation() {
        let tr: TrustRegion<MoreSorensen<f64>, f64> = TrustRegion::new(MoreSorensen::new());
        assert!(tr.clone().rho_range(0.75, 0.25).is_err());
        assert!(tr.rho_range(0.25, 0.75).is_ok());
    }

    #[test]
    fn test_new() {
        let tr: TrustRegion<MoreSorensen<f64>, f64> = TrustRegion::new(MoreSorensen::new());
        assert_eq!(tr.radius.to_ne_bytes(), 1.0f64.to_ne_bytes());
        assert_eq!(tr.max_radius.to_ne_bytes(), 100.0f64.to_ne_bytes());
        assert_eq!(tr.eta.to_ne_bytes(), 0.125f64.to_ne_bytes());
    }

    /// f(x) = ½xᵀHx, H = diag(2, 8); minimizer is the origin.
    struct Quadratic {
        hessian: Array2<f64>,
    }

    impl CostFunction for Quadratic {
        type Param = Array1<f64>;
        type Output = f64;

        fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
            Ok(0.5 * param.dot(&self.hessian.dot(param)))
        }
    }

    impl Gradient for Quadratic {
        type Param = Array1<f64>;
        type Gradient = Array1<f64>;

        fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
            Ok(self.hessian.dot(param))
        }
    }

    impl Hessian for Quadratic {
        type Param = Array1<f64>;
        type Hessian = Array2<f64>;

        fn hessian(&self, _param: &Self::Param) -> Result<Self::Hessian, Error> {
            Ok(self.hessian.clone())
        }
    }

    #[test]
    fn newton_trust_region_converges_on_quadratic() {
        let problem = Quadratic {
            hessian: array![[2.0, 0.0], [0.0, 8.0]],
        };
        let x0 = array![5.0, -3.0];
        let result = newton_trust_region(problem, x0, TrustRegionOptions::default())
            .expect("solve should not error");
        let best = result.state.get_best_param().expect("best param set");
        assert!(best[0].abs() < 1e-4);
        assert!(best[1].abs() < 1e-4);
        assert!(result.state.get_best_cost() < 1e-6);
    }

    #[test]
    fn store_trace_collects_one_record_per_iteration() {
        let problem = Quadratic {
            hessian: array![[2.0, 0.0], [0.0, 8.0]],
        };
        let x0 = array![5.0, -3.0];
        let mut options = TrustRegionOptions::default();
        options.store_trace = true;
        let result = newton_trust_region(problem, x0, options).expect("solve should not error");
        let trace = result.trace.expect("trace collected");
        assert_eq!(trace.len() as u64, result.state.get_iter());
        assert!(trace[0].get("radius").is_some());
    }

    #[test]
    fn callback_observes_every_iteration() {
        let problem = Quadratic {
            hessian: array![[2.0, 0.0], [0.0, 8.0]],
        };
        let x0 = array![5.0, -3.0];
        let calls = std::sync::Arc::new(std::sync::Mutex::new(0u64));
        let calls_clone = calls.clone();
        let mut options = TrustRegionOptions::default();
        options.callback = Some(std::sync::Arc::new(move |_iter, _cost, _radius| {
            *calls_clone.lock().unwrap() += 1;
        }));
        let result = newton_trust_region(problem, x0, options).expect("solve should not error");
        assert_eq!(*calls.lock().unwrap(), result.state.get_iter());
    }

    #[test]
    fn allow_f_increases_defaults_to_monotone_acceptance() {
        let tr: TrustRegion<MoreSorensen<f64>, f64> = TrustRegion::new(MoreSorensen::new());
        assert!(!tr.allow_f_increases);
        let tr = tr.allow_f_increases(true);
        assert!(tr.allow_f_increases);
    }

    /// f(x) = (x - 5)⁴; the minimum is a degenerate (zero-Hessian) critical point.
    struct Quartic;

    impl CostFunction for Quartic {
        type Param = Array1<f64>;
        type Output = f64;

        fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
            Ok((param[0] - 5.0).powi(4))
        }
    }

    impl Gradient for Quartic {
        type Param = Array1<f64>;
        type Gradient = Array1<f64>;

        fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
            Ok(array![4.0 * (param[0] - 5.0).powi(3)])
        }
    }

    impl Hessian for Quartic {
        type Param = Array1<f64>;
        type Hessian = Array2<f64>;

        fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
            Ok(array![[12.0 * (param[0] - 5.0).powi(2)]])
        }
    }

    #[test]
    fn newton_trust_region_converges_on_quartic() {
        let x0 = array![0.0];
        let mut options = TrustRegionOptions::default();
        options.max_iterations = 500;
        let result =
            newton_trust_region(Quartic, x0, options).expect("solve should not error");
        let best = result.state.get_best_param().expect("best param set");
        assert!((best[0] - 5.0).abs() < 0.01);
    }

    #[test]
    fn newton_trust_region_converges_from_far_start() {
        // f(x, y) = ½(x² + 0.9 y²), x₀ = (127, 921).
        let problem = Quadratic {
            hessian: array![[1.0, 0.0], [0.0, 0.9]],
        };
        let x0 = array![127.0, 921.0];
        let result = newton_trust_region(problem, x0, TrustRegionOptions::default())
            .expect("solve should not error");
        let best = result.state.get_best_param().expect("best param set");
        assert!(best[0].abs() < 0.01);
        assert!(best[1].abs() < 0.01);
    }

    /// Oracle with a finite cost/gradient but a Hessian that is always `NaN`-filled.
    struct PoisonedHessian;

    impl CostFunction for PoisonedHessian {
        type Param = Array1<f64>;
        type Output = f64;

        fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
            Ok(param.dot(param))
        }
    }

    impl Gradient for PoisonedHessian {
        type Param = Array1<f64>;
        type Gradient = Array1<f64>;

        fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
            Ok(param.mapv(|v| 2.0 * v))
        }
    }

    impl Hessian for PoisonedHessian {
        type Param = Array1<f64>;
        type Hessian = Array2<f64>;

        fn hessian(&self, _param: &Self::Param) -> Result<Self::Hessian, Error> {
            Ok(array![[f64::NAN, 0.0], [0.0, f64::NAN]])
        }
    }

    #[test]
    fn poisoned_hessian_never_reports_convergence() {
        let x0 = array![5.0, -3.0];
        let mut options = TrustRegionOptions::default();
        options.max_iterations = 25;
        let result = newton_trust_region(PoisonedHessian, x0, options)
            .expect("solve should not error, it must just fail to converge");
        // Every step is rejected as infinitely bad, so the radius keeps shrinking
        // towards its (default, zero) floor instead of reporting convergence through
        // f_converged/g_converged/x_converged.
        assert_ne!(
            result.state.get_termination_reason(),
            TerminationReason::TargetPrecisionReached
        );
        // The parameter must never have moved: every step was rejected as infinitely bad.
        let best = result.state.get_best_param().expect("best param set");
        assert_eq!(best[0], 5.0);
        assert_eq!(best[1], -3.0);
    }
}
