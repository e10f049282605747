// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # `OptimizationResult`
//!
//! Returned by `Executor::run`. Consists of the problem (with its evaluation counts) and the
//! last `IterState` of the solver. Both can be accessed via the `problem()` and `state()`
//! methods.
//!
//! The reference to the struct returned by `state()` allows one to, for instance, access the
//! final parameter vector or the final cost function value.
//!
//! More details can be found in the `IterState` documentation.

use crate::core::{Problem, State, KV};

/// Final struct returned by the `run` method of `Executor`.
#[derive(Clone)]
pub struct OptimizationResult<O, I> {
    /// The problem, wrapped in `Problem` (carries the evaluation counts).
    pub problem: Problem<O>,
    /// The iteration state of the solver at termination.
    pub state: I,
    /// Per-iteration trace, populated only when the driver was asked to collect one (e.g.
    /// `TrustRegionOptions::store_trace`). `None` otherwise.
    pub trace: Option<Vec<KV>>,
}

impl<O, I: State> OptimizationResult<O, I> {
    /// Constructor
    pub fn new(problem: Problem<O>, state: I) -> Self {
        OptimizationResult {
            problem,
            state,
            trace: None,
        }
    }

    /// Attach a collected per-iteration trace.
    #[must_use]
    pub fn with_trace(mut self, trace: Vec<KV>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Return a handle to the problem
    pub fn problem(&self) -> &Problem<O> {
        &self.problem
    }

    /// Return a handle to the state
    pub fn state(&self) -> &I {
        &self.state
    }
}

impl<O, I> std::fmt::Display for OptimizationResult<O, I>
where
    I: State + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "OptimizationResult:")?;
        writeln!(f, "    iters (total): {}", self.state.get_iter())?;
        writeln!(
            f,
            "    termination: {}",
            self.state.get_termination_reason()
        )?;
        writeln!(f, "    time:        {:?}", self.state.get_time())?;
        Ok(())
    }
}
