// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Traits and structs for defining and handling optimization problems.
//!
//! A problem only needs to implement the capabilities a particular solver
//! actually calls: an objective that merely evaluates cost and gradient can
//! skip [`Hessian`] entirely.

use crate::core::{DeserializeOwnedAlias, Error, SerializeAlias};
use std::collections::HashMap;

/// Computes the scalar cost (objective value) at a parameter vector.
pub trait CostFunction {
    /// Type of the parameter vector
    type Param: Clone + SerializeAlias + DeserializeOwnedAlias;
    /// Type of the cost function value
    type Output: Clone + SerializeAlias + DeserializeOwnedAlias;

    /// Compute cost function
    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error>;
}

/// Computes the gradient of the objective at a parameter vector.
pub trait Gradient {
    /// Type of the parameter vector
    type Param: Clone + SerializeAlias + DeserializeOwnedAlias;
    /// Type of the gradient
    type Gradient: Clone + SerializeAlias + DeserializeOwnedAlias;

    /// Compute gradient
    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error>;
}

/// Computes the Hessian of the objective at a parameter vector.
///
/// Only exact-Newton callers need this; quasi-Newton solvers such as L-BFGS
/// build their own curvature model from gradient differences and never call
/// it.
pub trait Hessian {
    /// Type of the parameter vector
    type Param: Clone + SerializeAlias + DeserializeOwnedAlias;
    /// Type of the Hessian
    type Hessian: Clone + SerializeAlias + DeserializeOwnedAlias;

    /// Compute Hessian
    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error>;
}

/// Wraps a problem `O` and counts how many times each capability
/// (`cost`/`gradient`/`hessian`) has been invoked, so solvers and observers
/// can report evaluation counts without the problem itself tracking them.
#[derive(Clone, Debug, Default)]
pub struct Problem<O> {
    /// The wrapped problem. `None` only while temporarily taken out by an
    /// `Executor` that hands it to a nested solver.
    pub problem: Option<O>,
    /// Evaluation counts, keyed by capability name (`"cost_count"`, ...).
    pub counts: HashMap<&'static str, u64>,
}

impl<O> Problem<O> {
    /// Wrap a problem.
    pub fn new(problem: O) -> Self {
        Problem {
            problem: Some(problem),
            counts: HashMap::new(),
        }
    }

    fn increment(&mut self, key: &'static str) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Evaluate the cost function, incrementing `cost_count`.
    pub fn cost<P>(&mut self, param: &P) -> Result<O::Output, Error>
    where
        O: CostFunction<Param = P>,
    {
        self.increment("cost_count");
        self.problem
            .as_ref()
            .ok_or_else(|| {
                crate::argmin_error!(
                    NotInitialized,
                    "`Problem` does not contain a problem instance."
                )
            })?
            .cost(param)
    }

    /// Evaluate the gradient, incrementing `gradient_count`.
    pub fn gradient<P>(&mut self, param: &P) -> Result<O::Gradient, Error>
    where
        O: Gradient<Param = P>,
    {
        self.increment("gradient_count");
        self.problem
            .as_ref()
            .ok_or_else(|| {
                crate::argmin_error!(
                    NotInitialized,
                    "`Problem` does not contain a problem instance."
                )
            })?
            .gradient(param)
    }

    /// Evaluate the Hessian, incrementing `hessian_count`.
    pub fn hessian<P>(&mut self, param: &P) -> Result<O::Hessian, Error>
    where
        O: Hessian<Param = P>,
    {
        self.increment("hessian_count");
        self.problem
            .as_ref()
            .ok_or_else(|| {
                crate::argmin_error!(
                    NotInitialized,
                    "`Problem` does not contain a problem instance."
                )
            })?
            .hessian(param)
    }

    /// Take the wrapped problem out, leaving `None` behind. Used when handing
    /// the problem to a nested `Executor` (e.g. the trust-region subproblem
    /// solver) and reclaiming it afterwards.
    pub fn take_problem(&mut self) -> Option<O> {
        self.problem.take()
    }
}

