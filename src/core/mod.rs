// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Core toolbox
//!
//! This module contains the traits and types necessary for implementing the trust-region
//! subproblem solver, L-BFGS and the trust-region outer loop, and tools for observing the state
//! of optimization runs and checkpointing.

/// Macros
#[macro_use]
pub mod macros;
/// Checkpointing
#[cfg(feature = "serde1")]
pub mod checkpointing;
/// Error handling
mod errors;
/// Executor
mod executor;
/// Trait alias for float types
mod float;
/// Key value datastructure
mod kv;
/// Fake problems used in tests
mod nooperator;
/// Observers
mod observers;
/// Traits and structs for defining and handling optimization problems
mod problem;
/// Definition of the return type of the solvers
mod result;
/// Trait alias for `serde`s `Serialize` and `DeserializeOwned`
mod serialization;
/// `Solver` trait
mod solver;
/// iteration state
mod state;
/// Fake problems/solvers used in tests
#[cfg(test)]
pub(crate) mod test_utils;
/// Definition of termination reasons
mod termination;

pub use crate::solver::linesearch::LineSearch;
pub use crate::solver::trustregion::TrustRegionRadius;
pub use anyhow::Error;
pub use errors::ArgminError;
pub use executor::Executor;
pub use float::ArgminFloat;
pub use kv::KV;
pub use nooperator::{MinimalNoOperator, NoOperator};
pub use observers::*;
pub use problem::{CostFunction, Gradient, Hessian, Problem};
pub use result::OptimizationResult;
pub use serialization::{DeserializeOwnedAlias, SerializeAlias};
pub use solver::Solver;
pub use state::{IterState, State};
pub use termination::TerminationReason;
