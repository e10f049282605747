// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! argmin-trust-region is a focused numerical optimization crate written entirely in Rust.
//!
//! Its goal is to solve the trust-region Newton subproblem (the Moré-Sorensen formulation) and to
//! provide an L-BFGS direction computation and a trust-region outer loop built on top of it. It is
//! type-agnostic by design for the problem definition, but the trust-region subproblem itself
//! relies on a concrete dense `ndarray`-backed symmetric eigendecomposition and Cholesky
//! factorization.
//!
//! Observers allow one to track the progress of iterations, either by using one of the provided
//! ones for logging to screen or disk or by implementing your own.
//!
//! An optional checkpointing mechanism helps to mitigate the negative effects of crashes in
//! unstable computing environments.
//!
//! Due to Rusts powerful generics and traits, most features can be exchanged by your own tailored
//! implementations.
//!
//! # Highlights
//!
//! * [Checkpointing](`crate::core::checkpointing`)
//! * [Observers](`crate::core::observers`)
//!
//! # Algorithms
//!
//! - [Line searches](`crate::solver::linesearch`)
//!   - [Backtracking line search](`crate::solver::linesearch::BacktrackingLineSearch`)
//!
//! - [Trust region subproblem and outer loop](`crate::solver::trustregion`)
//!
//! - [Quasi-Newton methods](`crate::solver::quasinewton`)
//!   - [L-BFGS](`crate::solver::quasinewton::LBFGS`)
//!
//! - [Dense linear algebra primitives](`crate::linalg`)
//!
//! # License
//!
//! Licensed under either of
//!
//!   * Apache License, Version 2.0,
//!     ([LICENSE-APACHE](https://github.com/argmin-rs/argmin/blob/main/LICENSE-APACHE) or
//!     <http://www.apache.org/licenses/LICENSE-2.0>)
//!   * MIT License ([LICENSE-MIT](https://github.com/argmin-rs/argmin/blob/main/LICENSE-MIT) or
//!     <http://opensource.org/licenses/MIT>)
//!
//! at your option.
//!
//! ## Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion
//! in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above,
//! without any additional terms or conditions.

#![warn(missing_docs)]
#![allow(unused_attributes)]
// Explicitly disallow EQ comparison of floats. (This clippy lint is denied by default; however,
// this is just to make sure that it will always stay this way.)
#![deny(clippy::float_cmp)]

#[macro_use]
pub mod core;

/// Dense linear algebra primitives (eigendecomposition, Cholesky, triangular solves)
pub mod linalg;

/// Solvers
pub mod solver;
