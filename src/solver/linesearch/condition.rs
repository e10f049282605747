// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Line search acceptance conditions
//!
//! A [`LineSearchCondition`] decides whether a trial step length is acceptable. A backtracking
//! line search shrinks the step length until one of these conditions is met.
//!
//! ## Available conditions
//!
//! * [Armijo condition](`ArmijoCondition`)
//! * [Wolfe conditions](`WolfeCondition`)
//!
//! ## References
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

mod armijo;
mod wolfe;

pub use self::armijo::ArmijoCondition;
pub use self::wolfe::WolfeCondition;

use crate::core::SerializeAlias;

/// Needs to be implemented by everything that wants to be a line search acceptance condition.
///
/// `T` is the type of the search direction (usually identical to the parameter vector), `G` is
/// the type of the gradient and `F` is the floating point type.
pub trait LineSearchCondition<T, G, F>: SerializeAlias {
    /// Evaluate the condition for a trial step of length `step_length`.
    ///
    /// `current_gradient` is only guaranteed to be `Some` when
    /// [`requires_current_gradient`](`LineSearchCondition::requires_current_gradient`) returns
    /// `true`.
    fn evaluate_condition(
        &self,
        current_cost: F,
        current_gradient: Option<&G>,
        initial_cost: F,
        initial_gradient: &G,
        search_direction: &T,
        step_length: F,
    ) -> bool;

    /// Indicates whether this condition requires the gradient at the trial point.
    fn requires_current_gradient(&self) -> bool;
}
