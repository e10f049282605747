// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Errors

use thiserror::Error;

/// Error type raised by the trust-region/L-BFGS core.
///
/// Hard errors abort a call immediately (they indicate a caller mistake or an
/// un-usable problem, not a numerical difficulty the solver itself can work
/// around). Numerical difficulties that the outer loop can recover from
/// (`NonFiniteValue`, `IterationLimit`, `TimeLimit`, `LineSearchFailure`) are
/// not raised here; they are carried in `TerminationReason` instead.
#[derive(Debug, Error)]
pub enum ArgminError {
    /// A solver was configured with an invalid or inconsistent option.
    #[error("Invalid parameter: {text:?}")]
    InvalidParameter {
        /// Text
        text: String,
    },

    /// Input shapes (gradient / Hessian / history vectors) are inconsistent.
    #[error("Dimension mismatch: {text:?}")]
    DimensionMismatch {
        /// Text
        text: String,
    },

    /// Indicates that a function is not implemented
    #[error("Not implemented: {text:?}")]
    NotImplemented {
        /// Text
        text: String,
    },

    /// Indicates that a function is not initialized
    #[error("Not initialized: {text:?}")]
    NotInitialized {
        /// Text
        text: String,
    },

    /// Indicates that a condition is violated
    #[error("Condition violated: {text:?}")]
    ConditionViolated {
        /// Text
        text: String,
    },

    /// Checkpoint was not found
    #[error("Checkpoint not found: {text:?}")]
    CheckpointNotFound {
        /// Text
        text: String,
    },

    /// The linear-algebra backend failed (e.g. a symmetric eigendecomposition
    /// did not converge).
    #[error("Linear algebra backend failure: {text:?}")]
    LinalgFailure {
        /// Text
        text: String,
    },

    /// Indicates an impossible error
    #[error("Impossible Error: {text:?}")]
    ImpossibleError {
        /// Text
        text: String,
    },
}
