// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Reasons for optimization algorithms to stop
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// The optimization algorithm is not terminated
    NotTerminated,
    /// Reached maximum number of iterations
    MaxItersReached,
    /// Reached target cost function value
    TargetCostReached,
    /// Reached target precision
    TargetPrecisionReached,
    /// No change in cost function value
    NoChangeInCost,
    /// Condition for line search met
    LineSearchConditionMet,
    /// The line search was unable to find a step satisfying its conditions
    LineSearchFailed,
    /// Reached target tolerance
    TargetToleranceReached,
    /// A wall-clock time budget was exhausted
    TimeLimitReached,
    /// A non-finite value (NaN or infinite) was encountered where a finite
    /// one was required
    NonFiniteValueEncountered,
    /// The trust-region subproblem detected the hard case and returned the
    /// minimum-norm hard-case solution
    HardCaseDetected,
    /// Algorithm manually interrupted with Ctrl+C
    KeyboardInterrupt,
    /// Algorithm aborted
    Aborted,
}

impl TerminationReason {
    /// Returns `true` if a solver terminated and `false` otherwise.
    pub fn terminated(self) -> bool {
        !matches!(self, TerminationReason::NotTerminated)
    }

    /// Returns a textual representation of what happened.
    pub fn text(&self) -> &str {
        match *self {
            TerminationReason::NotTerminated => "Not terminated",
            TerminationReason::MaxItersReached => "Maximum number of iterations reached",
            TerminationReason::TargetCostReached => "Target cost value reached",
            TerminationReason::TargetPrecisionReached => "Target precision reached",
            TerminationReason::NoChangeInCost => "No change in cost function value",
            TerminationReason::LineSearchConditionMet => "Line search condition met",
            TerminationReason::LineSearchFailed => "Line search failed to find an acceptable step",
            TerminationReason::TargetToleranceReached => "Target tolerance reached",
            TerminationReason::TimeLimitReached => "Time limit reached",
            TerminationReason::NonFiniteValueEncountered => "Non-finite value encountered",
            TerminationReason::HardCaseDetected => "Hard case detected in trust-region subproblem",
            TerminationReason::KeyboardInterrupt => "Keyboard interrupt",
            TerminationReason::Aborted => "Optimization aborted",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl Default for TerminationReason {
    fn default() -> Self {
        TerminationReason::NotTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(termination_reason, TerminationReason);

    #[test]
    fn terminated_matches_variant() {
        assert!(TerminationReason::MaxItersReached.terminated());
        assert!(TerminationReason::HardCaseDetected.terminated());
        assert!(!TerminationReason::NotTerminated.terminated());
    }
}
