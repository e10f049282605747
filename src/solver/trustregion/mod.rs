// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Trust region methods
//!
//! * [Moré-Sorensen subproblem solver](moresorensen/struct.MoreSorensen.html)
//! * [Trust region outer loop](trustregion_method/struct.TrustRegion.html)

/// Moré-Sorensen trust-region subproblem solver
pub mod moresorensen;
/// Trust region outer loop
pub mod trustregion_method;

pub use self::moresorensen::*;
pub use self::trustregion_method::*;

/// Capability a trust-region subproblem solver exposes so the outer loop can push the
/// current trust-region radius into it before each nested solve.
pub trait TrustRegionRadius<F> {
    /// Set the trust-region radius to be used by the next call to the subproblem solver.
    fn set_radius(&mut self, radius: F);
}

/// Computes the reduction ratio `ρ = (f(xₖ) − f(xₖ + pₖ)) / (mₖ(0) − mₖ(pₖ))` used to
/// accept/reject a trust-region step and to adjust the radius.
pub fn reduction_ratio<F: crate::core::ArgminFloat>(fxk: F, fxkpk: F, mk0: F, mkpk: F) -> F {
    (fxk - fxkpk) / (mk0 - mkpk)
}
