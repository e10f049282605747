// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Dense linear-algebra primitives consumed by the trust-region subproblem solver.
//!
//! These are thin wrappers around `ndarray-linalg` (backed by LAPACK). Each wrapper
//! checks its input for non-finite entries up front and short-circuits to an all-`NaN`
//! (or `None`) output rather than handing poisoned data to LAPACK, whose behavior on
//! NaN/Inf input is backend-defined rather than "propagate to output".

use ndarray::{Array1, Array2};
use ndarray_linalg::{Cholesky, Diag, Eigh, Lapack, Scalar, SolveTriangular, UPLO};

fn has_non_finite<F: Scalar<Real = F> + num_traits::Float>(a: &Array2<F>) -> bool {
    a.iter().any(|v| !v.is_finite())
}

/// Symmetric eigendecomposition `H = Q diag(λ) Qᵀ`.
///
/// `H` is symmetrized (`½(H + Hᵀ)`) before decomposing, since the solver is only
/// required to assume symmetry, not enforce it on the caller's behalf beforehand.
/// Returns eigenvalues in ascending order and an orthonormal `Q`. If `H` contains a
/// non-finite entry, or the underlying LAPACK call fails to converge, both outputs are
/// filled with `NaN` rather than raising.
pub fn eigh<F>(h: &Array2<F>) -> (Array1<F>, Array2<F>)
where
    F: Scalar<Real = F> + Lapack + num_traits::Float,
{
    let n = h.nrows();
    if has_non_finite(h) {
        return (Array1::from_elem(n, F::nan()), Array2::from_elem((n, n), F::nan()));
    }
    let half = F::from(0.5).unwrap();
    let sym = (h + &h.t()).mapv(|v| v * half);
    match sym.eigh(UPLO::Lower) {
        Ok((vals, vecs)) => (vals, vecs),
        Err(_) => (Array1::from_elem(n, F::nan()), Array2::from_elem((n, n), F::nan())),
    }
}

/// Cholesky factorization `A = L Lᵀ`.
///
/// Returns `None` ("not positive definite") instead of raising, both when LAPACK
/// reports the matrix is not positive definite and when `A` contains a non-finite
/// entry.
pub fn cholesky<F>(a: &Array2<F>) -> Option<Array2<F>>
where
    F: Scalar<Real = F> + Lapack + num_traits::Float,
{
    if has_non_finite(a) {
        return None;
    }
    a.cholesky(UPLO::Lower).ok()
}

/// Solve `L x = b` for lower-triangular `L`.
///
/// Propagates non-finite input to a non-finite (`NaN`-filled) output rather than
/// raising.
pub fn triangular_solve<F>(l: &Array2<F>, b: &Array1<F>) -> Array1<F>
where
    F: Scalar<Real = F> + Lapack + num_traits::Float,
{
    let n = b.len();
    if has_non_finite(l) || b.iter().any(|v| !v.is_finite()) {
        return Array1::from_elem(n, F::nan());
    }
    l.solve_triangular(UPLO::Lower, Diag::NonUnit, b)
        .unwrap_or_else(|_| Array1::from_elem(n, F::nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn eigh_diagonal() {
        let h = array![[2.0_f64, 0.0], [0.0, 5.0]];
        let (vals, _q) = eigh(&h);
        assert!((vals[0] - 2.0).abs() < 1e-10);
        assert!((vals[1] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn eigh_non_finite_propagates() {
        let h = array![[f64::NAN, 0.0], [0.0, 1.0]];
        let (vals, q) = eigh(&h);
        assert!(vals.iter().all(|v| v.is_nan()));
        assert!(q.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        let h = array![[1.0_f64, 2.0], [2.0, 1.0]];
        assert!(cholesky(&h).is_none());
    }

    #[test]
    fn cholesky_accepts_pd() {
        let h = array![[4.0_f64, 0.0], [0.0, 9.0]];
        let l = cholesky(&h).expect("positive definite");
        assert!((l[[0, 0]] - 2.0).abs() < 1e-10);
        assert!((l[[1, 1]] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn triangular_solve_identity() {
        let l = array![[1.0_f64, 0.0], [0.0, 1.0]];
        let b = array![3.0_f64, 4.0];
        let x = triangular_solve(&l, &b);
        assert!((x[0] - 3.0).abs() < 1e-10);
        assert!((x[1] - 4.0).abs() < 1e-10);
    }
}
