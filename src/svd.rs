//! 2×2 singular value decomposition.
//!
//! We use the classic two-sided Jacobi construction for a single 2×2 block:
//!
//! 1. a left rotation \(L\) that makes \(B = L A\) symmetric,
//! 2. a Jacobi rotation \(J\) that diagonalizes the symmetric \(B\): \(J^\top B J = D\),
//!
//! so that \(A = (L^\top J)\, D\, J^\top\). Negative diagonal entries are folded into the
//! corresponding column of \(U\), and the pair is sorted descending.
//!
//! There are no iteration counts or convergence thresholds: for a 2×2 block the two rotations
//! are exact up to rounding. Degenerate inputs (zero matrix, repeated singular values, rank one)
//! fall out of the same formulas as identity rotations or zero singular values.

use crate::matrix::Mat2;
use crate::{Error, Result};

/// Plane rotation `[[c, s], [-s, c]]`.
#[derive(Debug, Clone, Copy)]
struct Rotation {
    c: f64,
    s: f64,
}

impl Rotation {
    fn identity() -> Self {
        Self { c: 1.0, s: 0.0 }
    }

    fn to_mat(self) -> Mat2 {
        Mat2::new(self.c, self.s, -self.s, self.c)
    }
}

/// Left rotation `L = R(θ)ᵀ` such that `L · A` is symmetric.
///
/// Returned as `R(θ)` (so `L = rot.to_mat().transpose()`).
fn symmetrizing_rotation(a: &Mat2) -> Rotation {
    let t = a.get(0, 0) + a.get(1, 1);
    let d = a.get(0, 1) - a.get(1, 0);
    let r = t.hypot(d);
    if r == 0.0 {
        // a11 = -a22 and a12 = a21: already symmetric.
        return Rotation::identity();
    }
    Rotation { c: t / r, s: d / r }
}

/// Jacobi rotation `J` with `Jᵀ B J` diagonal, for symmetric `B = [[x, y], [y, z]]`.
fn jacobi_rotation(x: f64, y: f64, z: f64) -> Rotation {
    if y == 0.0 {
        return Rotation::identity();
    }
    let tau = (z - x) / (2.0 * y);
    // Smaller root of t² + 2τt - 1 = 0; |t| <= 1 keeps the rotation angle within ±π/4.
    let sign = if tau >= 0.0 { 1.0 } else { -1.0 };
    let t = sign / (tau.abs() + tau.hypot(1.0));
    let c = 1.0 / t.hypot(1.0);
    Rotation { c, s: t * c }
}

/// `A = U · Σ · Vᵗ` for one 2×2 input matrix.
///
/// `U` and `V` are orthogonal. `Σ` is diagonal, non-negative, and sorted descending.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    a: Mat2,
    u: Mat2,
    sigma: Mat2,
    v: Mat2,
}

impl Decomposition {
    /// The matrix this decomposition was computed from.
    pub fn input(&self) -> &Mat2 {
        &self.a
    }

    /// Left singular vectors (columns).
    pub fn u(&self) -> &Mat2 {
        &self.u
    }

    /// Singular values as a diagonal matrix.
    pub fn sigma(&self) -> &Mat2 {
        &self.sigma
    }

    /// Right singular vectors (columns).
    pub fn v(&self) -> &Mat2 {
        &self.v
    }

    pub fn vt(&self) -> Mat2 {
        self.v.transpose()
    }

    /// `[σ₁, σ₂]` with `σ₁ >= σ₂ >= 0`.
    pub fn singular_values(&self) -> [f64; 2] {
        [self.sigma.get(0, 0), self.sigma.get(1, 1)]
    }

    /// `U · (Σ · Vᵗ)`, the same association order the pipeline uses for its final leg.
    pub fn reconstruct(&self) -> Mat2 {
        self.u.matmul(&self.sigma.matmul(&self.vt()))
    }
}

/// Factor `a` as `U · Σ · Vᵗ`.
///
/// Any finite real matrix is accepted, including singular and negative-determinant ones.
/// Non-finite input (or a factorization that overflows) is rejected with
/// [`Error::Decomposition`]; no partial result is returned.
pub fn factorize(a: &Mat2) -> Result<Decomposition> {
    if !a.is_finite() {
        return Err(Error::Decomposition("matrix contains non-finite entries"));
    }

    let rot1 = symmetrizing_rotation(a);
    let l = rot1.to_mat().transpose();
    let b = l.matmul(a);
    // Symmetric up to rounding; average the off-diagonal pair.
    let (x, y, z) = (b.get(0, 0), 0.5 * (b.get(0, 1) + b.get(1, 0)), b.get(1, 1));

    let rot2 = jacobi_rotation(x, y, z);
    let (c, s) = (rot2.c, rot2.s);
    let mut d = [
        x * c * c - 2.0 * y * c * s + z * s * s,
        x * s * s + 2.0 * y * c * s + z * c * c,
    ];

    let j = rot2.to_mat();
    let mut u = l.transpose().matmul(&j).rows();
    let mut v = j.rows();

    for (k, dk) in d.iter_mut().enumerate() {
        if *dk < 0.0 {
            *dk = -*dk;
            u[0][k] = -u[0][k];
            u[1][k] = -u[1][k];
        }
    }

    if d[0] < d[1] {
        d.swap(0, 1);
        for row in u.iter_mut().chain(v.iter_mut()) {
            row.swap(0, 1);
        }
    }

    let out = Decomposition {
        a: *a,
        u: Mat2::from_rows(u),
        sigma: Mat2::diag(d),
        v: Mat2::from_rows(v),
    };
    if !(out.u.is_finite() && out.sigma.is_finite() && out.v.is_finite()) {
        return Err(Error::Decomposition("factorization overflowed"));
    }
    Ok(out)
}
