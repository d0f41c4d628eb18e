//! Fixed-size 2×2 real matrices.
//!
//! `Mat2` is the only matrix type the engine computes with. It is `Copy` and every operation
//! returns a new value; nothing is mutated in place. Storage is row-major:
//!
//! \[
//! \begin{pmatrix} a_{11} & a_{12} \\ a_{21} & a_{22} \end{pmatrix}
//! \]
//!
//! `ndarray` conversions are provided at the edge so callers holding `Array2<f64>` data can
//! hand it in (and get it back) without caring about the internal layout.

use crate::{Error, Result};
use ndarray::{Array2, ArrayView2};
use std::ops::Mul;

/// A real 2×2 matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2 {
    m: [[f64; 2]; 2],
}

impl Mat2 {
    pub const fn new(a11: f64, a12: f64, a21: f64, a22: f64) -> Self {
        Self {
            m: [[a11, a12], [a21, a22]],
        }
    }

    pub const fn from_rows(rows: [[f64; 2]; 2]) -> Self {
        Self { m: rows }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Diagonal matrix with `d` on the diagonal.
    pub const fn diag(d: [f64; 2]) -> Self {
        Self::new(d[0], 0.0, 0.0, d[1])
    }

    /// Entry `(i, j)`, zero-based.
    ///
    /// Panics if `i` or `j` is not 0 or 1.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.m[i][j]
    }

    pub fn rows(&self) -> [[f64; 2]; 2] {
        self.m
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &Mat2) -> Mat2 {
        let a = &self.m;
        let b = &rhs.m;
        Mat2::new(
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        )
    }

    pub fn transpose(&self) -> Mat2 {
        Mat2::new(self.m[0][0], self.m[1][0], self.m[0][1], self.m[1][1])
    }

    /// Apply to a column vector: `self · [x, y]ᵀ`.
    #[inline]
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [
            self.m[0][0] * p[0] + self.m[0][1] * p[1],
            self.m[1][0] * p[0] + self.m[1][1] * p[1],
        ]
    }

    /// Entry-wise linear interpolation: `self + (end - self) * t`.
    ///
    /// At `t = 0` this returns `self` exactly; at `t = 1` it matches `end` only up to rounding.
    pub fn lerp(&self, end: &Mat2, t: f64) -> Mat2 {
        let mut out = [[0.0f64; 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                let v0 = self.m[i][j];
                let v1 = end.m[i][j];
                out[i][j] = v0 + (v1 - v0) * t;
            }
        }
        Mat2::from_rows(out)
    }

    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Largest absolute entry (the max norm).
    pub fn max_abs(&self) -> f64 {
        self.m.iter().flatten().fold(0.0f64, |acc, &x| acc.max(x.abs()))
    }

    /// Largest absolute entry-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Mat2) -> f64 {
        let mut worst = 0.0f64;
        for i in 0..2 {
            for j in 0..2 {
                worst = worst.max((self.m[i][j] - other.m[i][j]).abs());
            }
        }
        worst
    }

    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((2, 2), |(i, j)| self.m[i][j])
    }

    /// Build from a `2×2` array view (any memory layout).
    pub fn from_array(a: &ArrayView2<f64>) -> Result<Self> {
        if a.dim() != (2, 2) {
            return Err(Error::Shape("matrix must be 2x2"));
        }
        Ok(Mat2::new(a[[0, 0]], a[[0, 1]], a[[1, 0]], a[[1, 1]]))
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f64; 2]; 2]> for Mat2 {
    fn from(rows: [[f64; 2]; 2]) -> Self {
        Self::from_rows(rows)
    }
}

impl Mul for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Mat2 {
        self.matmul(&rhs)
    }
}

impl Mul<&Mat2> for &Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: &Mat2) -> Mat2 {
        self.matmul(rhs)
    }
}
