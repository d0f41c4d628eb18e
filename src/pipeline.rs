//! The three-leg transform plan derived from a decomposition.
//!
//! Applying \(A = U \Sigma V^\top\) to the plane is narrated as three cumulative legs:
//!
//! | leg | start | end |
//! |---|---|---|
//! | `RotateVt` | \(I\) | \(V^\top\) |
//! | `ScaleSigma` | \(V^\top\) | \(\Sigma V^\top\) |
//! | `RotateU` | \(\Sigma V^\top\) | \(U \Sigma V^\top\) |
//!
//! Within a leg, the transform is the entry-wise linear interpolation
//! `start + (end - start) * (progress / 100)`. Intermediate points of a rotation leg are
//! generally not rotations.

use crate::matrix::Mat2;
use crate::svd::Decomposition;

/// Which leg of the animation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Leg 0: identity → \(V^\top\).
    RotateVt,
    /// Leg 1: \(V^\top\) → \(\Sigma V^\top\).
    ScaleSigma,
    /// Leg 2: \(\Sigma V^\top\) → \(U \Sigma V^\top\).
    RotateU,
    /// Past the last leg; the transform is exactly the final product.
    Complete,
}

impl Phase {
    /// The interpolated legs, in order.
    pub const LEGS: [Phase; 3] = [Phase::RotateVt, Phase::ScaleSigma, Phase::RotateU];

    pub fn index(self) -> usize {
        match self {
            Phase::RotateVt => 0,
            Phase::ScaleSigma => 1,
            Phase::RotateU => 2,
            Phase::Complete => 3,
        }
    }

    /// Indices past the last leg saturate to `Complete`.
    pub fn from_index(i: usize) -> Phase {
        match i {
            0 => Phase::RotateVt,
            1 => Phase::ScaleSigma,
            2 => Phase::RotateU,
            _ => Phase::Complete,
        }
    }

    pub fn next(self) -> Phase {
        Phase::from_index(self.index() + 1)
    }

    pub fn is_complete(self) -> bool {
        self == Phase::Complete
    }

    /// Short description of what the leg does (`None` once complete).
    pub fn label(self) -> Option<&'static str> {
        match self {
            Phase::RotateVt => Some("Applying Vᵀ (rotation)"),
            Phase::ScaleSigma => Some("Applying Σ (scaling)"),
            Phase::RotateU => Some("Applying U (rotation)"),
            Phase::Complete => None,
        }
    }
}

/// Start/end matrices for each leg, computed once per decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformPipeline {
    starts: [Mat2; 3],
    ends: [Mat2; 3],
}

impl TransformPipeline {
    pub fn new(d: &Decomposition) -> Self {
        let vt = d.vt();
        let svt = d.sigma().matmul(&vt);
        let usvt = d.u().matmul(&svt);
        Self {
            starts: [Mat2::identity(), vt, svt],
            ends: [vt, svt, usvt],
        }
    }

    /// `(start, end)` of a leg; `None` for `Complete`.
    pub fn leg(&self, phase: Phase) -> Option<(Mat2, Mat2)> {
        let i = phase.index();
        if i < 3 {
            Some((self.starts[i], self.ends[i]))
        } else {
            None
        }
    }

    /// `U · Σ · Vᵗ`, as stored (never interpolated).
    pub fn final_transform(&self) -> Mat2 {
        self.ends[2]
    }

    /// The transform shown at `(phase, progress)`; `progress` is an integer percent.
    ///
    /// `Complete` ignores `progress` and returns [`Self::final_transform`] exactly.
    pub fn current_transform(&self, phase: Phase, progress: u32) -> Mat2 {
        debug_assert!(progress <= 100, "progress is a percent: {progress}");
        match self.leg(phase) {
            Some((start, end)) => start.lerp(&end, f64::from(progress) / 100.0),
            None => self.final_transform(),
        }
    }
}
