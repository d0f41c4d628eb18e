//! # svdviz
//!
//! The singular value decomposition of a 2×2 matrix, played back as an animation.
//!
//! This crate is intentionally small:
//!
//! - it factors a real 2×2 matrix as \(A = U \Sigma V^\top\),
//! - it turns that factorization into three **legs** (rotate by \(V^\top\), scale by \(\Sigma\),
//!   rotate by \(U\)) and interpolates each leg entry-wise,
//! - it steps a deterministic, resumable animation and draws the image of the unit circle onto
//!   an abstract pixel [`surface::Surface`].
//!
//! It does not own a window, an event loop, or a DOM. Hosts inject a
//! [`driver::FrameScheduler`] (an animation-frame service) and a surface; tests use
//! [`driver::ManualScheduler`] and [`surface::Recorder`] and step frames synchronously.
//!
//! ## Public invariants (must not change)
//!
//! - **Fixed shape**: every matrix is a [`matrix::Mat2`]; there is no dynamic sizing anywhere.
//! - **Exact endpoints**: `current_transform(RotateVt, 0)` is the identity bit-for-bit, each leg
//!   starts at the previous leg's end bit-for-bit, and the completed state returns the stored
//!   product \(U \Sigma V^\top\) without interpolation.
//! - **Entry-wise interpolation**: legs interpolate raw matrix entries linearly, so a
//!   rotation leg is not a constant-speed rotation.
//! - **One frame loop per session**: every scheduled frame carries a [`driver::FrameToken`]
//!   (session generation plus request ticket). Pause, reset, and each new request retire the
//!   previous ticket, so a callback that is not the live one does nothing.
//! - **No hidden randomness**: the only random entry point takes the RNG as an argument.
//!
//! ## Module map
//!
//! - `matrix`: `Mat2` (multiply, transpose, identity, diag, lerp) + `ndarray` interop
//! - `svd`: 2×2 two-sided Jacobi SVD (`factorize`, `Decomposition`)
//! - `pipeline`: `Phase` and the three-leg `TransformPipeline`
//! - `driver`: `AnimationDriver` state machine, `FrameScheduler`, `ManualScheduler`
//! - `render`: `Viewport`, `Renderer` (background + transformed curve), captions
//! - `surface`: the `Surface` drawing trait, an in-memory `Recorder`, and an `SvgSurface`
//! - `view`: input parsing, randomize, matrix tables, and the `Visualizer` controller
//! - `config`: `VizConfig` / `Palette`

pub mod config;
pub mod driver;
pub mod matrix;
pub mod pipeline;
pub mod render;
pub mod surface;
pub mod svd;
pub mod view;

pub use config::{Palette, VizConfig};
pub use driver::{
    AnimationDriver, AnimationState, FrameScheduler, FrameToken, ManualScheduler, PlaybackStatus,
};
pub use matrix::Mat2;
pub use pipeline::{Phase, TransformPipeline};
pub use render::Renderer;
pub use svd::{factorize, Decomposition};
pub use view::{View, Visualizer};

/// svdviz error variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("field {field} is not a finite number: {value:?}")]
    Parse { field: &'static str, value: String },
    #[error("decomposition failed: {0}")]
    Decomposition(&'static str),
    #[error("shape mismatch: {0}")]
    Shape(&'static str),
    #[error("domain error: {0}")]
    Domain(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
