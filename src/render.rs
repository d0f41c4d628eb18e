//! Drawing the background and the transformed unit circle.
//!
//! Logical coordinates are mathematical: origin at the canvas center, y up, `scale` pixels per
//! unit. [`Viewport::to_pixel`] is the only place the y-flip happens.

use crate::config::VizConfig;
use crate::matrix::Mat2;
use crate::pipeline::Phase;
use crate::surface::{Stroke, Surface};
use crate::Result;
use ndarray::{Array2, ArrayView2};
use std::f64::consts::{PI, TAU};

/// Caption shown before playback starts (and after a reset).
pub const IDLE_CAPTION: &str = "Click Play to see the transformation!";

/// Caption shown once the last leg has finished.
pub const COMPLETE_CAPTION: &str = "Complete! Full transformation A = UΣVᵀ";

/// Human-readable description of `(phase, progress)`.
pub fn caption(phase: Phase, progress: u32) -> String {
    match phase.label() {
        Some(label) => format!("Step {}: {label} - {progress}%", phase.index() + 1),
        None => COMPLETE_CAPTION.to_string(),
    }
}

/// Logical → pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Viewport {
    pub fn from_config(cfg: &VizConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            scale: cfg.scale,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    #[inline]
    pub fn to_pixel(&self, p: [f64; 2]) -> [f64; 2] {
        let [cx, cy] = self.center();
        [cx + p[0] * self.scale, cy - p[1] * self.scale]
    }
}

/// Points `(cos θ, sin θ)` for `θ = 0, step, 2·step, …` while `θ <= 2π`, as an `n×2` array.
///
/// The last sample generally stops short of `2π`; callers close the curve themselves.
pub fn sample_unit_circle(step: f64) -> Array2<f64> {
    debug_assert!(step > 0.0 && step.is_finite());
    let n = (TAU / step).floor() as usize + 1;
    Array2::from_shape_fn((n, 2), |(i, k)| {
        let theta = i as f64 * step;
        if k == 0 {
            theta.cos()
        } else {
            theta.sin()
        }
    })
}

/// Apply `t` to each row of an `n×2` point array.
pub fn transform_points(t: &Mat2, points: &ArrayView2<f64>) -> Array2<f64> {
    debug_assert_eq!(points.ncols(), 2);
    // Row vectors: p' = p · Tᵀ.
    points.dot(&t.to_array().t())
}

/// Draws frames onto any [`Surface`] with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: VizConfig,
    viewport: Viewport,
    circle: Array2<f64>,
}

impl Renderer {
    pub fn new(config: VizConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::from_config(&config);
        let circle = sample_unit_circle(config.circle_step);
        Ok(Self {
            config,
            viewport,
            circle,
        })
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of samples on the transformed curve.
    pub fn curve_len(&self) -> usize {
        self.circle.nrows()
    }

    /// Grid, axes, reference unit circle, and the two basis vectors.
    pub fn draw_background<S: Surface + ?Sized>(&self, surface: &mut S) {
        let vp = &self.viewport;
        let pal = &self.config.palette;
        let [cx, cy] = vp.center();
        surface.clear(vp.width, vp.height);

        let grid = Stroke {
            color: &pal.grid,
            width: 1.0,
        };
        let n = self.config.grid_extent;
        for i in (-n..=n).filter(|&i| i != 0) {
            let off = f64::from(i) * vp.scale;
            surface.line([cx + off, 0.0], [cx + off, vp.height], grid);
            surface.line([0.0, cy + off], [vp.width, cy + off], grid);
        }

        let axes = Stroke {
            color: &pal.axes,
            width: 2.0,
        };
        surface.line([0.0, cy], [vp.width, cy], axes);
        surface.line([cx, 0.0], [cx, vp.height], axes);

        surface.arc(
            [cx, cy],
            vp.scale,
            Stroke {
                color: &pal.circle,
                width: 3.0,
            },
        );

        self.draw_vector(surface, [1.0, 0.0], &pal.basis_i, "i");
        self.draw_vector(surface, [0.0, 1.0], &pal.basis_j, "j");
    }

    /// Arrow from the origin to logical point `v`, with a label past the tip.
    fn draw_vector<S: Surface + ?Sized>(&self, surface: &mut S, v: [f64; 2], color: &str, label: &str) {
        let stroke = Stroke { color, width: 3.0 };
        let origin = self.viewport.center();
        let tip = self.viewport.to_pixel(v);
        surface.line(origin, tip, stroke);

        // Pixel-space direction, so the head follows the y-flip.
        let angle = (tip[1] - origin[1]).atan2(tip[0] - origin[0]);
        let size = self.config.arrow_size;
        for wing in [angle - PI / 6.0, angle + PI / 6.0] {
            let end = [tip[0] - size * wing.cos(), tip[1] - size * wing.sin()];
            surface.line(tip, end, stroke);
        }

        surface.fill_text(label, [tip[0] + 15.0, tip[1] - 10.0], color);
    }

    /// Pixel coordinates of the unit circle's image under `transform`.
    pub fn curve_pixels(&self, transform: &Mat2) -> Vec<[f64; 2]> {
        let moved = transform_points(transform, &self.circle.view());
        moved
            .rows()
            .into_iter()
            .map(|r| self.viewport.to_pixel([r[0], r[1]]))
            .collect()
    }

    /// Background plus the closed image of the unit circle under `transform`.
    pub fn draw_frame<S: Surface + ?Sized>(&self, surface: &mut S, transform: &Mat2) {
        self.draw_background(surface);
        let pts = self.curve_pixels(transform);
        surface.polyline(
            &pts,
            true,
            Stroke {
                color: &self.config.palette.curve,
                width: 3.0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};
    use approx::assert_abs_diff_eq;

    fn renderer() -> Renderer {
        Renderer::new(VizConfig::default()).unwrap()
    }

    #[test]
    fn default_sampling_has_63_points() {
        let c = sample_unit_circle(0.1);
        assert_eq!(c.dim(), (63, 2));
        assert_eq!(c[[0, 0]], 1.0);
        assert_eq!(c[[0, 1]], 0.0);
        for row in c.rows() {
            assert_abs_diff_eq!(row[0].hypot(row[1]), 1.0, epsilon = 1e-12);
        }
        assert_eq!(renderer().curve_len(), 63);
    }

    #[test]
    fn viewport_flips_y_around_center() {
        let vp = Viewport::from_config(&VizConfig::default());
        assert_eq!(vp.center(), [300.0, 300.0]);
        assert_eq!(vp.to_pixel([0.0, 0.0]), [300.0, 300.0]);
        assert_eq!(vp.to_pixel([1.0, 1.0]), [360.0, 240.0]);
        assert_eq!(vp.to_pixel([-5.0, -5.0]), [0.0, 600.0]);
    }

    #[test]
    fn transform_points_matches_apply() {
        let t = Mat2::new(1.0, 2.0, -3.0, 0.5);
        let pts = sample_unit_circle(0.5);
        let moved = transform_points(&t, &pts.view());
        for (p, q) in pts.rows().into_iter().zip(moved.rows()) {
            let expect = t.apply([p[0], p[1]]);
            assert_abs_diff_eq!(q[0], expect[0], epsilon = 1e-12);
            assert_abs_diff_eq!(q[1], expect[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn background_layout() {
        let r = renderer();
        let mut s = Recorder::new();
        r.draw_background(&mut s);
        assert_eq!(s.clear_count(), 1);

        let lines = s
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        // 10 gridline pairs, 2 axes, 2 vectors × (shaft + 2 head strokes).
        assert_eq!(lines, 20 + 2 + 6);

        let arcs: Vec<_> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![([300.0, 300.0], 60.0)]);

        let labels: Vec<_> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, at, .. } => Some((text.as_str(), *at)),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec![("i", [375.0, 290.0]), ("j", [315.0, 230.0])]);
        assert!(s.last_polyline().is_none());
    }

    #[test]
    fn basis_arrowheads_point_back_along_the_shaft() {
        let r = renderer();
        let mut s = Recorder::new();
        r.draw_background(&mut s);
        // j points up in pixel space: head strokes end below the tip.
        let heads: Vec<_> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } if *from == [300.0, 240.0] => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(heads.len(), 2);
        for h in heads {
            assert!(h[1] > 240.0);
            assert_abs_diff_eq!((h[0] - 300.0).hypot(h[1] - 240.0), 12.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn identity_frame_traces_the_unit_circle() {
        let r = renderer();
        let mut s = Recorder::new();
        r.draw_frame(&mut s, &Mat2::identity());
        let pts = s.last_polyline().unwrap();
        assert_eq!(pts.len(), 63);
        assert_eq!(pts[0], [360.0, 300.0]);
        for p in pts {
            assert_abs_diff_eq!((p[0] - 300.0).hypot(p[1] - 300.0), 60.0, epsilon = 1e-9);
        }
        match s.commands().last() {
            Some(DrawCommand::Polyline { closed, color, .. }) => {
                assert!(*closed);
                assert_eq!(color, "#d08770");
            }
            other => panic!("expected the curve last, got {other:?}"),
        }
    }

    #[test]
    fn zero_frame_collapses_to_origin() {
        let r = renderer();
        let pts = r.curve_pixels(&Mat2::zeros());
        assert!(pts.iter().all(|p| *p == [300.0, 300.0]));
    }

    #[test]
    fn captions() {
        assert_eq!(
            caption(Phase::RotateVt, 42),
            "Step 1: Applying Vᵀ (rotation) - 42%"
        );
        assert_eq!(caption(Phase::ScaleSigma, 0), "Step 2: Applying Σ (scaling) - 0%");
        assert_eq!(caption(Phase::RotateU, 98), "Step 3: Applying U (rotation) - 98%");
        assert_eq!(caption(Phase::Complete, 0), COMPLETE_CAPTION);
    }
}
