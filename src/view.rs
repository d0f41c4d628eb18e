//! The controller between UI controls and the engine.
//!
//! A host (DOM, egui, terminal, test) owns the widgets. It forwards user actions to
//! [`Visualizer`] and reads back what to show: the active [`View`], the decomposition tables,
//! the caption, and whatever was drawn onto its [`Surface`].
//!
//! All per-matrix state lives in a [`Session`]. Visualizing a new matrix or going back to the
//! input view drops the session and bumps the generation, so any frame callback still queued
//! for the old session is ignored when it fires.

use crate::config::VizConfig;
use crate::driver::{
    AnimationDriver, Frame, FrameScheduler, FrameToken, ManualScheduler, PlaybackStatus,
};
use crate::matrix::Mat2;
use crate::pipeline::TransformPipeline;
use crate::render::{Renderer, IDLE_CAPTION};
use crate::surface::Surface;
use crate::svd::{factorize, Decomposition};
use crate::{Error, Result};
use rand_distr::{Distribution, Uniform};
use std::fmt;

/// Input field names, row-major.
pub const FIELD_NAMES: [&str; 4] = ["a11", "a12", "a21", "a22"];

/// Parse the four input fields (row-major) into a matrix.
///
/// Accepts any decimal float syntax Rust accepts, with surrounding whitespace; there is no
/// range bound. Empty, non-numeric, or non-finite fields are rejected with the field's name.
pub fn parse_matrix(fields: [&str; 4]) -> Result<Mat2> {
    let mut e = [0.0f64; 4];
    for (k, raw) in fields.iter().enumerate() {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| Error::Parse {
                field: FIELD_NAMES[k],
                value: raw.to_string(),
            })?;
        e[k] = value;
    }
    Ok(Mat2::new(e[0], e[1], e[2], e[3]))
}

/// Four field values uniform in `[-3, 3]`, formatted to one decimal.
pub fn random_fields<R: rand::Rng + ?Sized>(rng: &mut R) -> Result<[String; 4]> {
    let dist = Uniform::new_inclusive(-3.0f64, 3.0)
        .map_err(|_| Error::Domain("invalid uniform range"))?;
    let mut out: [String; 4] = Default::default();
    for slot in &mut out {
        let x: f64 = dist.sample(rng);
        // Avoid printing "-0.0".
        let rounded = (x * 10.0).round() / 10.0 + 0.0;
        *slot = format!("{rounded:.1}");
    }
    Ok(out)
}

/// A random matrix with entries in `[-3, 3]` at one-decimal resolution.
pub fn random_matrix<R: rand::Rng + ?Sized>(rng: &mut R) -> Result<Mat2> {
    let f = random_fields(rng)?;
    parse_matrix([&f[0], &f[1], &f[2], &f[3]])
}

/// A named 2×2 table of values formatted to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTable {
    pub name: &'static str,
    pub cells: [[String; 2]; 2],
}

impl MatrixTable {
    pub fn new(name: &'static str, m: &Mat2) -> Self {
        let cell = |i: usize, j: usize| format!("{:.2}", m.get(i, j) + 0.0);
        Self {
            name,
            cells: [[cell(0, 0), cell(0, 1)], [cell(1, 0), cell(1, 1)]],
        }
    }
}

impl fmt::Display for MatrixTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for row in &self.cells {
            writeln!(f, "{:>8} {:>8}", row[0], row[1])?;
        }
        Ok(())
    }
}

/// `U`, `Σ`, and `Vᵀ` tables, in display order.
pub fn decomposition_tables(d: &Decomposition) -> [MatrixTable; 3] {
    [
        MatrixTable::new("U", d.u()),
        MatrixTable::new("Σ", d.sigma()),
        MatrixTable::new("Vᵀ", &d.vt()),
    ]
}

/// Which screen the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Input,
    Visualize,
}

/// Everything tied to one visualized matrix.
#[derive(Debug, Clone)]
pub struct Session {
    decomposition: Decomposition,
    tables: [MatrixTable; 3],
    driver: AnimationDriver,
}

impl Session {
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn tables(&self) -> &[MatrixTable; 3] {
        &self.tables
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn generation(&self) -> u64 {
        self.driver.generation()
    }
}

/// SVD visualizer controller.
#[derive(Debug)]
pub struct Visualizer<S: FrameScheduler> {
    config: VizConfig,
    renderer: Renderer,
    scheduler: S,
    view: View,
    session: Option<Session>,
    generation: u64,
    error: Option<String>,
}

impl<S: FrameScheduler> Visualizer<S> {
    pub fn new(config: VizConfig, scheduler: S) -> Result<Self> {
        let renderer = Renderer::new(config.clone())?;
        Ok(Self {
            config,
            renderer,
            scheduler,
            view: View::Input,
            session: None,
            generation: 0,
            error: None,
        })
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Inline error for the input view, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Generation of the most recent session (or invalidation).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> Option<PlaybackStatus> {
        self.session.as_ref().map(|s| s.driver.status())
    }

    /// Drop the current session; queued frames for it become no-ops.
    fn invalidate(&mut self) {
        self.session = None;
        self.generation += 1;
    }

    /// Factor `a`, start a fresh idle session, and draw the untransformed background.
    ///
    /// On failure the view stays on `Input` with an inline error and no session exists.
    pub fn on_visualize<D: Surface + ?Sized>(&mut self, a: &Mat2, surface: &mut D) -> Result<()> {
        self.invalidate();
        let decomposition = match factorize(a) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "visualize rejected");
                self.error = Some(e.to_string());
                self.view = View::Input;
                return Err(e);
            }
        };

        let pipeline = TransformPipeline::new(&decomposition);
        let driver = AnimationDriver::new(pipeline, self.generation, self.config.progress_step)?;
        let tables = decomposition_tables(&decomposition);
        tracing::debug!(
            generation = self.generation,
            sigma = ?decomposition.singular_values(),
            "session started"
        );
        self.session = Some(Session {
            decomposition,
            tables,
            driver,
        });
        self.error = None;
        self.view = View::Visualize;

        self.renderer.draw_background(surface);
        surface.set_info(IDLE_CAPTION);
        Ok(())
    }

    /// Parse the four input fields, then [`Self::on_visualize`].
    pub fn on_visualize_fields<D: Surface + ?Sized>(
        &mut self,
        fields: [&str; 4],
        surface: &mut D,
    ) -> Result<()> {
        match parse_matrix(fields) {
            Ok(a) => self.on_visualize(&a, surface),
            Err(e) => {
                tracing::warn!(error = %e, "input rejected");
                self.invalidate();
                self.error = Some(e.to_string());
                self.view = View::Input;
                Err(e)
            }
        }
    }

    pub fn on_play(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) => s.driver.play(&mut self.scheduler),
            None => false,
        }
    }

    pub fn on_pause(&mut self) -> bool {
        self.session.as_mut().is_some_and(|s| s.driver.pause())
    }

    /// Back to Idle and redraw the untransformed unit circle.
    pub fn on_reset<D: Surface + ?Sized>(&mut self, surface: &mut D) {
        if let Some(s) = self.session.as_mut() {
            s.driver.reset();
        }
        self.renderer.draw_background(surface);
        surface.set_info(IDLE_CAPTION);
    }

    /// Leave the visualization and return to matrix entry.
    pub fn on_new_matrix(&mut self) {
        self.invalidate();
        self.error = None;
        self.view = View::Input;
    }

    /// A scheduled frame callback fired.
    pub fn on_frame<D: Surface + ?Sized>(&mut self, token: FrameToken, surface: &mut D) -> Option<Frame> {
        let session = self.session.as_mut()?;
        session
            .driver
            .on_frame(token, &mut self.scheduler, &self.renderer, surface)
    }
}

impl Visualizer<ManualScheduler> {
    /// Fire queued frame callbacks in order, at most `max_frames` of them.
    ///
    /// Returns how many callbacks drew a frame. Callbacks that reschedule are picked up in the
    /// same call.
    pub fn pump<D: Surface + ?Sized>(&mut self, surface: &mut D, max_frames: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..max_frames {
            let Some(token) = self.scheduler.pop() else {
                break;
            };
            if self.on_frame(token, surface).is_some() {
                drawn += 1;
            }
        }
        drawn
    }
}
