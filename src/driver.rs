//! Animation stepping.
//!
//! The driver is a small state machine over `(phase, progress, playing)`:
//!
//! ```text
//! Idle --play--> Running --pause--> Paused --play--> Running
//!                  |  tick past the last leg
//!                  v
//!               Complete            (reset from anywhere --> Idle)
//! ```
//!
//! Frame scheduling is injected through [`FrameScheduler`]. The driver never waits on real
//! time: a host's animation-frame service calls [`AnimationDriver::on_frame`] once per display
//! refresh, and tests call [`AnimationDriver::tick`] directly.
//!
//! Every scheduled frame carries a [`FrameToken`]: the session **generation** it was requested
//! for plus a per-request **ticket**. Only the most recently issued ticket is live; `pause`,
//! `reset`, and every new request retire the previous one, so at most one self-scheduling chain
//! exists per session. A callback with a retired ticket, a foreign generation, or that arrives
//! while not playing does nothing at all: no state change, no redraw, no reschedule.

use crate::matrix::Mat2;
use crate::pipeline::{Phase, TransformPipeline};
use crate::render::{caption, Renderer};
use crate::surface::Surface;
use crate::{Error, Result};
use std::collections::VecDeque;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    /// Session the frame was requested for.
    pub generation: u64,
    /// Per-request counter within the session.
    pub ticket: u64,
}

/// Animation-frame service.
pub trait FrameScheduler {
    /// Ask for one callback to [`AnimationDriver::on_frame`] with `token`.
    fn request_frame(&mut self, token: FrameToken);
}

/// Scheduler that queues requests until the host (or a test) drains them.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: VecDeque<FrameToken>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending request.
    pub fn pop(&mut self) -> Option<FrameToken> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, token: FrameToken) {
        self.pending.push_back(token);
    }
}

/// Coarse playback status derived from [`AnimationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Running,
    Paused,
    Complete,
}

/// Where the animation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    pub phase: Phase,
    /// Integer percent within the current leg, in `0..100`.
    pub progress: u32,
    pub playing: bool,
}

impl AnimationState {
    pub const fn initial() -> Self {
        Self {
            phase: Phase::RotateVt,
            progress: 0,
            playing: false,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.phase.is_complete() {
            PlaybackStatus::Complete
        } else if self.playing {
            PlaybackStatus::Running
        } else if self.phase == Phase::RotateVt && self.progress == 0 {
            PlaybackStatus::Idle
        } else {
            PlaybackStatus::Paused
        }
    }

    /// Total order over positions: `phase * 100 + progress`.
    pub fn ordinal(&self) -> u32 {
        // `index()` is at most 3.
        self.phase.index() as u32 * 100 + self.progress
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::initial()
    }
}

/// One drawn frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: Phase,
    pub progress: u32,
    pub transform: Mat2,
    pub caption: String,
}

/// Steps one session's animation.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    pipeline: TransformPipeline,
    state: AnimationState,
    step: u32,
    generation: u64,
    ticket: u64,
}

impl AnimationDriver {
    /// `step` is the progress increment per tick and must be in `1..=100`.
    pub fn new(pipeline: TransformPipeline, generation: u64, step: u32) -> Result<Self> {
        if !(1..=100).contains(&step) {
            return Err(Error::Domain("progress step must be in 1..=100"));
        }
        Ok(Self {
            pipeline,
            state: AnimationState::initial(),
            step,
            generation,
            ticket: 0,
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pipeline(&self) -> &TransformPipeline {
        &self.pipeline
    }

    /// The live token: the only one [`Self::on_frame`] acts on.
    pub fn token(&self) -> FrameToken {
        FrameToken {
            generation: self.generation,
            ticket: self.ticket,
        }
    }

    /// Retire any outstanding request; its callback becomes a no-op.
    fn retire_ticket(&mut self) {
        self.ticket += 1;
    }

    fn request<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.retire_ticket();
        scheduler.request_frame(self.token());
    }

    /// Idle/Paused → Running, and request the first frame.
    ///
    /// Returns `false` (and schedules nothing) when already running or complete; a second
    /// `play` must not start a second frame loop.
    pub fn play<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.status() {
            PlaybackStatus::Idle | PlaybackStatus::Paused => {
                self.state.playing = true;
                self.request(scheduler);
                tracing::debug!(generation = self.generation, ordinal = self.state.ordinal(), "play");
                true
            }
            PlaybackStatus::Running | PlaybackStatus::Complete => false,
        }
    }

    /// Running → Paused. Frames already requested become no-ops.
    pub fn pause(&mut self) -> bool {
        if self.status() != PlaybackStatus::Running {
            return false;
        }
        self.state.playing = false;
        self.retire_ticket();
        tracing::debug!(generation = self.generation, ordinal = self.state.ordinal(), "pause");
        true
    }

    /// Back to Idle from any state.
    pub fn reset(&mut self) {
        self.state = AnimationState::initial();
        self.retire_ticket();
        tracing::debug!(generation = self.generation, "reset");
    }

    /// Move the position forward by one step, ignoring `playing`.
    ///
    /// Reaching 100% starts the next leg at 0%; advancing past the last leg lands on
    /// `Complete` and stops playback. Advancing a completed animation does nothing.
    pub fn advance(&mut self) {
        if self.state.phase.is_complete() {
            return;
        }
        let before = self.state.ordinal();
        self.state.progress += self.step;
        if self.state.progress >= 100 {
            self.state.progress = 0;
            self.state.phase = self.state.phase.next();
        }
        if self.state.phase.is_complete() {
            self.state.playing = false;
            tracing::debug!(generation = self.generation, "animation complete");
        }
        debug_assert!(self.state.ordinal() > before);
    }

    /// The frame for the current position (the exact final product once complete).
    pub fn current_frame(&self) -> Frame {
        let AnimationState { phase, progress, .. } = self.state;
        Frame {
            phase,
            progress,
            transform: self.pipeline.current_transform(phase, progress),
            caption: caption(phase, progress),
        }
    }

    /// One step of a running animation: advance, then describe the new position.
    ///
    /// Returns `None` without touching state unless running.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.status() != PlaybackStatus::Running {
            return None;
        }
        self.advance();
        Some(self.current_frame())
    }

    /// Scheduled-frame entry point: one tick, one redraw, and a reschedule while running.
    pub fn on_frame<S, D>(
        &mut self,
        token: FrameToken,
        scheduler: &mut S,
        renderer: &Renderer,
        surface: &mut D,
    ) -> Option<Frame>
    where
        S: FrameScheduler + ?Sized,
        D: Surface + ?Sized,
    {
        if token != self.token() {
            tracing::trace!(
                generation = token.generation,
                ticket = token.ticket,
                live_generation = self.generation,
                live_ticket = self.ticket,
                "dropping stale frame"
            );
            return None;
        }
        let frame = self.tick()?;
        renderer.draw_frame(surface, &frame.transform);
        surface.set_info(&frame.caption);
        if self.state.playing {
            self.request(scheduler);
        }
        Some(frame)
    }
}
