//! Animated presentation transitions.
//!
//! A transition is a fixed-duration suspension between two lifecycle
//! states: the caller's `show`/`dismiss` returns immediately and the
//! window completes the edge on a later tick of the UI loop. At most one
//! transition is in flight per window; the window bumps a generation
//! counter every time it starts one, and a completion only applies when
//! the stored token still matches, so a superseded entrance can never
//! fire after a dismiss has taken over.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Sliding/fading the sheet onto the screen (Appearing → Visible).
    Entrance,
    /// The reverse transition (Dismissing → Dismissed).
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    kind: TransitionKind,
    started: Instant,
    duration: Duration,
    token: u64,
}

impl Transition {
    pub(crate) fn new(kind: TransitionKind, duration: Duration, token: u64) -> Self {
        Self::starting_at(kind, Instant::now(), duration, token)
    }

    pub(crate) fn starting_at(
        kind: TransitionKind,
        started: Instant,
        duration: Duration,
        token: u64,
    ) -> Self {
        Self {
            kind,
            started,
            duration,
            token,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub(crate) fn token(&self) -> u64 {
        self.token
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// How presented the window is at `now`, in `0.0..=1.0`.
    ///
    /// An entrance ramps 0 → 1; an exit ramps 1 → 0, so renderers can use
    /// the value directly without branching on the kind.
    pub fn progress(&self, now: Instant) -> f32 {
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
            (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        match self.kind {
            TransitionKind::Entrance => raw,
            TransitionKind::Exit => 1.0 - raw,
        }
    }
}
