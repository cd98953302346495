//! Animated stat counter: a one-shot count-up from 0 to a declared target.
//!
//! The counter is latched the first time its bounding box is fully inside
//! the viewport. From then on it advances on a fixed step period, adding
//! `target / steps` per step and displaying the floored running value, until
//! the running value reaches the target; the final write is the exact
//! target. The latch is permanent: leaving and re-entering the viewport
//! never restarts the animation.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::geometry::Rect;
use crate::ids::CounterId;

/// Configuration for registering a counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CounterSpec {
    /// Host-side name for the counter (diagnostics only).
    pub name: String,
    /// Count-up target. Validated non-negative at manifest load.
    pub target: i64,
    /// Bounding box in viewport coordinates; updated via inputs as the
    /// page scrolls.
    #[serde(default)]
    pub rect: Rect,
}

/// Result of advancing a counter's animation by one update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Not latched, already finished, or no whole step elapsed.
    Idle,
    /// At least one step ran; payload is the floored displayed value.
    Running(i64),
    /// The target was reached this update; payload is the exact target.
    Finished(i64),
}

/// A registered counter and its animation state.
#[derive(Debug)]
pub struct Counter {
    pub id: CounterId,
    pub name: String,
    pub target: i64,
    pub rect: Rect,
    current: f32,
    started: bool,
    done: bool,
    accum_ms: f32,
}

impl Counter {
    pub(crate) fn new(id: CounterId, spec: CounterSpec) -> Self {
        Self {
            id,
            name: spec.name,
            target: spec.target,
            rect: spec.rect,
            current: 0.0,
            started: false,
            done: false,
            accum_ms: 0.0,
        }
    }

    /// Whether the one-shot latch has fired.
    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Whether the animation has completed.
    #[inline]
    pub fn done(&self) -> bool {
        self.done
    }

    /// The value a host display currently shows.
    pub fn displayed(&self) -> i64 {
        if self.done {
            self.target
        } else {
            self.current.floor() as i64
        }
    }

    /// Fire the latch. Returns true only on the first call.
    pub(crate) fn latch(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Advance the animation by `dt_ms`, running as many whole steps as
    /// elapsed. Fractional remainders carry over to the next update.
    pub(crate) fn advance(&mut self, dt_ms: f32, cfg: &Config) -> StepOutcome {
        if !self.started || self.done {
            return StepOutcome::Idle;
        }
        self.accum_ms += dt_ms;
        let step_ms = cfg.counter_tick_ms.max(1) as f32;
        let increment = self.target as f32 / cfg.counter_steps() as f32;

        let mut stepped = false;
        while self.accum_ms >= step_ms && !self.done {
            self.accum_ms -= step_ms;
            self.current += increment;
            stepped = true;
            if self.current >= self.target as f32 {
                self.done = true;
            }
        }

        if !stepped {
            StepOutcome::Idle
        } else if self.done {
            StepOutcome::Finished(self.target)
        } else {
            StepOutcome::Running(self.current.floor() as i64)
        }
    }
}
