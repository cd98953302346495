//! Testimonial carousel: a single current index over an ordered, fixed-size
//! set of slides, with an auto-rotation countdown.
//!
//! All index arithmetic is modular over the slide count fixed at
//! registration, so out-of-range indices cannot occur in transitions. The
//! countdown is explicit state advanced by the engine; `restart` is the one
//! cancel-then-start path every manual transition goes through.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::ids::CarouselId;

/// Configuration for registering a carousel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarouselSpec {
    /// Host-side name for the carousel (diagnostics only).
    pub name: String,
    /// Number of slide panels.
    pub slides: u32,
    /// Number of pagination dots; 0 (no dots) or equal to `slides`.
    #[serde(default)]
    pub dots: u32,
}

/// Auto-rotation countdown. At most one countdown is live per carousel by
/// construction: it is a field, not a handle.
#[derive(Debug)]
pub struct RotationTimer {
    interval_ms: f32,
    remaining_ms: f32,
    paused: bool,
}

impl RotationTimer {
    fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms,
            remaining_ms: interval_ms,
            paused: false,
        }
    }

    /// Cancel the running countdown and start a fresh full interval.
    /// Also resumes a paused timer: every manual transition restarts
    /// rotation even under hover.
    pub fn restart(&mut self) {
        self.remaining_ms = self.interval_ms;
        self.paused = false;
    }

    /// Suspend the countdown without touching the current slide.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by `dt_ms` and return how many intervals expired.
    pub(crate) fn tick(&mut self, dt_ms: f32) -> u32 {
        if self.paused || self.interval_ms <= 0.0 {
            return 0;
        }
        self.remaining_ms -= dt_ms;
        let mut fires = 0;
        while self.remaining_ms <= 0.0 {
            fires += 1;
            self.remaining_ms += self.interval_ms;
        }
        fires
    }
}

/// A registered carousel and its rotation state.
#[derive(Debug)]
pub struct Carousel {
    pub id: CarouselId,
    pub name: String,
    slide_count: usize,
    dot_count: usize,
    current: usize,
    pub rotation: RotationTimer,
    pub(crate) touch_start_x: Option<f32>,
    pub(crate) needs_init: bool,
}

impl Carousel {
    pub(crate) fn new(id: CarouselId, spec: CarouselSpec, cfg: &Config) -> Self {
        Self {
            id,
            name: spec.name,
            slide_count: spec.slides as usize,
            dot_count: spec.dots as usize,
            current: 0,
            rotation: RotationTimer::new(cfg.rotation_interval_ms as f32),
            touch_start_x: None,
            needs_init: true,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[inline]
    pub fn dot_count(&self) -> usize {
        self.dot_count
    }

    /// A carousel with no slides never emits writes, never rotates and
    /// ignores commands.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.slide_count == 0
    }

    /// Index one step forward, wrapping at the end.
    #[inline]
    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.slide_count
    }

    /// Index one step backward, wrapping at the start.
    #[inline]
    pub fn prev_index(&self) -> usize {
        (self.current + self.slide_count - 1) % self.slide_count
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.slide_count);
        self.current = index;
    }
}
