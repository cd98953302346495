//! Core configuration for vitrine-widgets-core.

use serde::{Deserialize, Serialize};

/// Timing and gesture knobs shared by all widgets in an engine.
/// Defaults reproduce the page behavior this engine was built for.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Counter animation step period in milliseconds.
    pub counter_tick_ms: u32,
    /// Total counter animation duration in milliseconds.
    pub counter_duration_ms: u32,
    /// Carousel auto-rotation period in milliseconds.
    pub rotation_interval_ms: u32,
    /// Minimum horizontal displacement (px) for a touch to count as a swipe.
    pub swipe_threshold_px: f32,
}

impl Config {
    /// Number of whole animation steps a counter runs for.
    #[inline]
    pub fn counter_steps(&self) -> u32 {
        (self.counter_duration_ms / self.counter_tick_ms).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            counter_tick_ms: 50,
            counter_duration_ms: 2000,
            rotation_interval_ms: 5000,
            swipe_threshold_px: 50.0,
        }
    }
}
