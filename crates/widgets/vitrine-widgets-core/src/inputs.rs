//! Input contracts for the core engine.
//!
//! Adapters translate host callbacks (scroll, resize, clicks, touches) into
//! these values and pass them into Engine::update() each tick. The engine
//! never polls the host.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Viewport};
use crate::ids::{CarouselId, CounterId};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Page-level events applied before widget commands.
    #[serde(default)]
    pub page_events: Vec<PageEvent>,
    /// Per-counter geometry updates.
    #[serde(default)]
    pub counter_updates: Vec<CounterUpdate>,
    /// User interactions with carousels.
    #[serde(default)]
    pub carousel_cmds: Vec<CarouselCommand>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.page_events.is_empty()
            && self.counter_updates.is_empty()
            && self.carousel_cmds.is_empty()
    }
}

/// Events about the page as a whole.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PageEvent {
    /// The page scrolled; counters re-check visibility.
    Scrolled,
    /// The viewport changed size.
    ViewportResized { viewport: Viewport },
}

/// Updated bounding box for a counter, reported alongside scroll events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CounterUpdate {
    pub counter: CounterId,
    #[serde(default)]
    pub rect: Option<Rect>,
}

/// User interactions with a carousel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CarouselCommand {
    /// A pagination dot was activated.
    SelectSlide { carousel: CarouselId, index: usize },
    /// The next-button was activated.
    NextSlide { carousel: CarouselId },
    /// The previous-button was activated.
    PrevSlide { carousel: CarouselId },
    /// The pointer entered the carousel's bounding region.
    PointerEntered { carousel: CarouselId },
    /// The pointer left the carousel's bounding region.
    PointerLeft { carousel: CarouselId },
    /// A touch began; x is the horizontal screen coordinate.
    TouchStarted { carousel: CarouselId, x: f32 },
    /// A touch ended; x is the horizontal screen coordinate.
    TouchEnded { carousel: CarouselId, x: f32 },
}
