//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CarouselId(pub u32);

/// Monotonic allocator for CounterId and CarouselId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_counter: u32,
    next_carousel: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_counter(&mut self) -> CounterId {
        let id = CounterId(self.next_counter);
        self.next_counter = self.next_counter.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_carousel(&mut self) -> CarouselId {
        let id = CarouselId(self.next_carousel);
        self.next_carousel = self.next_carousel.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
