//! Vitrine Widgets Core (host-agnostic)
//!
//! Deterministic widget logic for marketing pages: animated stat counters
//! and testimonial carousels. This crate defines the data model, input and
//! output contracts, binding types, manifest loading, and the tick-driven
//! Engine. Adapters (web/wasm) own the event loop and apply the emitted
//! view writes.

pub mod binding;
pub mod carousel;
pub mod config;
pub mod counter;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod ids;
pub mod inputs;
pub mod manifest;
pub mod outputs;

// Re-exports for consumers (adapters)
pub use binding::{BindingRow, BindingTable, SlotKey, TargetHandle, TargetResolver};
pub use carousel::{Carousel, CarouselSpec, RotationTimer};
pub use config::Config;
pub use counter::{Counter, CounterSpec};
pub use engine::{Engine, ManifestIds};
pub use geometry::{Rect, Viewport};
pub use gesture::{classify_swipe, SwipeDirection};
pub use ids::{CarouselId, CounterId};
pub use inputs::{CarouselCommand, CounterUpdate, Inputs, PageEvent};
pub use manifest::{parse_page_manifest_json, ManifestError, PageManifest};
pub use outputs::{Change, CoreEvent, Outputs};
pub use vitrine_api_core::{SlotPath, Value, ValueKind, WriteBatch, WriteOp};
