//! Binding table and resolver traits.
//!
//! View slots are addressed by SlotKey inside the engine. The table maps
//! slot keys to resolved host handles (small string keys); population
//! happens once in prebind(). Unresolved slots fall back to their canonical
//! slot path string.

use crate::ids::{CarouselId, CounterId};
use vitrine_api_core::SlotPath;

/// Opaque host handle (small string key).
pub type TargetHandle = String;

/// Identifies one view slot owned by a widget.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SlotKey {
    /// A counter's numeric display slot.
    CounterValue(CounterId),
    /// A counter's CSS animation-state slot on its stats item.
    CounterAnimate(CounterId),
    /// A carousel slide's shown/hidden slot.
    Slide(CarouselId, u32),
    /// A pagination dot's active-decoration slot.
    Dot(CarouselId, u32),
}

impl SlotKey {
    /// Canonical slot path for this key.
    pub fn path(&self) -> SlotPath {
        match self {
            SlotKey::CounterValue(c) => SlotPath::new("counter", c.0, "value", None),
            SlotKey::CounterAnimate(c) => SlotPath::new("counter", c.0, "animate", None),
            SlotKey::Slide(c, i) => SlotPath::new("carousel", c.0, "slide", Some(*i)),
            SlotKey::Dot(c, i) => SlotPath::new("carousel", c.0, "dot", Some(*i)),
        }
    }
}

/// Trait for resolving canonical slot paths to opaque host handles.
/// Adapters implement this and pass it into Engine::prebind().
pub trait TargetResolver {
    fn resolve(&mut self, path: &str) -> Option<TargetHandle>;
}

/// One row in the binding table.
#[derive(Clone, Debug)]
pub struct BindingRow {
    pub key: SlotKey,
    pub handle: TargetHandle,
}

/// Binding table shared across all widgets of an engine.
#[derive(Default, Debug)]
pub struct BindingTable {
    pub rows: Vec<BindingRow>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Look up an existing row by slot key.
    pub fn get(&self, key: SlotKey) -> Option<&BindingRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Insert or update a binding row for a slot.
    pub fn upsert(&mut self, key: SlotKey, handle: TargetHandle) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.handle = handle;
        } else {
            self.rows.push(BindingRow { key, handle });
        }
    }
}
