//! Output contracts from the core engine.
//!
//! Outputs carry the view writes for this tick, keyed by stable string
//! handle, and a separate list of semantic events. Adapters apply changes to
//! the host view and transport events.

use serde::{Deserialize, Serialize};

use crate::ids::{CarouselId, CounterId};
use vitrine_api_core::{SlotPath, Value, WriteBatch, WriteOp};

/// One changed view slot this tick. `key` is the handle resolved at prebind
/// time, or the canonical slot path when no binding exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    /// Canonical slot path the change targets, kept alongside the resolved
    /// key so hosts can re-derive typed writes.
    pub path: SlotPath,
    pub value: Value,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// The current slide changed, for any reason (manual or auto).
    SlideChanged {
        carousel: CarouselId,
        from: usize,
        to: usize,
    },
    RotationPaused {
        carousel: CarouselId,
    },
    RotationResumed {
        carousel: CarouselId,
    },
    /// A counter's one-shot latch fired.
    CounterStarted {
        counter: CounterId,
    },
    /// A counter reached its target.
    CounterFinished {
        counter: CounterId,
        value: i64,
    },
    Error {
        message: String,
    },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// The tick's changes as a typed write batch over canonical paths.
    pub fn write_batch(&self) -> WriteBatch {
        self.changes
            .iter()
            .map(|c| WriteOp::new(c.path.clone(), c.value.clone()))
            .collect()
    }
}
