//! vitrine-api-core: shared value, slot-path and write contracts (host-agnostic)

pub mod slot_path;
pub mod value;
pub mod write_ops;

pub use slot_path::SlotPath;
pub use value::{Value, ValueKind};
pub use write_ops::{WriteBatch, WriteOp};
