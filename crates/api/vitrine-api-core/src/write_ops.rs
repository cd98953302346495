//! Write operations produced by the widget engine to describe mutations of
//! host view slots using canonical slot paths.
//!
//! WriteOp serializes to JSON as:
//!   { "path": "carousel.0/slide.2", "value": { "type": "bool", "data": true } }
//!
//! WriteBatch is a simple Vec<WriteOp> with helpers.

use crate::{slot_path::SlotPath, Value};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct WriteOp {
    pub path: SlotPath,
    pub value: Value,
}

impl WriteOp {
    pub fn new(path: SlotPath, value: Value) -> Self {
        Self { path, value }
    }
}

// Serialize WriteOp as { "path": "<string>", "value": <ValueJSON> }
impl Serialize for WriteOp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("WriteOp", 2)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for WriteOp {
    fn deserialize<D>(deserializer: D) -> Result<WriteOp, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Deserialize into an intermediate map
        let v = serde_json::Value::deserialize(deserializer).map_err(de::Error::custom)?;
        let path_s = v
            .get("path")
            .and_then(|p| p.as_str())
            .ok_or_else(|| de::Error::custom("missing or invalid 'path' field"))?;

        let path = SlotPath::parse(path_s).map_err(de::Error::custom)?;

        let val = v
            .get("value")
            .ok_or_else(|| de::Error::custom("missing 'value' field"))?;
        let value: Value = serde_json::from_value(val.clone()).map_err(de::Error::custom)?;

        Ok(WriteOp { path, value })
    }
}

/// A batch of write operations. The engine can emit a WriteBatch each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteBatch(pub Vec<WriteOp>);

impl WriteBatch {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, op: WriteOp) {
        self.0.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WriteOp> {
        self.0.iter()
    }

    /// Collapse the batch into final slot state, last write per path winning.
    /// Useful for hosts (and tests) that only care about the end state of a
    /// tick rather than the individual writes.
    pub fn to_map(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        for op in &self.0 {
            map.insert(op.path.to_string(), op.value.clone());
        }
        map
    }
}

impl FromIterator<WriteOp> for WriteBatch {
    fn from_iter<T: IntoIterator<Item = WriteOp>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
