//! SlotPath parsing and formatting.
//!
//! Grammar (simple, host-agnostic):
//!   widget.index/slot[.slot_index]
//! - The first segment names a widget instance: a kind word and a numeric
//!   instance index joined by '.'
//! - The second segment names a slot on that widget, with an optional
//!   numeric index for per-item slots
//!   Examples:
//!   "carousel.0/slide.2" -> widget="carousel", index=0, slot="slide", slot_index=2
//!   "carousel.0/dot.1"   -> the second pagination dot of the first carousel
//!   "counter.3/value"    -> the numeric display slot of the fourth counter
//!
//! SlotPath is intentionally simple and string-based; adapters resolve it
//! into host-specific element handles during prebind.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotPath {
    /// Widget kind word ("counter", "carousel")
    pub widget: String,
    /// Widget instance index
    pub index: u32,
    /// Slot name on the widget ("value", "animate", "slide", "dot")
    pub slot: String,
    /// Optional per-item index for indexed slots
    pub slot_index: Option<u32>,
}

impl SlotPath {
    /// Construct a SlotPath from components.
    pub fn new(
        widget: impl Into<String>,
        index: u32,
        slot: impl Into<String>,
        slot_index: Option<u32>,
    ) -> Self {
        Self {
            widget: widget.into(),
            index,
            slot: slot.into(),
            slot_index,
        }
    }

    /// Parse a path string according to the grammar described above.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("empty slot path".to_string());
        }
        let mut parts = s.split('/');
        let widget_seg = parts.next().unwrap_or_default();
        let slot_seg = parts
            .next()
            .ok_or_else(|| "slot path needs a '/' separator".to_string())?;
        if parts.next().is_some() {
            return Err("slot path has too many '/' segments".to_string());
        }

        let (widget, index) = split_indexed(widget_seg)?;
        let index =
            index.ok_or_else(|| "widget segment needs a numeric instance index".to_string())?;
        let (slot, slot_index) = split_indexed(slot_seg)?;

        Ok(SlotPath {
            widget,
            index,
            slot,
            slot_index,
        })
    }
}

/// Split "name" or "name.N" into (name, Option<N>).
fn split_indexed(seg: &str) -> Result<(String, Option<u32>), String> {
    if seg.is_empty() {
        return Err("empty path segment".to_string());
    }
    if seg.chars().any(char::is_whitespace) {
        return Err(format!("segment contains whitespace: '{seg}'"));
    }
    match seg.split_once('.') {
        None => Ok((seg.to_string(), None)),
        Some((name, idx)) => {
            if name.is_empty() {
                return Err(format!("segment has empty name: '{seg}'"));
            }
            let n: u32 = idx
                .parse()
                .map_err(|_| format!("segment index is not numeric: '{seg}'"))?;
            Ok((name.to_string(), Some(n)))
        }
    }
}

impl fmt::Display for SlotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{}", self.widget, self.index, self.slot)?;
        if let Some(i) = self.slot_index {
            write!(f, ".{i}")?;
        }
        Ok(())
    }
}

impl FromStr for SlotPath {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotPath::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for SlotPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotPath {
    fn deserialize<D>(deserializer: D) -> Result<SlotPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SlotPath::parse(&s).map_err(de::Error::custom)
    }
}
