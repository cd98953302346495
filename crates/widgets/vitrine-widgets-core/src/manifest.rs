//! Page manifest loading.
//!
//! The host page declares its widgets as JSON (typically scraped from
//! markup: class-tagged elements and data attributes) and loads them in one
//! call. Targets arrive as the raw attribute value, a string or a number;
//! validation is strict: a missing, non-numeric or negative target is a load
//! error rather than a silently degraded animation.
//!
//! Example:
//!   {
//!     "counters": [
//!       { "name": "projects", "target": "250",
//!         "rect": { "left": 0.0, "top": 900.0, "width": 300.0, "height": 80.0 } }
//!     ],
//!     "carousels": [
//!       { "name": "testimonials", "slides": 3, "dots": 3 }
//!     ]
//!   }

use serde::Deserialize;
use thiserror::Error;

use crate::carousel::CarouselSpec;
use crate::counter::CounterSpec;
use crate::geometry::Rect;

/// Validated widget declarations ready to register with the engine.
#[derive(Clone, Debug, Default)]
pub struct PageManifest {
    pub counters: Vec<CounterSpec>,
    pub carousels: Vec<CarouselSpec>,
}

/// Errors produced while loading a page manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest parse error: {0}")]
    Parse(String),

    #[error("counter '{name}': missing target attribute")]
    MissingTarget { name: String },

    #[error("counter '{name}': target '{raw}' is not a non-negative integer")]
    InvalidTarget { name: String, raw: String },

    #[error("carousel '{name}': {dots} dots for {slides} slides (want 0 or {slides})")]
    DotCountMismatch {
        name: String,
        dots: u32,
        slides: u32,
    },
}

/// Parse and validate a page manifest from JSON.
pub fn parse_page_manifest_json(s: &str) -> Result<PageManifest, ManifestError> {
    let raw: RawManifest =
        serde_json::from_str(s).map_err(|e| ManifestError::Parse(e.to_string()))?;

    let mut counters = Vec::with_capacity(raw.counters.len());
    for rc in raw.counters {
        let target = validate_target(&rc.name, rc.target.as_ref())?;
        counters.push(CounterSpec {
            name: rc.name,
            target,
            rect: rc.rect.unwrap_or_default(),
        });
    }

    let mut carousels = Vec::with_capacity(raw.carousels.len());
    for rc in raw.carousels {
        let dots = rc.dots.unwrap_or(0);
        if dots != 0 && dots != rc.slides {
            return Err(ManifestError::DotCountMismatch {
                name: rc.name,
                dots,
                slides: rc.slides,
            });
        }
        carousels.push(CarouselSpec {
            name: rc.name,
            slides: rc.slides,
            dots,
        });
    }

    Ok(PageManifest {
        counters,
        carousels,
    })
}

/// Coerce a raw target attribute value into a validated count-up target.
fn validate_target(
    name: &str,
    raw: Option<&serde_json::Value>,
) -> Result<i64, ManifestError> {
    let raw = raw.ok_or_else(|| ManifestError::MissingTarget {
        name: name.to_string(),
    })?;
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(t) if t >= 0 => Ok(t),
        _ => Err(ManifestError::InvalidTarget {
            name: name.to_string(),
            raw: raw.to_string(),
        }),
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    counters: Vec<RawCounter>,
    #[serde(default)]
    carousels: Vec<RawCarousel>,
}

#[derive(Debug, Deserialize)]
struct RawCounter {
    name: String,
    /// Raw attribute value; string or number, validated in `validate_target`.
    #[serde(default)]
    target: Option<serde_json::Value>,
    #[serde(default)]
    rect: Option<Rect>,
}

#[derive(Debug, Deserialize)]
struct RawCarousel {
    name: String,
    slides: u32,
    #[serde(default)]
    dots: Option<u32>,
}
