use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One word record as served by the chunk endpoint.
///
/// Field names follow the wire format: `W` word text, `Y` book count,
/// `X` page density, `S` relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "W")]
    pub word: String,
    #[serde(rename = "Y")]
    pub book_count: f64,
    #[serde(rename = "X")]
    pub page_density: f64,
    #[serde(rename = "S")]
    pub score: f64,
}

impl RawRecord {
    #[must_use]
    pub fn new(word: impl Into<String>, page_density: f64, book_count: f64, score: f64) -> Self {
        Self {
            word: word.into(),
            book_count,
            page_density,
            score,
        }
    }

    /// Returns the reason this record cannot be plotted on log axes, if any.
    #[must_use]
    pub fn plot_rejection(&self) -> Option<&'static str> {
        if !self.page_density.is_finite() || self.page_density <= 0.0 {
            return Some("page density must be finite and > 0");
        }
        if !self.book_count.is_finite() || self.book_count <= 0.0 {
            return Some("book count must be finite and > 0");
        }
        if !self.score.is_finite() {
            return Some("score must be finite");
        }
        None
    }
}

/// Stable identity of a point: its append position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub usize);

/// Renderable form of one raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPoint {
    pub word: String,
    /// Page density.
    pub x: f64,
    /// Book count.
    pub y: f64,
    pub score: f64,
    pub radius: f64,
    pub hover_radius: f64,
}

impl WordPoint {
    /// Tooltip text shown while the point is hovered.
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        format!(
            "{} : den={}, #bks={}, score={}",
            self.word, self.x, self.y, self.score
        )
    }
}
