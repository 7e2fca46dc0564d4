use serde::{Deserialize, Serialize};

use crate::core::{MarkerSizing, Viewport};
use crate::error::{ScatterError, ScatterResult};
use crate::loader::{ReweightRequest, Weights, validate_year};

/// Largest marker radius the plot padding is sized for.
pub const PADDING_MARKER_RADIUS: f64 = 8.0;

/// Drawing-surface geometry and axis styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub viewport: Viewport,
    /// Distance of the vertical axis line from the left edge.
    pub x_offset: f64,
    /// Distance of the horizontal axis line from the bottom edge.
    pub y_offset: f64,
    /// Gap kept between the plotted extent and the axes/edges.
    pub padding: f64,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub tick_mark_length: f64,
    pub label_font_size_px: f64,
    pub tooltip_font_size_px: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1200, 750),
            x_offset: 40.0,
            y_offset: 40.0,
            padding: PADDING_MARKER_RADIUS + 10.0,
            x_tick_count: 5,
            y_tick_count: 4,
            tick_mark_length: 10.0,
            label_font_size_px: 12.0,
            tooltip_font_size_px: 20.0,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn width(self) -> f64 {
        f64::from(self.viewport.width)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        f64::from(self.viewport.height)
    }

    /// Pixel range of the x axis, left to right.
    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (self.x_offset + self.padding, self.width() - self.padding)
    }

    /// Pixel range of the y axis; starts at the bottom so larger values plot higher.
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.height() - self.y_offset - self.padding, self.padding)
    }

    pub fn validate(self) -> ScatterResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ScatterError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [
            ("x_offset", self.x_offset),
            ("y_offset", self.y_offset),
            ("padding", self.padding),
            ("tick_mark_length", self.tick_mark_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScatterError::InvalidConfig(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("label_font_size_px", self.label_font_size_px),
            ("tooltip_font_size_px", self.tooltip_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScatterError::InvalidConfig(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }

        let (x_start, x_end) = self.x_range();
        let (y_bottom, y_top) = self.y_range();
        if x_start >= x_end || y_top >= y_bottom {
            return Err(ScatterError::InvalidConfig(
                "offsets and padding leave no plot area".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Which data to request and from where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPlan {
    pub base_url: String,
    /// Four-digit year the server reweights scores for.
    pub year: String,
    /// Slash-delimited weight vector, for example `0/1/-1/-4`.
    pub weights: String,
    pub window_start: usize,
    pub window_count: usize,
    pub chunk_size: usize,
}

impl Default for LoadPlan {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_owned(),
            year: "2008".to_owned(),
            weights: "0/1/-1/-4".to_owned(),
            window_start: 0,
            window_count: 100,
            chunk_size: 100,
        }
    }
}

impl LoadPlan {
    pub fn validate(&self) -> ScatterResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ScatterError::InvalidConfig(
                "base url must not be empty".to_owned(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(ScatterError::InvalidConfig(
                "chunk size must be > 0".to_owned(),
            ));
        }
        validate_year(&self.year)?;
        self.weights.parse::<Weights>()?;
        Ok(())
    }

    pub fn reweight_request(&self) -> ScatterResult<ReweightRequest> {
        ReweightRequest::new(&self.year, self.weights.parse()?)
    }
}

/// Full bootstrap configuration.
///
/// Serializable so hosts can keep chart setup in a JSON document; every field
/// falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub layout: ChartLayout,
    pub sizing: MarkerSizing,
    pub plan: LoadPlan,
}

impl ScatterConfig {
    pub fn validate(&self) -> ScatterResult<()> {
        self.layout.validate()?;
        self.sizing.validate()?;
        self.plan.validate()
    }

    pub fn from_json_str(input: &str) -> ScatterResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ScatterError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ScatterResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScatterError::InvalidConfig(format!("failed to serialize config json: {e}"))
        })
    }
}
