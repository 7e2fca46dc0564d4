//! word-scatter: incrementally loaded log-log scatter chart of word-frequency data.
//!
//! Words are plotted by page density (x) against book count (y), both on
//! logarithmic axes, with marker size proportional to a relevance score.
//! Data arrives in independently fetched chunks; every arrival recalibrates
//! the scales and reconciles point-to-shape bindings without redrawing shapes
//! that already exist.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod loader;
pub mod render;
pub mod telemetry;

pub use api::{ScatterConfig, ScatterEngine};
pub use error::{ScatterError, ScatterResult};
