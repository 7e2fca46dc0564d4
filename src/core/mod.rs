pub mod log_scale;
pub mod projection;
pub mod store;
pub mod types;

pub use log_scale::LogScale;
pub use projection::{ProjectedPoint, project_points};
pub use store::{IngestReport, MarkerSizing, PointStore, ScoreNormalization, interpolate_radius};
pub use types::{PointId, RawRecord, Viewport, WordPoint};
