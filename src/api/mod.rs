mod axis;
mod config;
mod engine;
#[cfg(feature = "cairo-backend")]
mod render_cairo;
mod render_frame_builder;
mod shape_binding;
mod snapshot;

pub use axis::{
    Axis, AxisScales, AxisTick, axis_ticks, compute_scales, draw_axis_lines, draw_axis_ticks,
    format_tick_label,
};
pub use config::{ChartLayout, LoadPlan, PADDING_MARKER_RADIUS, ScatterConfig};
pub use engine::ScatterEngine;
pub use shape_binding::{ReconcileReport, ShapeBindings, ShapeHandle};
pub use snapshot::{
    BoundShape, SCATTER_SNAPSHOT_JSON_SCHEMA_V1, ScatterSnapshot, ScatterSnapshotJsonContractV1,
};
