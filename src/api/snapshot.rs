use serde::{Deserialize, Serialize};

use crate::core::{PointId, Viewport, WordPoint};
use crate::error::{ScatterError, ScatterResult};
use crate::interaction::TooltipState;
use crate::render::Renderer;

use super::ScatterEngine;
use super::shape_binding::ShapeHandle;

pub const SCATTER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSnapshot {
    pub viewport: Viewport,
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub points: Vec<WordPoint>,
    /// In bind order.
    pub shapes: Vec<BoundShape>,
    pub hovered: Option<PointId>,
    pub tooltip: TooltipState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundShape {
    pub point: PointId,
    pub shape: ShapeHandle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ScatterSnapshot,
}

impl<R: Renderer> ScatterEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ScatterSnapshot {
        ScatterSnapshot {
            viewport: self.viewport(),
            x_domain: self.scales.map(|scales| scales.x.domain()),
            y_domain: self.scales.map(|scales| scales.y.domain()),
            points: self.store.points().to_vec(),
            shapes: self
                .shapes
                .iter()
                .map(|(point, shape)| BoundShape {
                    point,
                    shape: *shape,
                })
                .collect(),
            hovered: self.hover.hovered(),
            tooltip: self.hover.tooltip().clone(),
        }
    }
}

impl ScatterSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ScatterResult<String> {
        let payload = ScatterSnapshotJsonContractV1 {
            schema_version: SCATTER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScatterError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ScatterResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ScatterSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ScatterSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ScatterError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SCATTER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ScatterError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
