use serde::{Deserialize, Serialize};

use crate::core::{LogScale, PointId, WordPoint};
use crate::error::ScatterResult;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Screen-space center of one stored point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub id: PointId,
    pub cx: f64,
    pub cy: f64,
}

/// Maps every point through the current x/y scales, preserving store order.
pub fn project_points(
    points: &[WordPoint],
    x_scale: LogScale,
    y_scale: LogScale,
) -> ScatterResult<Vec<ProjectedPoint>> {
    #[cfg(feature = "parallel-projection")]
    {
        points
            .par_iter()
            .enumerate()
            .map(|(index, point)| project_one(index, point, x_scale, y_scale))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .enumerate()
            .map(|(index, point)| project_one(index, point, x_scale, y_scale))
            .collect()
    }
}

fn project_one(
    index: usize,
    point: &WordPoint,
    x_scale: LogScale,
    y_scale: LogScale,
) -> ScatterResult<ProjectedPoint> {
    Ok(ProjectedPoint {
        id: PointId(index),
        cx: x_scale.value_to_pixel(point.x)?,
        cy: y_scale.value_to_pixel(point.y)?,
    })
}
