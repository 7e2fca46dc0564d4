use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PointId, PointStore, ProjectedPoint};

/// Drawing-surface handle of one bound point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeHandle {
    /// Allocation sequence number; never reused.
    pub shape_id: u64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub hover_radius: f64,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub moved: usize,
    pub unchanged: usize,
}

/// Keyed binding from stored points to their shapes.
///
/// Shapes are created once per point and then only moved; nothing here ever
/// destroys or recreates a bound shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeBindings {
    shapes: IndexMap<PointId, ShapeHandle>,
    next_shape_id: u64,
}

impl ShapeBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&ShapeHandle> {
        self.shapes.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Shapes in bind order, which is also draw order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &ShapeHandle)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    /// Moves already-bound shapes to their freshly projected centers.
    ///
    /// Projections for unbound points are ignored. Returns `(moved, unchanged)`.
    pub fn update_positions(&mut self, projected: &[ProjectedPoint]) -> (usize, usize) {
        let mut moved = 0;
        let mut unchanged = 0;
        for projection in projected {
            let Some(shape) = self.shapes.get_mut(&projection.id) else {
                continue;
            };
            if shape.cx == projection.cx && shape.cy == projection.cy {
                unchanged += 1;
            } else {
                shape.cx = projection.cx;
                shape.cy = projection.cy;
                moved += 1;
            }
        }
        (moved, unchanged)
    }

    /// Creates shapes for projected points that have none yet, sized from the
    /// stored point. Returns the number of shapes created.
    pub fn insert_unbound(&mut self, store: &PointStore, projected: &[ProjectedPoint]) -> usize {
        let mut inserted = 0;
        for projection in projected {
            if self.shapes.contains_key(&projection.id) {
                continue;
            }
            let Some(point) = store.get(projection.id) else {
                continue;
            };
            let shape = ShapeHandle {
                shape_id: self.next_shape_id,
                cx: projection.cx,
                cy: projection.cy,
                radius: point.radius,
                hover_radius: point.hover_radius,
            };
            self.next_shape_id += 1;
            self.shapes.insert(projection.id, shape);
            inserted += 1;
        }
        inserted
    }

    /// Brings the binding in line with `projected`: existing shapes move,
    /// missing shapes are created.
    pub fn reconcile(&mut self, store: &PointStore, projected: &[ProjectedPoint]) -> ReconcileReport {
        let (moved, unchanged) = self.update_positions(projected);
        let inserted = self.insert_unbound(store, projected);
        trace!(inserted, moved, unchanged, bound = self.shapes.len(), "reconciled shapes");
        ReconcileReport {
            inserted,
            moved,
            unchanged,
        }
    }
}
