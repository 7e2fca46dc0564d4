use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PointId;

/// Horizontal gap between the pointer and the tooltip's left edge.
pub const TOOLTIP_POINTER_OFFSET_X: f64 = 15.0;

/// Current on-screen footprint of one bound shape, as seen by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    pub id: PointId,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Overlay shown next to the pointer while a shape is hovered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub text: String,
    pub left: f64,
    pub top: f64,
}

/// What changed in response to one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverTransition {
    /// Nothing hovered before or after.
    None,
    Entered(PointId),
    /// Pointer moved while staying over the same shape.
    Moved(PointId),
    Left(PointId),
    Switched { from: PointId, to: PointId },
}

/// Picks the shape under the pointer.
///
/// Among shapes whose disc contains the pointer the nearest center wins; ties
/// go to the shape bound last, since it is drawn on top.
#[must_use]
pub fn hit_test(x: f64, y: f64, targets: impl IntoIterator<Item = HitTarget>) -> Option<PointId> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let mut candidates: SmallVec<[(OrderedFloat<f64>, Reverse<PointId>); 4]> = SmallVec::new();
    for target in targets {
        let distance = (target.cx - x).hypot(target.cy - y);
        if distance <= target.radius {
            candidates.push((OrderedFloat(distance), Reverse(target.id)));
        }
    }

    candidates
        .into_iter()
        .min()
        .map(|(_, Reverse(id))| id)
}

/// Pointer hover state of the chart. Holds no data beyond the current event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoverState {
    hovered: Option<PointId>,
    tooltip: TooltipState,
}

impl HoverState {
    #[must_use]
    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Applies a pointer move whose hit-test resolved to `hit`.
    ///
    /// `tooltip_text` is only consulted when a shape ends up hovered.
    pub fn on_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        hit: Option<PointId>,
        tooltip_text: impl FnOnce(PointId) -> String,
    ) -> HoverTransition {
        let previous = self.hovered;
        self.hovered = hit;

        match hit {
            Some(id) => {
                if previous != Some(id) || !self.tooltip.visible {
                    self.tooltip.text = tooltip_text(id);
                }
                self.tooltip.visible = true;
                self.tooltip.left = x + TOOLTIP_POINTER_OFFSET_X;
                self.tooltip.top = y;
            }
            None => self.hide_tooltip(),
        }

        match (previous, hit) {
            (None, None) => HoverTransition::None,
            (None, Some(to)) => HoverTransition::Entered(to),
            (Some(from), None) => HoverTransition::Left(from),
            (Some(from), Some(to)) if from == to => HoverTransition::Moved(to),
            (Some(from), Some(to)) => HoverTransition::Switched { from, to },
        }
    }

    /// Pointer left the drawing surface.
    pub fn on_pointer_leave(&mut self) -> HoverTransition {
        self.hide_tooltip();
        match self.hovered.take() {
            Some(from) => HoverTransition::Left(from),
            None => HoverTransition::None,
        }
    }

    fn hide_tooltip(&mut self) {
        self.tooltip.visible = false;
        self.tooltip.text.clear();
    }
}
