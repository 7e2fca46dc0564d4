use tracing::{debug, trace};

use crate::core::{IngestReport, PointId, PointStore, RawRecord, Viewport, project_points};
use crate::error::ScatterResult;
use crate::interaction::{HitTarget, HoverState, HoverTransition, TooltipState, hit_test};
use crate::render::Renderer;

use super::axis::{AxisScales, compute_scales};
use super::shape_binding::{ReconcileReport, ShapeBindings};
use super::{ChartLayout, ScatterConfig};

/// Owns all chart state: the point store, calibrated scales, shape bindings
/// and hover state, plus the renderer that draws it.
///
/// Every mutation goes through `&mut self`, so a chunk arrival, its ingestion
/// and the render pass it triggers run to completion before the next arrival
/// is looked at.
pub struct ScatterEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ScatterConfig,
    pub(super) store: PointStore,
    pub(super) scales: Option<AxisScales>,
    pub(super) shapes: ShapeBindings,
    pub(super) hover: HoverState,
}

impl<R: Renderer> ScatterEngine<R> {
    pub fn new(renderer: R, config: ScatterConfig) -> ScatterResult<Self> {
        config.validate()?;
        let store = PointStore::new(config.sizing)?;
        Ok(Self {
            renderer,
            config,
            store,
            scales: None,
            shapes: ShapeBindings::new(),
            hover: HoverState::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.config.layout
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.layout.viewport
    }

    #[must_use]
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Scales from the last recalibration; `None` until a point is stored.
    #[must_use]
    pub fn scales(&self) -> Option<AxisScales> {
        self.scales
    }

    #[must_use]
    pub fn shapes(&self) -> &ShapeBindings {
        &self.shapes
    }

    #[must_use]
    pub fn hovered(&self) -> Option<PointId> {
        self.hover.hovered()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.hover.tooltip()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Appends one chunk to the store and runs a full render pass over
    /// everything stored so far.
    ///
    /// The returned error only ever comes from the render pass; the chunk is
    /// stored either way. Use [`Self::ingest_and_render`] to keep the
    /// ingest counts when the render fails.
    pub fn ingest_chunk(&mut self, records: Vec<RawRecord>) -> ScatterResult<IngestReport> {
        let (report, rendered) = self.ingest_and_render(records);
        rendered.map(|()| report)
    }

    /// Same as [`Self::ingest_chunk`], but always hands back the ingest
    /// report next to the outcome of the render pass.
    pub fn ingest_and_render(
        &mut self,
        records: Vec<RawRecord>,
    ) -> (IngestReport, ScatterResult<()>) {
        let report = self.store.ingest(records);
        let rendered = self.render();
        (report, rendered)
    }

    /// Recalibrates both scales from the full store.
    pub fn compute_scales(&mut self) -> ScatterResult<Option<AxisScales>> {
        self.scales = compute_scales(self.store.points(), self.config.layout)?;
        if let Some(scales) = self.scales {
            debug!(
                x_domain = ?scales.x.domain(),
                y_domain = ?scales.y.domain(),
                "recalibrated scales"
            );
        }
        Ok(self.scales)
    }

    /// Moves bound shapes to the current scales and binds any stored point
    /// that has no shape yet. Calling it again without new data changes
    /// nothing.
    pub fn reconcile_points(&mut self) -> ScatterResult<ReconcileReport> {
        let Some(scales) = self.scales else {
            return Ok(ReconcileReport::default());
        };
        let projected = project_points(self.store.points(), scales.x, scales.y)?;
        Ok(self.shapes.reconcile(&self.store, &projected))
    }

    /// Recalibrates, reconciles and draws one frame.
    pub fn render(&mut self) -> ScatterResult<()> {
        self.compute_scales()?;
        let report = self.reconcile_points()?;
        let frame = self.build_render_frame()?;
        trace!(
            circles = frame.circles.len(),
            inserted = report.inserted,
            moved = report.moved,
            "render pass"
        );
        self.renderer.render(&frame)
    }

    /// Hit-tests bound shapes at the pointer and updates hover/tooltip state.
    ///
    /// The hovered shape is hit-tested at its grown hover radius.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> HoverTransition {
        let hovered = self.hover.hovered();
        let targets = self.shapes.iter().map(|(id, shape)| HitTarget {
            id,
            cx: shape.cx,
            cy: shape.cy,
            radius: if Some(id) == hovered {
                shape.hover_radius
            } else {
                shape.radius
            },
        });
        let hit = hit_test(x, y, targets);

        let store = &self.store;
        let transition = self.hover.on_pointer_move(x, y, hit, |id| {
            store
                .get(id)
                .map(|point| point.tooltip_text())
                .unwrap_or_default()
        });
        if !matches!(transition, HoverTransition::None | HoverTransition::Moved(_)) {
            debug!(?transition, "hover changed");
        }
        transition
    }

    pub fn pointer_leave(&mut self) -> HoverTransition {
        self.hover.on_pointer_leave()
    }
}
