use crate::error::ScatterResult;
use crate::render::{CairoContextRenderer, Renderer};

use super::ScatterEngine;

impl<R: Renderer + CairoContextRenderer> ScatterEngine<R> {
    /// Full render pass drawn in place on a host-provided Cairo context
    /// instead of the renderer's own surface.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ScatterResult<()> {
        self.compute_scales()?;
        self.reconcile_points()?;
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}
