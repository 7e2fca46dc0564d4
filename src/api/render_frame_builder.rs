use crate::error::ScatterResult;
use crate::render::{
    CirclePrimitive, Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::ScatterEngine;
use super::axis::{Axis, draw_axis_lines, draw_axis_ticks};

const MARKER_STROKE_WIDTH: f64 = 1.0;
const TOOLTIP_PADDING_PX: f64 = 4.0;

impl<R: Renderer> ScatterEngine<R> {
    /// Materializes backend-agnostic primitives for the current state.
    ///
    /// Uses the scales and shape bindings as they stand; `render` refreshes
    /// both before calling this.
    pub fn build_render_frame(&self) -> ScatterResult<RenderFrame> {
        let layout = self.config.layout;
        let mut frame = draw_axis_lines(RenderFrame::new(layout.viewport), layout);

        if let Some(scales) = self.scales {
            frame = draw_axis_ticks(frame, Axis::X, scales.x, layout)?;
            frame = draw_axis_ticks(frame, Axis::Y, scales.y, layout)?;
        }

        let hovered = self.hover.hovered();
        for (id, shape) in self.shapes.iter() {
            let (radius, fill) = if Some(id) == hovered {
                (shape.hover_radius, Color::BLUE)
            } else {
                (shape.radius, Color::BLACK)
            };
            frame = frame.with_circle(CirclePrimitive::new(
                shape.cx,
                shape.cy,
                radius,
                fill,
                Color::RED,
                MARKER_STROKE_WIDTH,
            ));
        }

        let tooltip = self.hover.tooltip();
        if tooltip.visible && !tooltip.text.is_empty() {
            let font_size = layout.tooltip_font_size_px;
            let width = estimate_text_width_px(&tooltip.text, font_size) + 2.0 * TOOLTIP_PADDING_PX;
            let height = font_size + 2.0 * TOOLTIP_PADDING_PX;
            frame = frame
                .with_rect(RectPrimitive::new(
                    tooltip.left,
                    tooltip.top,
                    width,
                    height,
                    Color::LIGHT_GREY,
                ))
                .with_text(
                    TextPrimitive::new(
                        tooltip.text.clone(),
                        tooltip.left + TOOLTIP_PADDING_PX,
                        tooltip.top + TOOLTIP_PADDING_PX + font_size * 0.8,
                        font_size,
                        Color::GREEN,
                        TextHAlign::Left,
                    )
                    .bold(),
                );
        }

        Ok(frame)
    }
}

// Deterministic and backend-independent, so frames compare equal across runs.
fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '=' | ':' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}
