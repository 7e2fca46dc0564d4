use std::fmt::Display;

use plotters::backend::DrawingBackend;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle, TextStyle};
use plotters_svg::SVGBackend;

use crate::error::{ScatterError, ScatterResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

const FONT_FAMILY: &str = "Arial";

/// Renders frames into a standalone SVG document held in memory, drawn
/// through plotters' `SVGBackend`.
///
/// Every call to `render` replaces the previous document. The backend works
/// in whole pixels, so coordinates and radii are rounded.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    render_count: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ScatterResult<()> {
        frame.validate()?;
        self.document = write_document(frame)?;
        self.render_count += 1;
        Ok(())
    }
}

fn write_document(frame: &RenderFrame) -> ScatterResult<String> {
    let mut document = String::new();
    {
        let size = (frame.viewport.width, frame.viewport.height);
        let mut backend = SVGBackend::with_string(&mut document, size);
        draw_frame(&mut backend, frame)?;
        backend.present().map_err(svg_error)?;
    }
    Ok(document)
}

fn draw_frame(backend: &mut SVGBackend<'_>, frame: &RenderFrame) -> ScatterResult<()> {
    for line in &frame.lines {
        let style = stroke_style(line.color, line.stroke_width);
        backend
            .draw_line(to_coord(line.x1, line.y1), to_coord(line.x2, line.y2), &style)
            .map_err(svg_error)?;
    }

    for circle in &frame.circles {
        let center = to_coord(circle.cx, circle.cy);
        let radius = to_pixels(circle.radius);
        backend
            .draw_circle(center, radius, &fill_style(circle.fill_color), true)
            .map_err(svg_error)?;
        if circle.stroke_width > 0.0 {
            let outline = stroke_style(circle.stroke_color, circle.stroke_width);
            backend
                .draw_circle(center, radius, &outline, false)
                .map_err(svg_error)?;
        }
    }

    for rect in &frame.rects {
        backend
            .draw_rect(
                to_coord(rect.x, rect.y),
                to_coord(rect.x + rect.width, rect.y + rect.height),
                &fill_style(rect.fill_color),
                true,
            )
            .map_err(svg_error)?;
    }

    for text in &frame.texts {
        let weight = if text.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let h_pos = match text.h_align {
            TextHAlign::Left => HPos::Left,
            TextHAlign::Center => HPos::Center,
            TextHAlign::Right => HPos::Right,
        };
        let color = to_rgba(text.color);
        let style = TextStyle::from(FontDesc::new(
            FontFamily::Name(FONT_FAMILY),
            text.font_size_px,
            weight,
        ))
        .color(&color)
        .pos(Pos::new(h_pos, VPos::Bottom));
        backend
            .draw_text(&text.text, &style, to_coord(text.x, text.y))
            .map_err(svg_error)?;
    }

    Ok(())
}

fn to_rgba(color: Color) -> RGBAColor {
    let to_byte = |value: f64| (value * 255.0).round() as u8;
    RGBAColor(
        to_byte(color.red),
        to_byte(color.green),
        to_byte(color.blue),
        color.alpha,
    )
}

fn fill_style(color: Color) -> ShapeStyle {
    ShapeStyle {
        color: to_rgba(color),
        filled: true,
        stroke_width: 0,
    }
}

fn stroke_style(color: Color, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: to_rgba(color),
        filled: false,
        stroke_width: to_pixels(width),
    }
}

fn to_coord(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

// Zero-sized strokes and radii vanish in the output; keep at least one pixel.
fn to_pixels(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

fn svg_error(err: impl Display) -> ScatterError {
    ScatterError::InvalidData(format!("failed to write svg document: {err}"))
}
