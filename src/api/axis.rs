use serde::{Deserialize, Serialize};

use crate::core::{LogScale, WordPoint};
use crate::error::ScatterResult;
use crate::render::{Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartLayout;

const AXIS_LINE_WIDTH: f64 = 1.0;
/// Baseline shift that vertically centers y labels on their tick.
const Y_LABEL_BASELINE_SHIFT_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Calibrated scales for the current point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScales {
    /// Page density onto the horizontal pixel range.
    pub x: LogScale,
    /// Book count onto the inverted vertical pixel range.
    pub y: LogScale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

/// Domains are the literal min/max of x and y over `points`, mapped onto the
/// layout's pixel ranges. Returns `Ok(None)` for an empty point set.
pub fn compute_scales(points: &[WordPoint], layout: ChartLayout) -> ScatterResult<Option<AxisScales>> {
    let (x_start, x_end) = layout.x_range();
    let (y_bottom, y_top) = layout.y_range();
    let x = LogScale::from_values(points.iter().map(|point| point.x), x_start, x_end)?;
    let y = LogScale::from_values(points.iter().map(|point| point.y), y_bottom, y_top)?;
    Ok(x.zip(y).map(|(x, y)| AxisScales { x, y }))
}

pub fn axis_ticks(scale: LogScale, tick_count: usize) -> ScatterResult<Vec<AxisTick>> {
    scale
        .ticks(tick_count)
        .into_iter()
        .map(|value| {
            Ok(AxisTick {
                value,
                pixel: scale.value_to_pixel(value)?,
                label: format_tick_label(value),
            })
        })
        .collect()
}

/// Plain decimal for readable magnitudes, exponent form (`1e-300`, `2e7`)
/// outside `[1e-4, 1e6)`.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && magnitude.is_finite() && !(1e-4..1e6).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// The two fixed axis lines: vertical at `x_offset`, horizontal at
/// `height - y_offset`.
#[must_use]
pub fn draw_axis_lines(frame: RenderFrame, layout: ChartLayout) -> RenderFrame {
    let axis_y = layout.height() - layout.y_offset;
    frame
        .with_line(LinePrimitive::new(
            layout.x_offset,
            0.0,
            layout.x_offset,
            axis_y,
            AXIS_LINE_WIDTH,
            Color::RED,
        ))
        .with_line(LinePrimitive::new(
            layout.x_offset,
            axis_y,
            layout.width(),
            axis_y,
            AXIS_LINE_WIDTH,
            Color::RED,
        ))
}

/// Appends one label and one tick mark per tick of `axis`.
pub fn draw_axis_ticks(
    mut frame: RenderFrame,
    axis: Axis,
    scale: LogScale,
    layout: ChartLayout,
) -> ScatterResult<RenderFrame> {
    let tick_count = match axis {
        Axis::X => layout.x_tick_count,
        Axis::Y => layout.y_tick_count,
    };
    let axis_y = layout.height() - layout.y_offset;

    for tick in axis_ticks(scale, tick_count)? {
        let (label, mark) = match axis {
            Axis::X => (
                TextPrimitive::new(
                    tick.label,
                    tick.pixel,
                    layout.height(),
                    layout.label_font_size_px,
                    Color::BLACK,
                    TextHAlign::Center,
                ),
                LinePrimitive::new(
                    tick.pixel,
                    axis_y,
                    tick.pixel,
                    axis_y - layout.tick_mark_length,
                    AXIS_LINE_WIDTH,
                    Color::RED,
                ),
            ),
            Axis::Y => (
                TextPrimitive::new(
                    tick.label,
                    0.0,
                    tick.pixel + Y_LABEL_BASELINE_SHIFT_PX,
                    layout.label_font_size_px,
                    Color::BLACK,
                    TextHAlign::Left,
                ),
                LinePrimitive::new(
                    0.0,
                    tick.pixel,
                    layout.tick_mark_length,
                    tick.pixel,
                    AXIS_LINE_WIDTH,
                    Color::RED,
                ),
            ),
        };
        frame = frame.with_text(label).with_line(mark);
    }

    Ok(frame)
}
