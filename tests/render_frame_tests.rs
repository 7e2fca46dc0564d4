use approx::assert_relative_eq;
use word_scatter::api::{ScatterConfig, ScatterEngine, format_tick_label};
use word_scatter::core::RawRecord;
use word_scatter::render::{
    Color, NullRenderer, RenderFrame, Renderer, SvgRenderer, TextHAlign,
};
use word_scatter::{ScatterError, ScatterResult};

#[derive(Debug, Default)]
struct FrameLog {
    frames: Vec<RenderFrame>,
}

impl Renderer for FrameLog {
    fn render(&mut self, frame: &RenderFrame) -> ScatterResult<()> {
        frame.validate()?;
        self.frames.push(frame.clone());
        Ok(())
    }
}

fn decade_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("w1", 10.0, 5.0, 1.0),
        RawRecord::new("w2", 100.0, 50.0, 2.0),
        RawRecord::new("w3", 1000.0, 500.0, 3.0),
    ]
}

/// Backend that refuses every frame.
#[derive(Debug, Default)]
struct BrokenBackend {
    attempts: usize,
}

impl Renderer for BrokenBackend {
    fn render(&mut self, _frame: &RenderFrame) -> ScatterResult<()> {
        self.attempts += 1;
        Err(ScatterError::InvalidData("backend unavailable".to_owned()))
    }
}

#[test]
fn empty_chart_draws_only_axis_lines() {
    let mut engine =
        ScatterEngine::new(NullRenderer::default(), ScatterConfig::default()).expect("engine");
    engine.render().expect("render");

    assert!(engine.scales().is_none());
    let renderer = engine.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_line_count, 2);
    assert_eq!(renderer.last_circle_count, 0);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn axis_lines_sit_at_configured_offsets() {
    let engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    let frame = engine.build_render_frame().expect("frame");

    let vertical = frame.lines[0];
    assert_eq!((vertical.x1, vertical.y1, vertical.x2, vertical.y2), (40.0, 0.0, 40.0, 710.0));
    let horizontal = frame.lines[1];
    assert_eq!(
        (horizontal.x1, horizontal.y1, horizontal.x2, horizontal.y2),
        (40.0, 710.0, 1200.0, 710.0)
    );
    assert_eq!(vertical.color, Color::RED);
}

#[test]
fn one_chunk_renders_axes_ticks_and_markers() {
    let mut engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    engine.ingest_chunk(decade_records()).expect("ingest");

    let frames = &engine.renderer().frames;
    assert_eq!(frames.len(), 1);
    let frame = &frames[0];

    // Two axis lines, five x tick marks, four y tick marks.
    assert_eq!(frame.lines.len(), 11);
    assert_eq!(frame.texts.len(), 9);
    assert!(frame.rects.is_empty());

    let x_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(x_labels, vec!["10", "50", "100", "500", "1000"]);
    let y_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Left)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(y_labels, vec!["5", "20", "100", "500"]);

    let expected = [(58.0, 692.0, 3.0), (620.0, 355.0, 6.5), (1182.0, 18.0, 10.0)];
    assert_eq!(frame.circles.len(), expected.len());
    for (circle, (cx, cy, radius)) in frame.circles.iter().zip(expected) {
        assert_relative_eq!(circle.cx, cx, epsilon = 1e-9);
        assert_relative_eq!(circle.cy, cy, epsilon = 1e-9);
        assert_relative_eq!(circle.radius, radius, epsilon = 1e-12);
        assert_eq!(circle.fill_color, Color::BLACK);
        assert_eq!(circle.stroke_color, Color::RED);
    }
}

#[test]
fn x_tick_marks_rise_from_horizontal_axis() {
    let mut engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    engine.ingest_chunk(decade_records()).expect("ingest");
    let frame = &engine.renderer().frames[0];

    let first_x_mark = frame.lines[2];
    assert_relative_eq!(first_x_mark.x1, 58.0, epsilon = 1e-9);
    assert_eq!(first_x_mark.y1, 710.0);
    assert_eq!(first_x_mark.y2, 700.0);

    let first_x_label = &frame.texts[0];
    assert_eq!(first_x_label.y, 750.0);
}

#[test]
fn every_chunk_rerenders_all_points_without_duplicates() {
    let mut engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    let records = decade_records();
    engine.ingest_chunk(records[..2].to_vec()).expect("first");
    engine.ingest_chunk(records[2..].to_vec()).expect("second");

    let counts: Vec<usize> = engine
        .renderer()
        .frames
        .iter()
        .map(|frame| frame.circles.len())
        .collect();
    assert_eq!(counts, vec![2, 3]);
}

#[test]
fn hovered_marker_grows_and_tooltip_draws_on_top() {
    let mut engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    engine.ingest_chunk(decade_records()).expect("ingest");
    engine.pointer_move(620.0, 355.0);
    engine.render().expect("render");

    let frame = engine.renderer().frames.last().expect("frame");
    let hovered = frame.circles[1];
    assert_eq!(hovered.fill_color, Color::BLUE);
    assert_relative_eq!(hovered.radius, 11.7, epsilon = 1e-9);
    assert_eq!(frame.circles[0].fill_color, Color::BLACK);

    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.rects[0].fill_color, Color::LIGHT_GREY);
    assert_eq!(frame.rects[0].x, 635.0);

    let tooltip = frame.texts.last().expect("tooltip text");
    assert_eq!(tooltip.text, "w2 : den=100, #bks=50, score=2");
    assert_eq!(tooltip.color, Color::GREEN);
    assert!(tooltip.bold);
}

#[test]
fn svg_renderer_writes_one_element_per_primitive() {
    let mut engine = ScatterEngine::new(SvgRenderer::new(), ScatterConfig::default()).expect("engine");
    engine.ingest_chunk(decade_records()).expect("ingest");

    let document = engine.renderer().document();
    assert!(document.starts_with("<svg"));
    assert!(document.contains("width=\"1200\""));
    assert!(document.contains("height=\"750\""));
    assert!(document.trim_end().ends_with("</svg>"));
    // Each marker is a filled disc plus its outline.
    assert_eq!(document.matches("<circle").count(), 6);
    assert_eq!(document.matches("<line").count(), 11);
    assert_eq!(document.matches("<text").count(), 9);

    let lowered = document.to_ascii_lowercase();
    assert!(lowered.contains("fill=\"#000000\""));
    assert!(lowered.contains("stroke=\"#ff0000\""));
    assert!(document.contains("1000</text>"));
    assert_eq!(engine.renderer().render_count(), 1);
}

#[test]
fn svg_renderer_escapes_tooltip_markup() {
    let mut engine = ScatterEngine::new(SvgRenderer::new(), ScatterConfig::default()).expect("engine");
    engine
        .ingest_chunk(vec![RawRecord::new("<b>&", 10.0, 5.0, 1.0)])
        .expect("ingest");
    let (cx, cy) = {
        let (_, shape) = engine.shapes().iter().next().expect("bound shape");
        (shape.cx, shape.cy)
    };
    engine.pointer_move(cx, cy);
    engine.render().expect("render");

    let document = engine.renderer().document();
    assert!(!document.contains("<b>&"));
    assert!(document.contains("&lt;b&gt;&amp;"));
    assert!(document.contains("<rect"));
}

#[test]
fn failed_render_still_reports_ingested_chunk() {
    let mut engine =
        ScatterEngine::new(BrokenBackend::default(), ScatterConfig::default()).expect("engine");
    let mut records = decade_records();
    records.push(RawRecord::new("zero", 0.0, 5.0, 1.0));

    let (report, rendered) = engine.ingest_and_render(records);

    assert_eq!(report.accepted, 3);
    assert_eq!(report.rejected, 1);
    assert!(matches!(rendered, Err(ScatterError::InvalidData(_))));
    assert_eq!(engine.store().len(), 3);
    assert_eq!(engine.renderer().attempts, 1);

    assert!(engine.ingest_chunk(decade_records()).is_err());
    assert_eq!(engine.store().len(), 6);
}

#[test]
fn tick_labels_switch_to_exponent_form_at_extreme_magnitudes() {
    assert_eq!(format_tick_label(1e-300), "1e-300");
    assert_eq!(format_tick_label(1e7), "1e7");
    assert_eq!(format_tick_label(2e-5), "2e-5");
    assert_eq!(format_tick_label(500.0), "500");
    assert_eq!(format_tick_label(0.001), "0.001");
    assert_eq!(format_tick_label(0.0), "0");

    let mut engine = ScatterEngine::new(FrameLog::default(), ScatterConfig::default()).expect("engine");
    engine
        .ingest_chunk(vec![
            RawRecord::new("rare", 1e-300, 5.0, 1.0),
            RawRecord::new("rarer", 1e-298, 50.0, 2.0),
        ])
        .expect("ingest");
    let frame = &engine.renderer().frames[0];
    let x_labels: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| text.text.as_str())
        .collect();
    assert!(!x_labels.is_empty());
    assert!(x_labels.iter().all(|label| label.contains("e-") && label.len() < 30));
}

#[test]
fn invalid_viewport_is_rejected_at_construction() {
    let mut config = ScatterConfig::default();
    config.layout.viewport.width = 0;
    assert!(ScatterEngine::new(NullRenderer::default(), config).is_err());
}
