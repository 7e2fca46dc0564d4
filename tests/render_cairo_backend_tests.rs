#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use word_scatter::ScatterError;
use word_scatter::api::{ScatterConfig, ScatterEngine};
use word_scatter::core::RawRecord;
use word_scatter::render::CairoRenderer;

fn decade_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("w1", 10.0, 5.0, 1.0),
        RawRecord::new("w2", 100.0, 50.0, 2.0),
        RawRecord::new("w3", 1000.0, 500.0, 3.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ScatterError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_axes_ticks_and_markers() {
    let renderer = CairoRenderer::new(1200, 750).expect("renderer");
    let mut engine = ScatterEngine::new(renderer, ScatterConfig::default()).expect("engine init");
    engine.ingest_chunk(decade_records()).expect("ingest");

    let stats = engine.into_renderer().last_stats();
    assert_eq!(stats.lines_drawn, 11);
    assert_eq!(stats.circles_drawn, 3);
    assert_eq!(stats.rects_drawn, 0);
    assert_eq!(stats.texts_drawn, 9);
}

#[test]
fn cairo_renderer_draws_tooltip_while_hovering() {
    let renderer = CairoRenderer::new(1200, 750).expect("renderer");
    let mut engine = ScatterEngine::new(renderer, ScatterConfig::default()).expect("engine init");
    engine.ingest_chunk(decade_records()).expect("ingest");
    engine.pointer_move(620.0, 355.0);
    engine.render().expect("render");

    let stats = engine.into_renderer().last_stats();
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.texts_drawn, 10);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(1200, 750).expect("renderer");
    let mut engine = ScatterEngine::new(renderer, ScatterConfig::default()).expect("engine init");
    engine.ingest_chunk(decade_records()).expect("ingest");

    let surface = ImageSurface::create(Format::ARgb32, 1200, 750).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context)
        .expect("render on context");

    assert_eq!(engine.into_renderer().last_stats().circles_drawn, 3);
}
