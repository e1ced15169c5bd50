#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use biaplot::PlotError;
use biaplot::artists::{Artist, Histogram2D, Histogram2DConfig, Scatter, ScatterConfig};
use biaplot::core::{Viewport, points_from_pairs};
use biaplot::render::{CairoRenderStats, CairoSceneRenderer, Color, SceneCanvas, SharedCanvas, share};

fn populated_scene() -> std::rc::Rc<std::cell::RefCell<SceneCanvas>> {
    let scene = share(SceneCanvas::new());
    let canvas: SharedCanvas = scene.clone();
    let data = points_from_pairs([(0.0, 0.0), (5.0, 2.0), (10.0, 10.0)]);

    let mut histogram =
        Histogram2D::new(canvas.clone(), Histogram2DConfig::default().with_bins(4))
            .expect("histogram");
    histogram.set_data(data.clone()).expect("histogram data");
    let mut scatter = Scatter::new(canvas, ScatterConfig::default()).expect("scatter");
    scatter.set_data(data).expect("scatter data");
    scene
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoSceneRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn cairo_renderer_paints_histogram_layers_and_markers() {
    let scene = populated_scene();
    let mut renderer = CairoSceneRenderer::new(320, 240).expect("renderer");
    renderer.render(&scene.borrow()).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.images_drawn, 2);
    assert_eq!(stats.points_drawn, 3);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let scene = populated_scene();
    let surface = ImageSurface::create(Format::ARgb32, 200, 200).expect("surface");
    let context = Context::new(&surface).expect("context");

    let mut renderer = CairoSceneRenderer::new(1, 1).expect("renderer");
    renderer
        .set_clear_color(Color::rgb(0.0, 0.0, 0.0))
        .expect("clear color");
    renderer
        .render_on_cairo_context(&context, &scene.borrow(), Viewport::new(200, 200))
        .expect("render on context");
    assert_eq!(renderer.last_stats().points_drawn, 3);
}

#[test]
fn empty_scene_only_clears() {
    let scene = SceneCanvas::new();
    let mut renderer = CairoSceneRenderer::new(64, 64).expect("renderer");
    renderer.render(&scene).expect("render");
    assert_eq!(renderer.last_stats(), CairoRenderStats::default());
}
