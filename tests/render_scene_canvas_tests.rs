use biaplot::core::{DataPoint, Extent};
use biaplot::render::{
    Canvas, CanvasHandle, CanvasLayer, Color, ImagePrimitive, PointSetPrimitive, RgbaImage,
    SceneCanvas, SceneItem,
};
use biaplot::PlotError;

fn image(layer: CanvasLayer) -> ImagePrimitive {
    ImagePrimitive {
        image: RgbaImage::transparent(2, 2),
        extent: Extent::new(0.0, 1.0, 0.0, 1.0),
        layer,
        interpolation: "nearest".to_owned(),
        alpha: 1.0,
        visible: true,
    }
}

fn points() -> PointSetPrimitive {
    PointSetPrimitive {
        points: vec![DataPoint::new(0.5, 0.5), DataPoint::new(3.0, -1.0)],
        colors: vec![Color::rgb(1.0, 0.0, 0.0); 2],
        sizes: vec![50.0; 2],
        visible: true,
    }
}

#[test]
fn paint_order_follows_layers_not_insertion() {
    let mut scene = SceneCanvas::new();
    let markers = scene.draw_point_set(points()).expect("points");
    let overlay = scene
        .draw_image(image(CanvasLayer::HistogramOverlay))
        .expect("overlay");
    let counts = scene
        .draw_image(image(CanvasLayer::HistogramCounts))
        .expect("counts");

    let order: Vec<CanvasHandle> = scene
        .paint_order()
        .into_iter()
        .map(|(handle, _)| handle)
        .collect();
    assert_eq!(order, vec![counts, overlay, markers]);
    assert_eq!(
        scene.data_extent(),
        Some(Extent::new(0.0, 3.0, -1.0, 1.0))
    );
}

#[test]
fn hidden_items_are_skipped() {
    let mut scene = SceneCanvas::new();
    let counts = scene
        .draw_image(image(CanvasLayer::HistogramCounts))
        .expect("counts");
    scene.set_visible(counts, false).expect("hide");
    assert!(scene.paint_order().is_empty());
    assert_eq!(scene.data_extent(), None);
    assert_eq!(scene.len(), 1);
}

#[test]
fn handle_kind_is_checked() {
    let mut scene = SceneCanvas::new();
    let markers = scene.draw_point_set(points()).expect("points");
    let counts = scene
        .draw_image(image(CanvasLayer::HistogramCounts))
        .expect("counts");

    assert!(matches!(scene.remove_image(markers), Err(PlotError::InvalidData(_))));
    assert!(matches!(
        scene.update_point_set(counts, points()),
        Err(PlotError::InvalidData(_))
    ));
    assert!(matches!(
        scene.set_visible(CanvasHandle(999), true),
        Err(PlotError::InvalidData(_))
    ));

    scene.remove_image(counts).expect("remove");
    assert!(scene.item(counts).is_none());
    assert!(matches!(scene.remove_image(counts), Err(PlotError::InvalidData(_))));
}

#[test]
fn invalid_primitives_are_rejected() {
    let mut scene = SceneCanvas::new();
    let mut short = points();
    short.sizes.pop();
    assert!(matches!(
        scene.draw_point_set(short),
        Err(PlotError::ShapeMismatch { expected: 2, actual: 1 })
    ));

    let mut faded = image(CanvasLayer::HistogramOverlay);
    faded.alpha = 2.0;
    assert!(matches!(scene.draw_image(faded), Err(PlotError::InvalidData(_))));
    assert!(scene.is_empty());
}

#[test]
fn redraw_requests_are_counted_and_flagged() {
    let mut scene = SceneCanvas::new();
    assert!(!scene.take_redraw_request());
    scene.request_redraw();
    scene.request_redraw();
    assert_eq!(scene.redraw_requests(), 2);
    assert!(scene.take_redraw_request());
    assert!(!scene.take_redraw_request());

    let markers = scene.draw_point_set(points()).expect("points");
    let mut moved = points();
    moved.points[0] = DataPoint::new(-2.0, 0.0);
    scene.update_point_set(markers, moved.clone()).expect("update");
    assert_eq!(scene.item(markers), Some(&SceneItem::PointSet(moved)));
}
