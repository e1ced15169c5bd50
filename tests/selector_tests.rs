use biaplot::PlotError;
use biaplot::core::{DataPoint, points_from_pairs};
use biaplot::selectors::{SelectionShape, Selector, SelectorType, ShapeSelector};

fn grid_points() -> Vec<DataPoint> {
    points_from_pairs([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 0.0), (0.0, 3.0)])
}

fn enabled(kind: SelectorType) -> ShapeSelector {
    let mut selector = ShapeSelector::new(kind);
    selector.set_enabled(true);
    selector.update_data(&grid_points());
    selector
}

#[test]
fn rectangle_accepts_corners_in_any_order() {
    let mut selector = enabled(SelectorType::Rectangle);
    let selected = selector
        .select(SelectionShape::Rectangle {
            corner_a: DataPoint::new(2.5, 2.5),
            corner_b: DataPoint::new(0.5, 0.5),
        })
        .expect("select");
    assert_eq!(selected, &[1, 2]);
}

#[test]
fn ellipse_uses_normalized_radius() {
    let mut selector = enabled(SelectorType::Ellipse);
    let selected = selector
        .select(SelectionShape::Ellipse {
            center: DataPoint::new(0.0, 0.0),
            radius_x: 3.0,
            radius_y: 0.5,
        })
        .expect("select");
    assert_eq!(selected, &[0, 3]);
}

#[test]
fn lasso_selects_points_inside_polygon() {
    let mut selector = enabled(SelectorType::Lasso);
    let selected = selector
        .select(SelectionShape::Lasso {
            vertices: points_from_pairs([(-0.5, -0.5), (2.5, -0.5), (2.5, 2.5), (-0.5, 2.5)]),
        })
        .expect("select")
        .to_vec();
    assert_eq!(selected, vec![0, 1, 2]);
}

#[test]
fn data_update_reevaluates_current_shape() {
    let mut selector = enabled(SelectorType::Rectangle);
    selector
        .select(SelectionShape::Rectangle {
            corner_a: DataPoint::new(-1.0, -1.0),
            corner_b: DataPoint::new(0.5, 0.5),
        })
        .expect("select");
    assert_eq!(selector.selected_indices(), &[0]);

    selector.update_data(&points_from_pairs([(5.0, 5.0), (0.1, 0.2), (0.0, 0.0)]));
    assert_eq!(selector.selected_indices(), &[1, 2]);
    assert_eq!(selector.points().len(), 3);
}

#[test]
fn shape_kind_must_match_selector() {
    let mut selector = enabled(SelectorType::Ellipse);
    let err = selector
        .select(SelectionShape::Rectangle {
            corner_a: DataPoint::new(0.0, 0.0),
            corner_b: DataPoint::new(1.0, 1.0),
        })
        .expect_err("wrong kind");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn disabled_selector_refuses_and_clears() {
    let mut selector = enabled(SelectorType::Rectangle);
    selector
        .select(SelectionShape::Rectangle {
            corner_a: DataPoint::new(0.0, 0.0),
            corner_b: DataPoint::new(3.0, 3.0),
        })
        .expect("select");
    assert!(!selector.selected_indices().is_empty());

    selector.set_enabled(false);
    assert!(selector.selected_indices().is_empty());
    assert!(selector.shape().is_none());

    let err = selector
        .select(SelectionShape::Rectangle {
            corner_a: DataPoint::new(0.0, 0.0),
            corner_b: DataPoint::new(3.0, 3.0),
        })
        .expect_err("disabled");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn degenerate_shapes_are_rejected() {
    let mut lasso = enabled(SelectorType::Lasso);
    let err = lasso
        .select(SelectionShape::Lasso {
            vertices: points_from_pairs([(0.0, 0.0), (1.0, 1.0)]),
        })
        .expect_err("two vertices");
    assert!(matches!(err, PlotError::InvalidData(_)));

    let mut ellipse = enabled(SelectorType::Ellipse);
    let err = ellipse
        .select(SelectionShape::Ellipse {
            center: DataPoint::new(0.0, 0.0),
            radius_x: 0.0,
            radius_y: 1.0,
        })
        .expect_err("zero radius");
    assert!(matches!(err, PlotError::InvalidData(_)));
}
