use std::cell::RefCell;
use std::rc::Rc;

use biaplot::artists::{Artist, Histogram2D, Histogram2DConfig, Scatter, ScatterConfig};
use biaplot::core::{ColorIndexUpdate, ColorIndices, DataPoint, HistogramGrid};
use biaplot::render::{SceneCanvas, SharedCanvas, share};
use proptest::prelude::*;

fn point_strategy(max_len: usize) -> impl Strategy<Value = Vec<DataPoint>> {
    prop::collection::vec(
        (-1_000.0f64..1_000.0, -1_000.0f64..1_000.0).prop_map(|(x, y)| DataPoint::new(x, y)),
        1..max_len,
    )
}

fn histogram(bins: usize) -> (Rc<RefCell<SceneCanvas>>, Histogram2D) {
    let scene = share(SceneCanvas::new());
    let canvas: SharedCanvas = scene.clone();
    let histogram =
        Histogram2D::new(canvas, Histogram2DConfig::default().with_bins(bins)).expect("histogram");
    (scene, histogram)
}

proptest! {
    #[test]
    fn color_indices_always_track_data_length(
        first in point_strategy(40),
        second in point_strategy(40),
        class in 0i64..10
    ) {
        let scene = share(SceneCanvas::new());
        let canvas: SharedCanvas = scene.clone();
        let mut scatter = Scatter::new(canvas, ScatterConfig::default()).expect("scatter");

        scatter.set_data(first.clone()).expect("first data");
        scatter.set_color_indices(ColorIndexUpdate::from(class)).expect("broadcast");
        scatter.set_data(second.clone()).expect("second data");

        prop_assert_eq!(scatter.color_indices().len(), second.len());
        prop_assert_eq!(scatter.colors().len(), second.len());

        let kept = first.len().min(second.len());
        let mut expected = vec![class; kept];
        expected.resize(second.len(), 0);
        prop_assert_eq!(scatter.color_indices(), &ColorIndices::Integer(expected));
    }

    #[test]
    fn negative_threshold_returns_every_point_once(
        points in point_strategy(80),
        bins in 1usize..12
    ) {
        let (_scene, mut histogram) = histogram(bins);
        histogram.set_data(points.clone()).expect("set data");

        let mut indices = histogram.indices_in_patches_above_threshold(-1.0);
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn threshold_membership_agrees_with_bin_assignment(
        points in point_strategy(80),
        bins in 1usize..12,
        threshold in 0.0f64..6.0
    ) {
        let grid = HistogramGrid::compute(&points, bins).expect("grid");
        let assignment = grid.assign_bins(&points);

        let mut actual = grid.indices_above_threshold(&points, threshold);
        actual.sort_unstable();
        let expected: Vec<usize> = assignment
            .iter()
            .enumerate()
            .filter(|(_, bin)| grid.counts().get(bin.x, bin.y).unwrap_or(0.0) > threshold)
            .map(|(index, _)| index)
            .collect();
        prop_assert_eq!(actual, expected);

        let total: f64 = grid.counts().values().iter().sum();
        prop_assert_eq!(total as usize, points.len());
    }

    #[test]
    fn repeated_draw_leaves_the_scene_unchanged(
        points in point_strategy(30),
        bins in 1usize..8
    ) {
        let (scene, mut histogram) = histogram(bins);
        histogram.set_data(points).expect("set data");

        let before: Vec<_> = scene
            .borrow()
            .paint_order()
            .into_iter()
            .map(|(handle, item)| (handle, item.clone()))
            .collect();
        histogram.draw();
        histogram.draw();
        let after: Vec<_> = scene
            .borrow()
            .paint_order()
            .into_iter()
            .map(|(handle, item)| (handle, item.clone()))
            .collect();
        prop_assert_eq!(before, after);
    }
}
