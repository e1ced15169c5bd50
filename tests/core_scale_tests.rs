use biaplot::PlotError;
use biaplot::core::{DataPoint, Extent, LinearScale, PlotTransform, Viewport};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let original = 42.5;
    let px = scale.domain_to_pixel(original, 1000.0).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, 1000.0).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn zero_span_scale_is_rejected_but_covering_widens() {
    assert!(LinearScale::new(1.0, 1.0).is_err());
    let scale = LinearScale::covering(1.0, 1.0).expect("covering");
    assert_eq!(scale.domain(), (0.0, 2.0));
}

#[test]
fn transform_flips_the_y_axis() {
    let transform =
        PlotTransform::new(Extent::new(0.0, 10.0, 0.0, 10.0), Viewport::new(100, 50))
            .expect("transform");

    let (px, py) = transform
        .data_to_pixel(DataPoint::new(0.0, 10.0))
        .expect("top left");
    assert_eq!((px, py), (0.0, 0.0));

    let (px, py) = transform
        .data_to_pixel(DataPoint::new(10.0, 0.0))
        .expect("bottom right");
    assert_eq!((px, py), (100.0, 50.0));

    let back = transform.pixel_to_data(25.0, 25.0).expect("back");
    assert!((back.x - 2.5).abs() <= 1e-9);
    assert!((back.y - 5.0).abs() <= 1e-9);
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = PlotTransform::new(Extent::new(0.0, 1.0, 0.0, 1.0), Viewport::new(0, 0))
        .expect_err("zero viewport");
    assert!(matches!(
        err,
        PlotError::InvalidViewport {
            width: 0,
            height: 0
        }
    ));
}

#[test]
fn extent_of_points_skips_non_finite_values() {
    let points = [
        DataPoint::new(1.0, 2.0),
        DataPoint::new(f64::NAN, 100.0),
        DataPoint::new(-3.0, 5.0),
    ];
    let extent = Extent::from_points(&points).expect("extent");
    assert_eq!(extent, Extent::new(-3.0, 1.0, 2.0, 5.0));
    assert!(Extent::from_points(&[]).is_none());
}
