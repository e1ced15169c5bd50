use biaplot::api::CanvasWidgetConfig;
use biaplot::artists::{Histogram2DConfig, MarkerSize, ScatterConfig};
use biaplot::core::{ColormapSpec, NormalizationMethod, Statistic};
use biaplot::PlotError;

#[test]
fn defaults_match_documented_values() {
    let histogram = Histogram2DConfig::default();
    assert_eq!(histogram.bins, 20);
    assert_eq!(histogram.histogram_colormap, ColormapSpec::named("magma"));
    assert_eq!(
        histogram.overlay_colormap,
        ColormapSpec::named("cat10_mod_first_transparent")
    );
    assert_eq!(histogram.histogram_normalization_method, NormalizationMethod::Linear);
    assert_eq!(histogram.overlay_opacity, 1.0);
    assert!(histogram.overlay_visible);
    assert_eq!(histogram.histogram_interpolation, "nearest");
    assert_eq!(histogram.overlay_statistic, Statistic::Median);

    let scatter = ScatterConfig::default();
    assert_eq!(scatter.overlay_colormap, ColormapSpec::named("cat10_mod"));
    assert_eq!(scatter.marker_size, MarkerSize::Uniform(50.0));

    let widget = CanvasWidgetConfig::default();
    assert_eq!(widget.initial_class, 1);
    assert_eq!(
        widget.scatter.overlay_colormap,
        ColormapSpec::named("cat10_mod_first_transparent")
    );
    widget.validate().expect("defaults are valid");
}

#[test]
fn json_round_trip_keeps_custom_values() {
    let config = CanvasWidgetConfig::default()
        .with_histogram(
            Histogram2DConfig::default()
                .with_bins(32)
                .with_overlay_statistic(Statistic::Sum)
                .with_overlay_opacity(0.5)
                .with_histogram_normalization_method(NormalizationMethod::Log),
        )
        .with_scatter(ScatterConfig::default().with_marker_size(vec![1.0, 2.0]))
        .with_initial_class(4);

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"overlay_statistic\": \"sum\""));
    let parsed = CanvasWidgetConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn empty_object_yields_defaults() {
    let parsed = CanvasWidgetConfig::from_json_str("{}").expect("parse");
    assert_eq!(parsed, CanvasWidgetConfig::default());
}

#[test]
fn listed_and_continuous_palettes_parse() {
    let json = r##"{
        "histogram": {
            "histogram_colormap": { "kind": "continuous", "name": "ramp", "stops": ["#000000", "#ff0000"], "size": 16 },
            "overlay_colormap": { "kind": "listed", "name": "pair", "colors": ["#00000000", "#00ff00"] }
        }
    }"##;
    let parsed = CanvasWidgetConfig::from_json_str(json).expect("parse");
    assert!(matches!(
        parsed.histogram.overlay_colormap,
        ColormapSpec::Listed { categorical: true, .. }
    ));
}

#[test]
fn invalid_values_are_rejected() {
    let err = CanvasWidgetConfig::from_json_str(r#"{ "histogram": { "bins": 0 } }"#)
        .expect_err("zero bins");
    assert!(matches!(err, PlotError::InvalidData(_)));

    let err = CanvasWidgetConfig::from_json_str(
        r#"{ "histogram": { "histogram_colormap": { "kind": "named", "name": "plasma" } } }"#,
    )
    .expect_err("unknown palette");
    assert!(matches!(err, PlotError::InvalidColormap(_)));

    let err = CanvasWidgetConfig::from_json_str(r#"{ "initial_class": 12 }"#)
        .expect_err("class outside palette");
    assert!(matches!(err, PlotError::InvalidData(_)));

    let err = CanvasWidgetConfig::from_json_str(r#"{ "histogram": { "overlay_opacity": 1.5 } }"#)
        .expect_err("opacity");
    assert!(matches!(err, PlotError::InvalidData(_)));

    let err = CanvasWidgetConfig::from_json_str("{ not json").expect_err("syntax");
    assert!(matches!(err, PlotError::InvalidData(_)));
}
