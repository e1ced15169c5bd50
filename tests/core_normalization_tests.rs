use approx::assert_relative_eq;
use biaplot::core::{
    ColorMapping, ColorWarning, ColormapTarget, LOG_MIN_VALUE, NormalizationMethod, Normalizer,
    apply_log_floor, map_values_to_colors,
};

#[test]
fn linear_bounds_ignore_nan() {
    let normalizer = Normalizer::fit(NormalizationMethod::Linear, &[1.0, f64::NAN, 3.0]);
    assert_eq!(
        normalizer,
        Normalizer::Linear {
            vmin: 1.0,
            vmax: 3.0
        }
    );
    assert_relative_eq!(normalizer.normalize(2.0), 0.5);
    assert!(normalizer.normalize(f64::NAN).is_nan());
}

#[test]
fn all_nan_input_leaves_normalizer_undefined() {
    let normalizer = Normalizer::fit(NormalizationMethod::Linear, &[f64::NAN, f64::NAN]);
    assert_eq!(normalizer, Normalizer::Undefined);
    assert!(normalizer.normalize(1.0).is_nan());
}

#[test]
fn constant_values_normalize_to_zero() {
    let normalizer = Normalizer::fit(NormalizationMethod::Linear, &[4.0, 4.0]);
    assert_eq!(normalizer.normalize(4.0), 0.0);
}

#[test]
fn log_maps_decades_evenly() {
    let normalizer = Normalizer::fit(NormalizationMethod::Log, &[1.0, 100.0]);
    assert_relative_eq!(normalizer.normalize(10.0), 0.5, epsilon = 1e-12);
    assert!(normalizer.normalize(-1.0).is_nan());
}

#[test]
fn centered_uses_mean_and_widest_side() {
    let normalizer = Normalizer::fit(NormalizationMethod::Centered, &[0.0, 10.0, 2.0]);
    assert_eq!(
        normalizer,
        Normalizer::Centered {
            vcenter: 4.0,
            halfrange: 6.0
        }
    );
    assert_relative_eq!(normalizer.normalize(4.0), 0.5);
    assert_relative_eq!(normalizer.normalize(10.0), 1.0);
    assert_relative_eq!(normalizer.normalize(-2.0), 0.0);
}

#[test]
fn symlog_is_symmetric_around_zero() {
    let normalizer = Normalizer::fit(NormalizationMethod::Symlog, &[-100.0, 100.0]);
    assert_relative_eq!(normalizer.normalize(0.0), 0.5, epsilon = 1e-12);
    let up = normalizer.normalize(10.0) - 0.5;
    let down = 0.5 - normalizer.normalize(-10.0);
    assert_relative_eq!(up, down, epsilon = 1e-12);
    assert_relative_eq!(normalizer.normalize(100.0), 1.0, epsilon = 1e-12);
}

#[test]
fn log_floor_only_applies_when_minimum_is_not_positive() {
    let mut positive = vec![0.5, 2.0];
    let floor = apply_log_floor(&mut positive);
    assert!(!floor.clamped);
    assert_eq!(floor.min_value, 0.5);
    assert_eq!(positive, vec![0.5, 2.0]);

    let mut mixed = vec![-3.0, 0.0, 2.0, f64::NAN];
    let floor = apply_log_floor(&mut mixed);
    assert!(floor.clamped);
    assert_eq!(floor.min_value, LOG_MIN_VALUE);
    assert_eq!(&mixed[..3], &[LOG_MIN_VALUE, LOG_MIN_VALUE, 2.0]);
    assert!(mixed[3].is_nan());
}

#[test]
fn categorical_palette_forces_linear_and_warns() {
    let palette = ColorMapping::builtin("cat10_mod").expect("palette");
    let outcome = map_values_to_colors(
        &[0.0, 1.0, 2.0],
        true,
        &palette,
        NormalizationMethod::Symlog,
        ColormapTarget::Overlay,
    );
    assert_eq!(outcome.method, NormalizationMethod::Linear);
    assert_eq!(
        outcome.warnings,
        vec![ColorWarning::CategoricalForcesLinear {
            target: ColormapTarget::Overlay,
            requested: NormalizationMethod::Symlog,
        }]
    );
    assert_eq!(outcome.colors, palette.entries()[..3].to_vec());
}

#[test]
fn float_tags_on_categorical_palette_warn_but_still_color() {
    let palette = ColorMapping::builtin("cat10_mod").expect("palette");
    let outcome = map_values_to_colors(
        &[0.0, 1.0],
        false,
        &palette,
        NormalizationMethod::Linear,
        ColormapTarget::Histogram,
    );
    assert_eq!(
        outcome.warnings,
        vec![ColorWarning::NonIntegerCategoricalIndices {
            target: ColormapTarget::Histogram
        }]
    );
    assert_eq!(outcome.colors.len(), 2);
}

#[test]
fn out_of_range_class_tags_saturate_with_warning() {
    let palette = ColorMapping::builtin("cat10_mod").expect("palette");
    let outcome = map_values_to_colors(
        &[0.0, 12.0],
        true,
        &palette,
        NormalizationMethod::Linear,
        ColormapTarget::Overlay,
    );
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ColorWarning::CategoricalIndexOutOfRange { palette_size: 10, .. }]
    ));
    assert_eq!(outcome.colors[1], palette.entries()[9]);
}

#[test]
fn warning_messages_name_the_palette_field() {
    let warning = ColorWarning::LogFloorApplied {
        target: ColormapTarget::Overlay,
        min_value: LOG_MIN_VALUE,
    };
    let message = warning.to_string();
    assert!(message.contains("overlay_colormap"));
    assert!(message.contains("0.01"));
}

#[test]
fn method_names_parse_and_print() {
    for method in [
        NormalizationMethod::Linear,
        NormalizationMethod::Log,
        NormalizationMethod::Symlog,
        NormalizationMethod::Centered,
    ] {
        let parsed: NormalizationMethod = method.to_string().parse().expect("parse");
        assert_eq!(parsed, method);
    }
    assert!("power".parse::<NormalizationMethod>().is_err());
}
