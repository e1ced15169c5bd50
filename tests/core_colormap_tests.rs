use biaplot::PlotError;
use biaplot::core::{ColorMapping, ColormapSpec, DEFAULT_LUT_SIZE};
use biaplot::render::Color;

#[test]
fn builtin_palettes_expose_size_and_categorical_flag() {
    let magma = ColorMapping::builtin("magma").expect("magma");
    assert!(!magma.is_categorical());
    assert_eq!(magma.size(), DEFAULT_LUT_SIZE);

    let classes = ColorMapping::builtin("cat10_mod").expect("cat10_mod");
    assert!(classes.is_categorical());
    assert_eq!(classes.size(), 10);
    assert!(!classes.entries()[0].is_transparent());

    let first_transparent =
        ColorMapping::builtin("cat10_mod_first_transparent").expect("first transparent");
    assert_eq!(first_transparent.entries()[0], Color::TRANSPARENT);
    assert_eq!(first_transparent.entries()[1], classes.entries()[1]);
}

#[test]
fn unknown_builtin_is_invalid_colormap() {
    let err = ColorMapping::builtin("jet").expect_err("unknown name must fail");
    assert!(matches!(err, PlotError::InvalidColormap(_)));
}

#[test]
fn empty_or_malformed_palettes_are_rejected() {
    let err = ColorMapping::new("empty", Vec::new(), true).expect_err("empty palette");
    assert!(matches!(err, PlotError::InvalidColormap(_)));

    let err = ColorMapping::new("bad", vec![Color::rgba(1.5, 0.0, 0.0, 1.0)], false)
        .expect_err("channel outside [0, 1]");
    assert!(matches!(err, PlotError::InvalidColormap(_)));

    let err = ColorMapping::continuous("single", &[Color::rgb(0.0, 0.0, 0.0)], 16)
        .expect_err("one stop is not a gradient");
    assert!(matches!(err, PlotError::InvalidColormap(_)));
}

#[test]
fn lookup_saturates_and_maps_nan_to_transparent() {
    let palette = ColorMapping::categorical(
        "rgb",
        vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
        ],
    )
    .expect("palette");

    assert_eq!(palette.lookup(-0.5), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(palette.lookup(0.0), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(palette.lookup(0.5), Color::rgb(0.0, 1.0, 0.0));
    assert_eq!(palette.lookup(1.0), Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(palette.lookup(7.0), Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(palette.lookup(f64::NAN), Color::TRANSPARENT);
}

#[test]
fn class_index_over_palette_size_selects_that_entry() {
    let palette = ColorMapping::builtin("cat10_mod").expect("palette");
    let size = palette.size() as f64;
    for (index, expected) in palette.entries().iter().enumerate() {
        assert_eq!(palette.lookup(index as f64 / size), *expected);
    }
}

#[test]
fn specs_resolve_through_try_from() {
    let named = ColorMapping::try_from(ColormapSpec::named("viridis")).expect("viridis");
    assert_eq!(named.name(), "viridis");

    let listed = ColorMapping::try_from(ColormapSpec::Listed {
        name: "pair".to_owned(),
        colors: vec!["#ff0000".to_owned(), "#00ff0080".to_owned()],
        categorical: true,
    })
    .expect("listed");
    assert!(listed.is_categorical());
    assert_eq!(listed.size(), 2);
    assert!((listed.entries()[1].alpha - 128.0 / 255.0).abs() <= 1e-12);

    let continuous = ColorMapping::try_from(ColormapSpec::Continuous {
        name: "ramp".to_owned(),
        stops: vec!["#000000".to_owned(), "#ffffff".to_owned()],
        size: 5,
    })
    .expect("continuous");
    assert!(!continuous.is_categorical());
    assert_eq!(continuous.size(), 5);
    assert_eq!(continuous.entries()[0], Color::rgb(0.0, 0.0, 0.0));
    assert_eq!(continuous.entries()[4], Color::rgb(1.0, 1.0, 1.0));

    let err = ColorMapping::try_from(ColormapSpec::Listed {
        name: "broken".to_owned(),
        colors: vec!["#zzzzzz".to_owned()],
        categorical: true,
    })
    .expect_err("invalid hex");
    assert!(matches!(err, PlotError::InvalidColormap(_)));
}
