use approx::assert_relative_eq;
use fnplot::PlotError;
use fnplot::api::PlotConfig;
use fnplot::core::{AxisRange, CanvasGeometry, CurveMode, Namespace};

#[test]
fn axis_triples_parse_with_or_without_parentheses() {
    let range: AxisRange = "(-1,1,0.2)".parse().expect("triple");
    assert_eq!((range.low(), range.high(), range.step()), (-1.0, 1.0, 0.2));

    let range: AxisRange = " -2, 2 , 0.5 ".parse().expect("bare triple");
    assert_eq!((range.low(), range.high(), range.step()), (-2.0, 2.0, 0.5));
}

#[test]
fn axis_triples_accept_math_expressions() {
    let range: AxisRange = "(-pi, pi, pi/4)".parse().expect("expression triple");
    assert_relative_eq!(range.low(), -std::f64::consts::PI);
    assert_relative_eq!(range.step(), std::f64::consts::FRAC_PI_4);

    let range = AxisRange::parse_with("(0, max(2, 3), atan2(1, 1))", &Namespace::math())
        .expect("nested commas");
    assert_eq!(range.high(), 3.0);
}

#[test]
fn inverted_range_is_a_configuration_error() {
    let err = "(1,-1,0.2)".parse::<AxisRange>().expect_err("low > high");
    assert!(matches!(err, PlotError::InvalidConfiguration(_)));
    assert!(matches!(
        AxisRange::new(1.0, -1.0, 0.2),
        Err(PlotError::InvalidConfiguration(_))
    ));
}

#[test]
fn malformed_ranges_are_configuration_errors() {
    for raw in [
        "(-1,1,0)",
        "(-1,1,-0.2)",
        "(1,1,0.1)",
        "(-1,1,3)",
        "(-1,1)",
        "(-1,1,0.2,4)",
        "(a,1,0.2)",
        "(-1,inf,0.2)",
        "",
    ] {
        assert!(
            matches!(raw.parse::<AxisRange>(), Err(PlotError::InvalidConfiguration(_))),
            "`{raw}` should be rejected"
        );
    }
}

#[test]
fn json_config_fills_defaults() {
    let config = PlotConfig::from_json_str(r#"{ "expression": "x**3" }"#).expect("config");
    assert_eq!(config, PlotConfig::new("x**3"));
}

#[test]
fn json_config_round_trips() {
    let config = PlotConfig::new("sin(t)")
        .with_parameter("t")
        .with_x_axis(AxisRange::new(-6.0, 6.0, 1.0).expect("range"))
        .with_grid(true)
        .with_curve_mode(CurveMode::Points)
        .with_canvas(CanvasGeometry::new(320, 200, 10).expect("canvas"));

    let json = config.to_json_string().expect("serialize");
    let restored = PlotConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn json_config_rejects_invalid_ranges() {
    let err = PlotConfig::from_json_str(r#"{ "expression": "x", "x_axis": [1.0, -1.0, 0.2] }"#)
        .expect_err("inverted range");
    assert!(matches!(err, PlotError::InvalidConfiguration(_)));

    let err = PlotConfig::from_json_str(
        r#"{ "expression": "x", "canvas": { "width_px": 0, "height_px": 10 } }"#,
    )
    .expect_err("empty canvas");
    assert!(matches!(err, PlotError::InvalidViewport { .. }));
}
