use fnplot::PlotError;
use fnplot::core::{
    AxisRange, CanvasGeometry, CoordinateMapper, CurveMode, EvalError, FunctionEvaluator,
    Namespace, rasterize_curve,
};

fn mapper_for(x_axis: AxisRange, width_px: u32) -> CoordinateMapper {
    CoordinateMapper::new(
        x_axis,
        AxisRange::default(),
        CanvasGeometry::new(width_px, 560, 20).expect("geometry"),
    )
    .expect("valid mapper")
}

fn evaluator(source: &str) -> FunctionEvaluator {
    FunctionEvaluator::new(source, "x", Namespace::math()).expect("evaluator")
}

#[test]
fn parabola_samples_land_on_expected_rows() {
    let mapper = mapper_for(AxisRange::new(-1.0, 1.0, 0.5).expect("range"), 760);
    let mut square = evaluator("x**2");
    let curve = rasterize_curve(&mapper, &mut square, CurveMode::Connected).expect("curve");

    assert_eq!(curve.samples.len(), 760);
    let origin_column = mapper.x_to_pixel(0.0);
    assert_eq!(origin_column, 380);
    let at_origin = curve.samples[origin_column as usize];
    assert_eq!(at_origin.column, 380);
    assert_eq!(at_origin.row, mapper.y_to_pixel(0.0));

    assert_eq!(square.evaluate(1.0), Ok(1.0));
    assert_eq!(mapper.y_to_pixel(1.0), 0);

    let first = curve.samples[0];
    assert_eq!(first.row, mapper.y_to_pixel(1.0));
}

#[test]
fn every_column_is_sampled_in_order() {
    let mapper = mapper_for(AxisRange::default(), 200);
    let curve = rasterize_curve(&mapper, &mut evaluator("sin(pi*x)"), CurveMode::Connected)
        .expect("curve");
    let columns: Vec<i64> = curve.samples.iter().map(|sample| sample.column).collect();
    assert_eq!(columns, (0..200).collect::<Vec<_>>());
}

#[test]
fn rendering_is_deterministic() {
    let mapper = mapper_for(AxisRange::new(-3.0, 3.0, 1.0).expect("range"), 640);
    let first = rasterize_curve(&mapper, &mut evaluator("exp(-x**2) * cos(4*x)"), CurveMode::Connected)
        .expect("curve");
    let second = rasterize_curve(&mapper, &mut evaluator("exp(-x**2) * cos(4*x)"), CurveMode::Connected)
        .expect("curve");
    assert_eq!(first, second);
}

#[test]
fn connected_mode_joins_consecutive_columns() {
    let mapper = mapper_for(AxisRange::default(), 50);
    let curve = rasterize_curve(&mapper, &mut evaluator("x"), CurveMode::Connected).expect("curve");
    let segments = curve.segments();

    assert_eq!(segments.len(), curve.samples.len());
    assert!(segments[0].is_point());
    assert_eq!(segments[0].start, curve.samples[0]);
    for (segment, pair) in segments[1..].iter().zip(curve.samples.windows(2)) {
        assert_eq!(segment.start, pair[0]);
        assert_eq!(segment.end, pair[1]);
    }
}

#[test]
fn point_mode_draws_isolated_samples() {
    let mapper = mapper_for(AxisRange::default(), 50);
    let curve = rasterize_curve(&mapper, &mut evaluator("x**3"), CurveMode::Points).expect("curve");
    let segments = curve.segments();

    assert_eq!(segments.len(), 50);
    for (segment, sample) in segments.iter().zip(&curve.samples) {
        assert!(segment.is_point());
        assert_eq!(segment.start, *sample);
    }
}

#[test]
fn single_column_degenerates_to_a_point_in_both_modes() {
    let mapper = mapper_for(AxisRange::default(), 1);
    for mode in [CurveMode::Connected, CurveMode::Points] {
        let curve = rasterize_curve(&mapper, &mut evaluator("x + 1"), mode).expect("curve");
        let segments = curve.segments();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_point());
    }
}

#[test]
fn reciprocal_at_exact_zero_aborts_the_pass() {
    let mapper = mapper_for(AxisRange::default(), 760);
    assert_eq!(mapper.pixel_to_x(380), 0.0);

    let err = rasterize_curve(&mapper, &mut evaluator("1/x"), CurveMode::Connected)
        .expect_err("division by zero");
    assert_eq!(
        err,
        PlotError::Evaluation {
            x: 0.0,
            source: EvalError::DivisionByZero,
        }
    );
}

#[test]
fn domain_error_reports_first_failing_column() {
    let mapper = mapper_for(AxisRange::default(), 100);
    let err = rasterize_curve(&mapper, &mut evaluator("sqrt(x)"), CurveMode::Points)
        .expect_err("negative input");
    match err {
        PlotError::Evaluation { x, source } => {
            assert_eq!(x, -1.0);
            assert_eq!(source, EvalError::Domain { operation: "sqrt" });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn undefined_name_is_an_evaluation_error() {
    let mapper = mapper_for(AxisRange::default(), 10);
    let err = rasterize_curve(&mapper, &mut evaluator("t * 2"), CurveMode::Connected)
        .expect_err("undefined name");
    assert!(matches!(
        err,
        PlotError::Evaluation {
            source: EvalError::UndefinedName(_),
            ..
        }
    ));
}

#[test]
fn out_of_range_values_map_outside_the_surface() {
    let mapper = mapper_for(AxisRange::default(), 100);
    let curve = rasterize_curve(&mapper, &mut evaluator("10*x"), CurveMode::Connected)
        .expect("curve");
    assert!(curve.samples.iter().any(|sample| sample.row < 0));
    assert!(curve.samples.iter().any(|sample| sample.row > 560));
}
