use approx::assert_relative_eq;
use fnplot::PlotError;
use fnplot::core::{Axis, AxisRange, CanvasGeometry, CoordinateMapper};

fn unit_mapper() -> CoordinateMapper {
    CoordinateMapper::new(
        AxisRange::default(),
        AxisRange::default(),
        CanvasGeometry::default(),
    )
    .expect("valid mapper")
}

#[test]
fn pixel_round_trip_is_exact_across_the_surface() {
    let mapper = unit_mapper();
    for i in 0..=760 {
        assert_eq!(mapper.x_to_pixel(mapper.pixel_to_x(i)), i);
    }
    for j in 0..=560 {
        assert_eq!(mapper.y_to_pixel(mapper.pixel_to_y(j)), j);
    }
}

#[test]
fn vertical_axis_is_flipped() {
    let mapper = unit_mapper();
    assert!(mapper.y_to_pixel(0.5) < mapper.y_to_pixel(-0.5));
    assert_relative_eq!(mapper.pixel_to_y(0), 1.0);
    assert_relative_eq!(mapper.pixel_to_y(560), -1.0);
}

#[test]
fn pixel_to_value_is_linear() {
    let range = AxisRange::new(10.0, 110.0, 10.0).expect("valid range");
    let mapper = CoordinateMapper::new(
        range,
        range,
        CanvasGeometry::new(1000, 500, 0).expect("geometry"),
    )
    .expect("valid mapper");

    assert_relative_eq!(mapper.pixel_to_x(250), 35.0);
    assert_relative_eq!(mapper.pixel_to_y(250), 60.0);
    assert_eq!(mapper.value_to_pixel(Axis::X, 35.0), 250);
    assert_eq!(mapper.value_to_pixel(Axis::Y, 60.0), 250);
}

#[test]
fn collapsed_bounds_are_geometry_errors() {
    let geometry = CanvasGeometry::default();
    let err = CoordinateMapper::from_bounds((1.0, 1.0), (-1.0, 1.0), geometry)
        .expect_err("collapsed x range");
    assert_eq!(
        err,
        PlotError::DegenerateRange {
            axis: Axis::X,
            low: 1.0,
            high: 1.0,
        }
    );

    let err = CoordinateMapper::from_bounds((-1.0, 1.0), (2.0, 2.0), geometry)
        .expect_err("collapsed y range");
    assert!(matches!(err, PlotError::DegenerateRange { axis: Axis::Y, .. }));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let err = CoordinateMapper::from_bounds(
        (-1.0, 1.0),
        (-1.0, 1.0),
        CanvasGeometry {
            width_px: 0,
            height_px: 10,
            margin_px: 0,
        },
    )
    .expect_err("empty canvas");
    assert_eq!(
        err,
        PlotError::InvalidViewport {
            width: 0,
            height: 10
        }
    );
}
