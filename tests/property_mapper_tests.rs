use fnplot::core::{CanvasGeometry, CoordinateMapper};
use proptest::prelude::*;

proptest! {
    #[test]
    fn column_round_trip_property(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        width in 1u32..4096,
        factor in 0.0f64..=1.0
    ) {
        let geometry = CanvasGeometry::new(width, 480, 0).expect("geometry");
        let mapper = CoordinateMapper::from_bounds((low, low + span), (-1.0, 1.0), geometry)
            .expect("valid mapper");

        let i = (factor * f64::from(width)).floor() as i64;
        let recovered = mapper.x_to_pixel(mapper.pixel_to_x(i));
        prop_assert!((recovered - i).abs() <= 1);
    }

    #[test]
    fn row_round_trip_property(
        low in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        height in 1u32..4096,
        factor in 0.0f64..=1.0
    ) {
        let geometry = CanvasGeometry::new(640, height, 0).expect("geometry");
        let mapper = CoordinateMapper::from_bounds((-1.0, 1.0), (low, low + span), geometry)
            .expect("valid mapper");

        let j = (factor * f64::from(height)).floor() as i64;
        let recovered = mapper.y_to_pixel(mapper.pixel_to_y(j));
        prop_assert!((recovered - j).abs() <= 1);
    }

    #[test]
    fn x_mapping_is_monotonic(
        a in -10.0f64..10.0,
        b in -10.0f64..10.0
    ) {
        let mapper = CoordinateMapper::from_bounds(
            (-10.0, 10.0),
            (-10.0, 10.0),
            CanvasGeometry::default(),
        )
        .expect("valid mapper");
        if a <= b {
            prop_assert!(mapper.x_to_pixel(a) <= mapper.x_to_pixel(b));
            prop_assert!(mapper.y_to_pixel(a) >= mapper.y_to_pixel(b));
        }
    }
}
