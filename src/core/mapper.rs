use crate::core::{Axis, AxisRange, CanvasGeometry};
use crate::error::{PlotError, PlotResult};

/// Pure bidirectional transform between plot space and surface pixels.
///
/// Pixel rows grow downward while `y` grows upward, so the vertical mapping is
/// flipped. Rounding is half-to-even. Nothing is clamped: values outside the
/// configured ranges map to pixels outside `[0, width]`/`[0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x_low: f64,
    x_span: f64,
    y_low: f64,
    y_span: f64,
    width_px: f64,
    height_px: f64,
}

impl CoordinateMapper {
    pub fn new(x_axis: AxisRange, y_axis: AxisRange, geometry: CanvasGeometry) -> PlotResult<Self> {
        Self::from_bounds(
            (x_axis.low(), x_axis.high()),
            (y_axis.low(), y_axis.high()),
            geometry,
        )
    }

    /// Builds a mapper from raw bounds, rejecting collapsed ranges.
    pub fn from_bounds(
        (x_low, x_high): (f64, f64),
        (y_low, y_high): (f64, f64),
        geometry: CanvasGeometry,
    ) -> PlotResult<Self> {
        geometry.validate()?;
        for (axis, low, high) in [(Axis::X, x_low, x_high), (Axis::Y, y_low, y_high)] {
            let span = high - low;
            if !span.is_finite() || span == 0.0 {
                return Err(PlotError::DegenerateRange { axis, low, high });
            }
        }

        Ok(Self {
            x_low,
            x_span: x_high - x_low,
            y_low,
            y_span: y_high - y_low,
            width_px: f64::from(geometry.width_px),
            height_px: f64::from(geometry.height_px),
        })
    }

    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> i64 {
        to_pixel((x - self.x_low) / self.x_span * self.width_px)
    }

    #[must_use]
    pub fn pixel_to_x(&self, i: i64) -> f64 {
        self.x_low + self.x_span * (i as f64 / self.width_px)
    }

    #[must_use]
    pub fn y_to_pixel(&self, y: f64) -> i64 {
        to_pixel((1.0 - (y - self.y_low) / self.y_span) * self.height_px)
    }

    #[must_use]
    pub fn pixel_to_y(&self, j: i64) -> f64 {
        self.y_low + self.y_span * (1.0 - j as f64 / self.height_px)
    }

    /// Maps a value along `axis` to its pixel coordinate on that axis.
    #[must_use]
    pub fn value_to_pixel(&self, axis: Axis, value: f64) -> i64 {
        match axis {
            Axis::X => self.x_to_pixel(value),
            Axis::Y => self.y_to_pixel(value),
        }
    }

    #[must_use]
    pub fn width_px(&self) -> i64 {
        self.width_px as i64
    }

    #[must_use]
    pub fn height_px(&self) -> i64 {
        self.height_px as i64
    }

    /// Pixel where the vertical axis (`x = 0`) crosses the surface.
    #[must_use]
    pub fn origin_column(&self) -> i64 {
        self.x_to_pixel(0.0)
    }

    /// Pixel where the horizontal axis (`y = 0`) crosses the surface.
    #[must_use]
    pub fn origin_row(&self) -> i64 {
        self.y_to_pixel(0.0)
    }
}

/// Float-to-int conversion saturates for values far outside the canvas.
fn to_pixel(position: f64) -> i64 {
    position.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::CoordinateMapper;
    use crate::core::{AxisRange, CanvasGeometry};

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            AxisRange::default(),
            AxisRange::default(),
            CanvasGeometry::default(),
        )
        .expect("valid mapper")
    }

    #[test]
    fn range_edges_map_to_surface_edges() {
        let mapper = mapper();
        assert_eq!(mapper.x_to_pixel(-1.0), 0);
        assert_eq!(mapper.x_to_pixel(1.0), 760);
        assert_eq!(mapper.y_to_pixel(1.0), 0);
        assert_eq!(mapper.y_to_pixel(-1.0), 560);
        assert_eq!(mapper.origin_column(), 380);
        assert_eq!(mapper.origin_row(), 280);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let mapper = mapper();
        assert_eq!(mapper.x_to_pixel(2.0), 1140);
        assert_eq!(mapper.y_to_pixel(3.0), -560);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        let mapper = CoordinateMapper::from_bounds((0.0, 4.0), (0.0, 4.0), CanvasGeometry {
            width_px: 2,
            height_px: 2,
            margin_px: 0,
        })
        .expect("valid mapper");
        assert_eq!(mapper.x_to_pixel(1.0), 0);
        assert_eq!(mapper.x_to_pixel(3.0), 2);
    }
}
