use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisRange, CoordinateMapper};

/// Accumulated tick values closer to zero than this are snapped to exactly
/// zero so the origin tick lands on the axis line.
pub const ZERO_SNAP_EPSILON: f64 = 1e-12;

/// One labeled position along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub pixel_position: i64,
    pub is_zero: bool,
}

/// Lazy, finite sequence of ticks for one axis.
///
/// Values start at `low` and grow by repeated addition of `step` while they
/// stay `<= high`, so the last tick reproduces the floating-point drift of
/// the accumulation. Cloning the iterator (or calling [`AxisTicks::new`]
/// again) restarts the sequence.
#[derive(Debug, Clone)]
pub struct AxisTicks {
    axis: Axis,
    mapper: CoordinateMapper,
    next_value: f64,
    high: f64,
    step: f64,
}

impl AxisTicks {
    #[must_use]
    pub fn new(axis: Axis, range: AxisRange, mapper: CoordinateMapper) -> Self {
        Self {
            axis,
            mapper,
            next_value: range.low(),
            high: range.high(),
            step: range.step(),
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Iterator for AxisTicks {
    type Item = Tick;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_value > self.high {
            return None;
        }

        // The snapped value also seeds the next accumulation step.
        let is_zero = self.next_value.abs() < ZERO_SNAP_EPSILON;
        if is_zero {
            self.next_value = 0.0;
        }
        let value = self.next_value;
        let next = value + self.step;
        // A step lost to rounding would repeat `value` forever.
        self.next_value = if next > value { next } else { f64::INFINITY };

        Some(Tick {
            value,
            pixel_position: self.mapper.value_to_pixel(self.axis, value),
            is_zero,
        })
    }
}

impl std::iter::FusedIterator for AxisTicks {}

#[cfg(test)]
mod tests {
    use super::AxisTicks;
    use crate::core::{Axis, AxisRange, CanvasGeometry, CoordinateMapper};

    #[test]
    fn snapped_zero_continues_accumulation_from_exact_zero() {
        let range = AxisRange::new(-0.3, 0.3, 0.1).expect("valid range");
        let mapper = CoordinateMapper::new(range, range, CanvasGeometry::default())
            .expect("valid mapper");
        let values: Vec<f64> = AxisTicks::new(Axis::X, range, mapper)
            .map(|tick| tick.value)
            .collect();

        let zero_index = values
            .iter()
            .position(|value| *value == 0.0)
            .expect("zero tick");
        assert_eq!(values[zero_index + 1], 0.1);
    }

    #[test]
    fn cloned_iterator_resumes_from_same_position() {
        let range = AxisRange::default();
        let mapper =
            CoordinateMapper::new(range, range, CanvasGeometry::default()).expect("valid mapper");
        let mut ticks = AxisTicks::new(Axis::Y, range, mapper);
        ticks.next();
        let snapshot = ticks.clone();
        assert_eq!(ticks.count(), snapshot.count());
    }
}
