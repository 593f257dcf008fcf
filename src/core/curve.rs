#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CoordinateMapper, FunctionEvaluator};
use crate::error::PlotResult;

/// How consecutive curve samples are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CurveMode {
    /// Adjacent columns are joined by straight segments.
    #[default]
    Connected,
    /// Every sample is an isolated point.
    Points,
}

/// Curve sample in surface pixels: one per canvas column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveSample {
    pub column: i64,
    pub row: i64,
}

/// Segment to stroke for the curve. `start == end` marks a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub start: CurveSample,
    pub end: CurveSample,
}

impl CurveSegment {
    #[must_use]
    pub fn is_point(self) -> bool {
        self.start == self.end
    }
}

/// Ordered samples of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    pub mode: CurveMode,
    pub samples: Vec<CurveSample>,
}

impl Curve {
    /// Expands the samples into drawable segments.
    ///
    /// In connected mode the first sample has no predecessor and degenerates
    /// to a point; every later sample is joined to the previous column.
    #[must_use]
    pub fn segments(&self) -> Vec<CurveSegment> {
        let mut segments = Vec::with_capacity(self.samples.len());
        let mut previous: Option<CurveSample> = None;
        for sample in &self.samples {
            let start = match (self.mode, previous) {
                (CurveMode::Connected, Some(previous)) => previous,
                _ => *sample,
            };
            segments.push(CurveSegment {
                start,
                end: *sample,
            });
            previous = Some(*sample);
        }
        segments
    }
}

/// Samples the function once per pixel column `0..width`.
///
/// Fails fast: the first column whose evaluation fails aborts the pass and no
/// samples are returned. Output is a pure function of the mapper, formula and
/// mode.
pub fn rasterize_curve(
    mapper: &CoordinateMapper,
    evaluator: &mut FunctionEvaluator,
    mode: CurveMode,
) -> PlotResult<Curve> {
    let columns = 0..mapper.width_px();

    // Workers each sample with their own evaluator clone; collecting into a
    // `Vec` keeps column order, so the reported error is the lowest failing
    // column, as in the serial path.
    #[cfg(feature = "parallel-projection")]
    let sampled: PlotResult<Vec<CurveSample>> = {
        let template = &*evaluator;
        let results: Vec<PlotResult<CurveSample>> = columns
            .into_par_iter()
            .map_init(|| template.clone(), |worker, column| {
                sample_column(mapper, worker, column)
            })
            .collect();
        results.into_iter().collect()
    };

    #[cfg(not(feature = "parallel-projection"))]
    let sampled: PlotResult<Vec<CurveSample>> = columns
        .map(|column| sample_column(mapper, evaluator, column))
        .collect();

    let samples = sampled.inspect_err(|err| {
        warn!(error = %err, expression = evaluator.source(), "curve sampling aborted");
    })?;

    debug!(samples = samples.len(), ?mode, "rasterized curve");
    Ok(Curve { mode, samples })
}

fn sample_column(
    mapper: &CoordinateMapper,
    evaluator: &mut FunctionEvaluator,
    column: i64,
) -> PlotResult<CurveSample> {
    let x = mapper.pixel_to_x(column);
    let y = evaluator.evaluate(x)?;
    Ok(CurveSample {
        column,
        row: mapper.y_to_pixel(y),
    })
}

#[cfg(test)]
mod tests {
    use super::{Curve, CurveMode, CurveSample};

    fn sample(column: i64, row: i64) -> CurveSample {
        CurveSample { column, row }
    }

    #[test]
    fn connected_segments_chain_columns() {
        let curve = Curve {
            mode: CurveMode::Connected,
            samples: vec![sample(0, 5), sample(1, 7), sample(2, 6)],
        };
        let segments = curve.segments();
        assert_eq!(segments.len(), 3);
        assert!(segments[0].is_point());
        assert_eq!(segments[1].start, sample(0, 5));
        assert_eq!(segments[1].end, sample(1, 7));
        assert_eq!(segments[2].start, sample(1, 7));
    }

    #[test]
    fn point_mode_never_connects_neighbors() {
        let curve = Curve {
            mode: CurveMode::Points,
            samples: vec![sample(0, 5), sample(1, 7)],
        };
        assert!(curve.segments().iter().all(|segment| segment.is_point()));
    }
}
