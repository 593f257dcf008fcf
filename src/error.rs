use thiserror::Error;

use crate::core::{Axis, EvalError};

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid expression: {0}")]
    Expression(EvalError),

    #[error("evaluation failed at x={x}: {source}")]
    Evaluation {
        x: f64,
        #[source]
        source: EvalError,
    },

    #[error("degenerate {axis} range: low={low}, high={high}")]
    DegenerateRange { axis: Axis, low: f64, high: f64 },

    #[error("invalid canvas size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
