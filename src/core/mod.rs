pub mod curve;
pub mod evaluator;
pub mod expression;
pub mod mapper;
pub mod range;
pub mod ticks;
pub mod types;

pub use curve::{Curve, CurveMode, CurveSample, CurveSegment, rasterize_curve};
pub use evaluator::FunctionEvaluator;
pub use expression::{EvalError, Namespace};
pub use mapper::CoordinateMapper;
pub use range::{AxisRange, MAX_TICKS_PER_AXIS};
pub use ticks::{AxisTicks, Tick, ZERO_SNAP_EPSILON};
pub use types::{Axis, CanvasGeometry};
