use serde::{Deserialize, Serialize};

use crate::core::evaluator::validate_parameter_name;
use crate::core::{AxisRange, CanvasGeometry, CurveMode, FunctionEvaluator, Namespace};
use crate::error::{PlotError, PlotResult};

/// Complete description of one plot request.
///
/// This type is serializable so callers can persist and reload a plot setup;
/// every field except `expression` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_parameter")]
    pub parameter: String,
    pub expression: String,
    #[serde(default)]
    pub x_axis: AxisRange,
    #[serde(default)]
    pub y_axis: AxisRange,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default)]
    pub curve_mode: CurveMode,
    #[serde(default)]
    pub canvas: CanvasGeometry,
}

impl PlotConfig {
    /// Creates a config with default axes, canvas and parameter `x`.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            parameter: default_parameter(),
            expression: expression.into(),
            x_axis: AxisRange::default(),
            y_axis: AxisRange::default(),
            show_grid: false,
            curve_mode: CurveMode::default(),
            canvas: CanvasGeometry::default(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = parameter.into();
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, range: AxisRange) -> Self {
        self.x_axis = range;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, range: AxisRange) -> Self {
        self.y_axis = range;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_curve_mode(mut self, mode: CurveMode) -> Self {
        self.curve_mode = mode;
        self
    }

    #[must_use]
    pub fn with_canvas(mut self, canvas: CanvasGeometry) -> Self {
        self.canvas = canvas;
        self
    }

    /// Loads a config from JSON, validating it before returning.
    pub fn from_json_str(raw: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| PlotError::InvalidConfiguration(format!("invalid config json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PlotError::InvalidData(format!("failed to serialize config: {err}")))
    }

    /// Checks every setting so errors surface before any rendering starts.
    pub fn validate(&self) -> PlotResult<()> {
        validate_parameter_name(&self.parameter)?;
        // Ranges built through `AxisRange::new`/serde are already checked;
        // revalidate so a config assembled by hand fails the same way.
        for range in [self.x_axis, self.y_axis] {
            AxisRange::new(range.low(), range.high(), range.step())?;
        }
        self.canvas.validate()?;
        if self.expression.trim().is_empty() {
            return Err(PlotError::InvalidConfiguration(
                "function expression must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Builds the evaluator for this config against the math namespace.
    pub fn evaluator(&self) -> PlotResult<FunctionEvaluator> {
        FunctionEvaluator::new(
            self.expression.clone(),
            self.parameter.clone(),
            Namespace::math(),
        )
    }
}

fn default_parameter() -> String {
    "x".to_owned()
}
