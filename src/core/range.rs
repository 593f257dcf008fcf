use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::expression::{Namespace, evaluate_constant};
use crate::error::{PlotError, PlotResult};

/// Upper bound on the ticks one axis range may produce.
pub const MAX_TICKS_PER_AXIS: f64 = 1_000_000.0;

/// Visible interval of one axis plus the spacing between two labels.
///
/// Serialized as the `[low, high, step]` triple; deserialization goes through
/// [`AxisRange::new`] so a malformed range never reaches the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct AxisRange {
    low: f64,
    high: f64,
    step: f64,
}

impl AxisRange {
    pub fn new(low: f64, high: f64, step: f64) -> PlotResult<Self> {
        if !low.is_finite() || !high.is_finite() || !step.is_finite() {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis range ({low}, {high}, {step}) must be finite"
            )));
        }
        if low >= high {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis range low ({low}) must be below high ({high})"
            )));
        }
        if step <= 0.0 {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis step ({step}) must be > 0"
            )));
        }
        if step > high - low {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis step ({step}) must not exceed the range span ({})",
                high - low
            )));
        }
        // Adding the step must move both ends, otherwise the tick walk stalls.
        if low + step == low || high - step == high {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis step ({step}) is below the float resolution of ({low}, {high})"
            )));
        }
        if (high - low) / step > MAX_TICKS_PER_AXIS {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis step ({step}) yields more than {MAX_TICKS_PER_AXIS} ticks over ({low}, {high})"
            )));
        }
        Ok(Self { low, high, step })
    }

    /// Parses a `(low,high,step)` triple whose components are constant
    /// expressions resolved through `namespace`. Parentheses are optional.
    pub fn parse_with(text: &str, namespace: &Namespace) -> PlotResult<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let parts = split_top_level(inner);
        if parts.len() != 3 {
            return Err(PlotError::InvalidConfiguration(format!(
                "axis range `{text}` must have the form (low,high,step)"
            )));
        }

        let mut values = [0.0; 3];
        for (slot, (name, part)) in values
            .iter_mut()
            .zip(["low", "high", "step"].into_iter().zip(parts))
        {
            *slot = evaluate_constant(part, namespace).map_err(|err| {
                PlotError::InvalidConfiguration(format!(
                    "axis range `{text}`: {name} `{}` is not a number: {err}",
                    part.trim()
                ))
            })?;
        }

        Self::new(values[0], values[1], values[2])
    }

    #[must_use]
    pub fn low(self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn high(self) -> f64 {
        self.high
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.high - self.low
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            low: -1.0,
            high: 1.0,
            step: 0.2,
        }
    }
}

impl FromStr for AxisRange {
    type Err = PlotError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_with(text, &Namespace::math())
    }
}

impl TryFrom<[f64; 3]> for AxisRange {
    type Error = PlotError;

    fn try_from([low, high, step]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(low, high, step)
    }
}

impl From<AxisRange> for [f64; 3] {
    fn from(range: AxisRange) -> Self {
        [range.low, range.high, range.step]
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.low, self.high, self.step)
    }
}

/// Splits on commas that are not nested inside parentheses, so components
/// such as `atan2(1,2)` stay intact.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
