use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

pub const DEFAULT_CANVAS_WIDTH_PX: u32 = 760;
pub const DEFAULT_CANVAS_HEIGHT_PX: u32 = 560;
pub const DEFAULT_CANVAS_MARGIN_PX: u32 = 20;

/// Identifies one of the two Cartesian axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x-axis"),
            Self::Y => f.write_str("y-axis"),
        }
    }
}

/// Pixel dimensions of the plot surface plus the frame drawn around it.
///
/// `width_px`/`height_px` span the mathematical ranges; the outer canvas adds
/// `margin_px` on every side (minus the shared edge pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    pub width_px: u32,
    pub height_px: u32,
    #[serde(default)]
    pub margin_px: u32,
}

impl CanvasGeometry {
    pub fn new(width_px: u32, height_px: u32, margin_px: u32) -> PlotResult<Self> {
        let geometry = Self {
            width_px,
            height_px,
            margin_px,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width_px > 0 && self.height_px > 0
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.width_px,
                height: self.height_px,
            });
        }
        Ok(())
    }

    /// Size of the surface the plot is composed on, including both edges.
    #[must_use]
    pub fn surface_size(self) -> (u32, u32) {
        (self.width_px + 1, self.height_px + 1)
    }

    /// Size of the presented canvas with the frame around the plot surface.
    #[must_use]
    pub fn outer_size(self) -> (u32, u32) {
        (
            (self.width_px + 2 * self.margin_px).saturating_sub(1),
            (self.height_px + 2 * self.margin_px).saturating_sub(1),
        )
    }
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_CANVAS_WIDTH_PX,
            height_px: DEFAULT_CANVAS_HEIGHT_PX,
            margin_px: DEFAULT_CANVAS_MARGIN_PX,
        }
    }
}
