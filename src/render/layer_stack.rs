use serde::{Deserialize, Serialize};

/// Scene layers in paint order; later layers overdraw earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneLayerKind {
    Background,
    Grid,
    TickMarks,
    TickLabels,
    AxisTitles,
    Axes,
    Curve,
}

impl SceneLayerKind {
    /// Axis lines sit above the grid and the curve above everything else.
    pub const CANONICAL_ORDER: [Self; 7] = [
        Self::Background,
        Self::Grid,
        Self::TickMarks,
        Self::TickLabels,
        Self::AxisTitles,
        Self::Axes,
        Self::Curve,
    ];

    #[must_use]
    pub fn paint_index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Grid => 1,
            Self::TickMarks => 2,
            Self::TickLabels => 3,
            Self::AxisTitles => 4,
            Self::Axes => 5,
            Self::Curve => 6,
        }
    }
}
