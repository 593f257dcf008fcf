use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Visual constants of the composed scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_color: Color,
    pub axis_color: Color,
    pub tick_mark_color: Color,
    pub label_color: Color,
    pub curve_color: Color,
    pub label_font_size_px: f64,
    /// Minimum distance between an axis line and a tick label.
    pub axis_label_distance_px: i64,
    /// Half length of a tick mark; marks extend this far on both sides.
    pub tick_mark_half_length_px: i64,
    /// Inset of the axis titles from the surface edge.
    pub axis_title_inset_px: i64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            grid_color: Color::GRAY,
            axis_color: Color::BLACK,
            tick_mark_color: Color::BLACK,
            label_color: Color::BLACK,
            curve_color: Color::RED,
            label_font_size_px: 12.0,
            axis_label_distance_px: 5,
            tick_mark_half_length_px: 2,
            axis_title_inset_px: 10,
        }
    }
}

pub(super) fn validate_render_style(style: RenderStyle) -> PlotResult<RenderStyle> {
    for color in [
        style.background_color,
        style.grid_color,
        style.axis_color,
        style.tick_mark_color,
        style.label_color,
        style.curve_color,
    ] {
        color.validate()?;
    }
    if !style.label_font_size_px.is_finite() || style.label_font_size_px <= 0.0 {
        return Err(PlotError::InvalidConfiguration(
            "label font size must be finite and > 0".to_owned(),
        ));
    }
    if style.axis_label_distance_px < 0
        || style.tick_mark_half_length_px < 0
        || style.axis_title_inset_px < 0
    {
        return Err(PlotError::InvalidConfiguration(
            "label distances and mark sizes must be >= 0".to_owned(),
        ));
    }
    Ok(style)
}
