use tracing::{debug, trace};

use crate::core::{Axis, AxisTicks, CoordinateMapper, Curve, Tick, rasterize_curve};
use crate::error::PlotResult;
use crate::render::{
    LinePrimitive, RectPrimitive, RenderFrame, SceneLayerKind, TextHAlign, TextPrimitive,
    TextVAlign,
};

use super::axis_label_format::format_tick_label;
use super::{PlotConfig, RenderStyle};

/// Everything produced by one composition pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    pub frame: RenderFrame,
    pub curve: Curve,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

/// Builds the layered scene for a plot request.
///
/// The curve is sampled before anything is drawn, so an evaluation failure
/// yields an error and no frame at all.
#[derive(Debug, Clone, Copy)]
pub struct SceneComposer<'a> {
    config: &'a PlotConfig,
    style: RenderStyle,
}

impl<'a> SceneComposer<'a> {
    #[must_use]
    pub fn new(config: &'a PlotConfig, style: RenderStyle) -> Self {
        Self { config, style }
    }

    pub fn compose(&self) -> PlotResult<PlotScene> {
        let config = self.config;
        config.validate()?;

        let mapper = CoordinateMapper::new(config.x_axis, config.y_axis, config.canvas)?;
        debug!(
            x_axis = %config.x_axis,
            y_axis = %config.y_axis,
            width = config.canvas.width_px,
            height = config.canvas.height_px,
            "built coordinate mapper"
        );

        let mut evaluator = config.evaluator()?;
        let curve = rasterize_curve(&mapper, &mut evaluator, config.curve_mode)?;

        let x_ticks: Vec<Tick> = AxisTicks::new(Axis::X, config.x_axis, mapper).collect();
        let y_ticks: Vec<Tick> = AxisTicks::new(Axis::Y, config.y_axis, mapper).collect();
        debug!(
            x_ticks = x_ticks.len(),
            y_ticks = y_ticks.len(),
            "generated axis ticks"
        );

        let mut frame = RenderFrame::new(config.canvas);
        self.draw_background(&mut frame);
        if config.show_grid {
            self.draw_grid(&mut frame, &mapper, &x_ticks, &y_ticks);
        }
        self.draw_tick_marks(&mut frame, &mapper, &x_ticks, &y_ticks);
        self.draw_tick_labels(&mut frame, &mapper, &x_ticks, &y_ticks);
        self.draw_axis_titles(&mut frame, &mapper);
        self.draw_axes(&mut frame, &mapper);
        self.draw_curve(&mut frame, &curve);

        debug!(
            lines = frame.line_count(),
            texts = frame.text_count(),
            "composed plot frame"
        );
        Ok(PlotScene {
            frame,
            curve,
            x_ticks,
            y_ticks,
        })
    }

    fn draw_background(&self, frame: &mut RenderFrame) {
        let (width, height) = frame.canvas.surface_size();
        frame.push_rect(
            SceneLayerKind::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
                self.style.background_color,
            ),
        );
    }

    fn draw_grid(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        x_ticks: &[Tick],
        y_ticks: &[Tick],
    ) {
        let color = self.style.grid_color;
        for tick in x_ticks {
            let i = tick.pixel_position;
            frame.push_line(
                SceneLayerKind::Grid,
                LinePrimitive::between_pixels((i, 0), (i, mapper.height_px()), color),
            );
        }
        for tick in y_ticks {
            let j = tick.pixel_position;
            frame.push_line(
                SceneLayerKind::Grid,
                LinePrimitive::between_pixels((0, j), (mapper.width_px(), j), color),
            );
        }
    }

    fn draw_tick_marks(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        x_ticks: &[Tick],
        y_ticks: &[Tick],
    ) {
        let color = self.style.tick_mark_color;
        let half = self.style.tick_mark_half_length_px;
        let (i_zero, j_zero) = (mapper.origin_column(), mapper.origin_row());
        for tick in x_ticks {
            let i = tick.pixel_position;
            trace!(value = tick.value, pixel = i, is_zero = tick.is_zero, "x tick");
            frame.push_line(
                SceneLayerKind::TickMarks,
                LinePrimitive::between_pixels((i, j_zero - half), (i, j_zero + half), color),
            );
        }
        for tick in y_ticks {
            let j = tick.pixel_position;
            trace!(value = tick.value, pixel = j, is_zero = tick.is_zero, "y tick");
            frame.push_line(
                SceneLayerKind::TickMarks,
                LinePrimitive::between_pixels((i_zero - half, j), (i_zero + half, j), color),
            );
        }
    }

    fn draw_tick_labels(
        &self,
        frame: &mut RenderFrame,
        mapper: &CoordinateMapper,
        x_ticks: &[Tick],
        y_ticks: &[Tick],
    ) {
        let distance = self.style.axis_label_distance_px;
        let (i_zero, j_zero) = (mapper.origin_column(), mapper.origin_row());
        for tick in x_ticks {
            frame.push_text(
                SceneLayerKind::TickLabels,
                self.label(
                    format_tick_label(tick.value, self.config.x_axis),
                    (tick.pixel_position, j_zero + distance),
                    TextHAlign::Center,
                    TextVAlign::Top,
                ),
            );
        }
        for tick in y_ticks {
            frame.push_text(
                SceneLayerKind::TickLabels,
                self.label(
                    format_tick_label(tick.value, self.config.y_axis),
                    (i_zero - distance, tick.pixel_position),
                    TextHAlign::Right,
                    TextVAlign::Middle,
                ),
            );
        }
    }

    fn draw_axis_titles(&self, frame: &mut RenderFrame, mapper: &CoordinateMapper) {
        let distance = self.style.axis_label_distance_px * 2;
        let inset = self.style.axis_title_inset_px;
        let parameter = &self.config.parameter;
        frame.push_text(
            SceneLayerKind::AxisTitles,
            self.label(
                parameter.clone(),
                (mapper.width_px() - inset, mapper.origin_row() + distance),
                TextHAlign::Right,
                TextVAlign::Top,
            ),
        );
        frame.push_text(
            SceneLayerKind::AxisTitles,
            self.label(
                format!("f({parameter})"),
                (mapper.origin_column() - distance, inset),
                TextHAlign::Right,
                TextVAlign::Top,
            ),
        );
    }

    fn draw_axes(&self, frame: &mut RenderFrame, mapper: &CoordinateMapper) {
        let color = self.style.axis_color;
        let (i_zero, j_zero) = (mapper.origin_column(), mapper.origin_row());
        frame.push_line(
            SceneLayerKind::Axes,
            LinePrimitive::between_pixels((0, j_zero), (mapper.width_px(), j_zero), color),
        );
        frame.push_line(
            SceneLayerKind::Axes,
            LinePrimitive::between_pixels((i_zero, 0), (i_zero, mapper.height_px()), color),
        );
    }

    fn draw_curve(&self, frame: &mut RenderFrame, curve: &Curve) {
        let color = self.style.curve_color;
        for segment in curve.segments() {
            frame.push_line(
                SceneLayerKind::Curve,
                LinePrimitive::between_pixels(
                    (segment.start.column, segment.start.row),
                    (segment.end.column, segment.end.row),
                    color,
                ),
            );
        }
    }

    fn label(
        &self,
        text: String,
        (x, y): (i64, i64),
        h_align: TextHAlign,
        v_align: TextVAlign,
    ) -> TextPrimitive {
        TextPrimitive::new(
            text,
            x as f64,
            y as f64,
            self.style.label_font_size_px,
            self.style.label_color,
            h_align,
            v_align,
        )
    }
}
