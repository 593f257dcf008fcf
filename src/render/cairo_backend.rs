use std::io::Write;

use cairo::{Context, Format, ImageSurface, LineCap};
use pango::FontDescription;

use crate::core::CanvasGeometry;
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TextVAlign};

/// Pixel-center offset so 1 px strokes cover exactly one pixel row/column.
const PIXEL_CENTER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo raster backend.
///
/// The outer canvas is cleared with `clear_color`, then the plot surface is
/// composed at `(margin, margin)` and clipped to `(width+1) x (height+1)`.
#[derive(Debug)]
pub struct CairoRenderer {
    canvas: CanvasGeometry,
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(canvas: CanvasGeometry) -> PlotResult<Self> {
        canvas.validate()?;
        let (width, height) = canvas.outer_size();
        let width = i32::try_from(width)
            .map_err(|_| PlotError::InvalidData("canvas width overflows i32".to_owned()))?;
        let height = i32::try_from(height)
            .map_err(|_| PlotError::InvalidData("canvas height overflows i32".to_owned()))?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            canvas,
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasGeometry {
        self.canvas
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> PlotResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> PlotResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| PlotError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        let surface_size = (self.surface.width(), self.surface.height());
        let (frame_width, frame_height) = frame.canvas.outer_size();
        if i32::try_from(frame_width).ok() != Some(surface_size.0)
            || i32::try_from(frame_height).ok() != Some(surface_size.1)
        {
            return Err(PlotError::InvalidData(format!(
                "frame canvas {frame_width}x{frame_height} does not match the {}x{} surface",
                surface_size.0, surface_size.1
            )));
        }

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let margin = f64::from(frame.canvas.margin_px);
        let (surface_width, surface_height) = frame.canvas.surface_size();
        context.translate(margin, margin);
        context.rectangle(0.0, 0.0, f64::from(surface_width), f64::from(surface_height));
        context.clip();
        context.set_antialias(cairo::Antialias::None);
        context.set_line_cap(LineCap::Square);

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            for rect in &layer.rects {
                apply_color(context, rect.fill_color);
                context.rectangle(rect.x, rect.y, rect.width, rect.height);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                stats.rects_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1 + PIXEL_CENTER, line.y1 + PIXEL_CENTER);
                context.line_to(line.x2 + PIXEL_CENTER, line.y2 + PIXEL_CENTER);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for text in &layer.texts {
                let layout = pangocairo::functions::create_layout(context);
                let font_description =
                    FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
                layout.set_font_description(Some(&font_description));
                layout.set_text(&text.text);

                let (text_width, text_height) = layout.pixel_size();
                let x = match text.h_align {
                    TextHAlign::Left => text.x,
                    TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                    TextHAlign::Right => text.x - f64::from(text_width),
                };
                let y = match text.v_align {
                    TextVAlign::Top => text.y,
                    TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
                };

                apply_color(context, text.color);
                context.move_to(x, y);
                pangocairo::functions::show_layout(context, &layout);
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
