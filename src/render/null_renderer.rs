use crate::error::PlotResult;
use crate::render::{RenderFrame, Renderer, SceneLayerKind};

/// Headless renderer for tests and summary runs of the CLI.
///
/// Frames are validated and counted but never rasterized.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_text_count: usize,
    /// Segments of the curve layer in the last frame.
    pub last_curve_segment_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.last_line_count = frame.line_count();
        self.last_text_count = frame.text_count();
        self.last_curve_segment_count = frame.layer(SceneLayerKind::Curve).lines.len();
        self.frames_rendered += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NullRenderer;
    use crate::core::CanvasGeometry;
    use crate::render::{Color, LinePrimitive, RenderFrame, Renderer, SceneLayerKind};

    #[test]
    fn counts_curve_segments_separately() {
        let mut frame = RenderFrame::new(CanvasGeometry::default());
        frame.push_line(
            SceneLayerKind::Axes,
            LinePrimitive::between_pixels((0, 280), (760, 280), Color::BLACK),
        );
        frame.push_line(
            SceneLayerKind::Curve,
            LinePrimitive::between_pixels((3, 4), (3, 4), Color::RED),
        );

        let mut renderer = NullRenderer::default();
        renderer.render(&frame).expect("render");
        assert_eq!(renderer.last_line_count, 2);
        assert_eq!(renderer.last_curve_segment_count, 1);
        assert_eq!(renderer.frames_rendered, 1);
    }

    #[test]
    fn invalid_frame_is_not_counted() {
        let mut frame = RenderFrame::new(CanvasGeometry::default());
        frame.push_line(
            SceneLayerKind::Curve,
            LinePrimitive::new(0.0, f64::NAN, 1.0, 1.0, 1.0, Color::RED),
        );

        let mut renderer = NullRenderer::default();
        assert!(renderer.render(&frame).is_err());
        assert_eq!(renderer.frames_rendered, 0);
    }
}
