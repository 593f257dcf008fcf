use crate::core::CanvasGeometry;
use crate::error::PlotResult;
use crate::render::{LinePrimitive, RectPrimitive, SceneLayerKind, TextPrimitive};

/// Primitives of one scene layer. Backends paint rects, then lines, then
/// texts of a layer before moving to the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: SceneLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: SceneLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.lines.is_empty() && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one plot draw pass.
///
/// Coordinates are plot-surface pixels; backends place the surface at
/// `(margin, margin)` on the outer canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub canvas: CanvasGeometry,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    /// Creates an empty frame with every layer of the canonical stack.
    #[must_use]
    pub fn new(canvas: CanvasGeometry) -> Self {
        Self {
            canvas,
            layers: SceneLayerKind::CANONICAL_ORDER
                .into_iter()
                .map(LayerPrimitives::new)
                .collect(),
        }
    }

    pub fn push_rect(&mut self, kind: SceneLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_line(&mut self, kind: SceneLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_text(&mut self, kind: SceneLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    #[must_use]
    pub fn layer(&self, kind: SceneLayerKind) -> &LayerPrimitives {
        &self.layers[kind.paint_index()]
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.canvas.validate()?;

        for layer in &self.layers {
            for rect in &layer.rects {
                rect.validate()?;
            }
            for line in &layer.lines {
                line.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }

    fn layer_mut(&mut self, kind: SceneLayerKind) -> &mut LayerPrimitives {
        // `new` builds the layers in canonical order, so the index is stable.
        &mut self.layers[kind.paint_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::CanvasGeometry;
    use crate::render::{Color, LinePrimitive, SceneLayerKind};

    #[test]
    fn lines_land_in_their_layer() {
        let mut frame = RenderFrame::new(CanvasGeometry::default());
        assert!(frame.is_empty());

        frame.push_line(
            SceneLayerKind::Curve,
            LinePrimitive::new(0.0, 2.0, 5.0, 3.0, 1.0, Color::RED),
        );
        frame.push_line(
            SceneLayerKind::Grid,
            LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::GRAY),
        );

        assert_eq!(frame.line_count(), 2);
        assert_eq!(frame.layer(SceneLayerKind::Grid).lines[0].y1, 1.0);
        assert_eq!(frame.layer(SceneLayerKind::Curve).lines[0].y1, 2.0);
    }

    #[test]
    fn invalid_primitive_fails_validation() {
        let mut frame = RenderFrame::new(CanvasGeometry::default());
        frame.push_line(
            SceneLayerKind::Axes,
            LinePrimitive::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, Color::BLACK),
        );
        assert!(frame.validate().is_err());
    }
}
