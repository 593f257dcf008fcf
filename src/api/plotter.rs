use tracing::{debug, warn};

use crate::error::PlotResult;
use crate::render::Renderer;

use super::render_style::validate_render_style;
use super::{PlotConfig, PlotScene, RenderStyle, SceneComposer};

/// Orchestration facade: validates a plot request, composes the scene and
/// hands the finished frame to the renderer.
///
/// Rendering is a single synchronous pass. The renderer only ever sees fully
/// composed frames; a failed pass leaves it untouched.
pub struct Plotter<R: Renderer> {
    renderer: R,
    style: RenderStyle,
}

impl<R: Renderer> Plotter<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            style: RenderStyle::default(),
        }
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> PlotResult<()> {
        self.style = validate_render_style(style)?;
        Ok(())
    }

    /// Composes the scene without rendering it.
    pub fn build_scene(&self, config: &PlotConfig) -> PlotResult<PlotScene> {
        SceneComposer::new(config, self.style).compose()
    }

    pub fn render(&mut self, config: &PlotConfig) -> PlotResult<PlotScene> {
        let scene = self.build_scene(config).inspect_err(|err| {
            warn!(error = %err, "plot render aborted");
        })?;
        self.renderer.render(&scene.frame)?;
        debug!(expression = %config.expression, "plot rendered");
        Ok(scene)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
