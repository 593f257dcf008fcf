mod axis_label_format;
mod plot_config;
mod plotter;
mod render_style;
mod scene_composer;

pub use axis_label_format::format_tick_label;
pub use plot_config::PlotConfig;
pub use plotter::Plotter;
pub use render_style::RenderStyle;
pub use scene_composer::{PlotScene, SceneComposer};
