//! fnplot: graph a single-variable function onto a raster canvas.
//!
//! The crate is split into a pure domain layer (`core`: coordinate mapping,
//! tick generation, expression evaluation, curve sampling), backend-agnostic
//! draw primitives (`render`) and the composition facade (`api`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{PlotConfig, Plotter};
pub use error::{PlotError, PlotResult};
