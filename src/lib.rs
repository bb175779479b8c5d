//! plot-rs: a Rust-native 2D plotting core.
//!
//! The crate turns axes and series into backend-agnostic draw primitives:
//! data-to-screen transforms, tick generation, an iterative plot-area layout,
//! series projection and tracker hit-testing. Drawing itself happens behind
//! [`render::DrawingBackend`]; [`render::NullBackend`] is provided for
//! headless use and tests.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;

pub use api::{PlotModel, PlotModelConfig};
pub use error::{PlotError, PlotResult};
