//! # Plot Renderer
//!
//! Rasterizes a field scene into a figure and presents it on a wgpu surface.

pub mod image_renderer;
pub mod plot;

pub use image_renderer::*;
pub use plot::*;
