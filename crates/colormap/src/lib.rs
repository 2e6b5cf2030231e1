//! # Colormap
//!
//! Data-to-color mapping for scalar fields: normalizations that squash a
//! value range onto `[0, 1]` and colormaps that turn the result into RGBA.

pub mod cmap;
pub mod color;
pub mod norm;

pub use cmap::*;
pub use color::*;
pub use norm::*;
