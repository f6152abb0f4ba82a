//! Pane Render - Raster Backend
//!
//! Pixel buffers and the primitive operations the layout engine composes with:
//! - `Canvas` backed by an RGBA `image` buffer
//! - Masked paste and source-over compositing
//! - Resampling, cropping, padding and flips
//! - Shape filling (rectangles, ellipses, pie slices) rasterized with tiny-skia
//! - PNG decoding and encoding

mod canvas;
mod color;
mod mask;
mod paint;

pub use canvas::{Canvas, Filter};
pub use color::Color;
pub use mask::AlphaMask;

/// Render error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
