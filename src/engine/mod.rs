pub mod contrast;
pub mod renderer;

use serde::Serialize;

pub use renderer::{
    generate, render, render_fallback, try_render, GenerationReport, NoisePass, PixelBuffer,
    Rendered,
};

/// A failure that abandons the whole noise pass. The renderer never returns
/// these to its caller; it draws the fallback gradient instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "code", content = "detail")]
pub enum RenderFault {
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },
    #[error("pixel ({x}, {y}) has a non-finite blend factor")]
    NonFinite { x: usize, y: usize },
}
