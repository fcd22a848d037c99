use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use crate::model::{Color, Dimensions, TextureParams};
use crate::noise::OctaveSum;

use super::contrast::roughness_curve;
use super::RenderFault;

/// Row-major RGBA bytes, four per pixel, alpha always 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    data: Vec<u8>,
}

impl PixelBuffer {
    fn empty() -> Self {
        Self {
            dimensions: Dimensions::new(0, 0),
            data: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }
        let index = (usize::try_from(y).ok()? * usize::try_from(self.dimensions.width).ok()?
            + usize::try_from(x).ok()?)
            * 4;
        let bytes = self.data.get(index..index + 4)?;
        bytes.try_into().ok()
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(4)
    }
}

/// Timing and health of one generation, for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct GenerationReport {
    pub width: u32,
    pub height: u32,
    #[ts(type = "number")]
    pub elapsed_ms: u64,
    /// Octave samples replaced by random values.
    #[ts(type = "number")]
    pub degraded_samples: u64,
    /// Set when the noise pass failed and the gradient was drawn instead.
    pub fallback: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub buffer: PixelBuffer,
    pub report: GenerationReport,
}

/// A successful noise pass.
#[derive(Debug, Clone)]
pub struct NoisePass {
    pub buffer: PixelBuffer,
    pub degraded_samples: u64,
}

/// Render a texture. Always returns a fully opaque buffer of
/// `width * height * 4` bytes; faults degrade to the fallback gradient.
pub fn generate(params: &TextureParams, width: u32, height: u32) -> PixelBuffer {
    render(params, Dimensions::new(width, height)).buffer
}

/// Like [`generate`], with a report of how the pass went.
pub fn render(params: &TextureParams, dimensions: Dimensions) -> Rendered {
    let started = Instant::now();

    let (buffer, degraded_samples, fallback) = match try_render(params, dimensions) {
        Ok(pass) => (pass.buffer, pass.degraded_samples, None),
        Err(fault) => {
            warn!(%fault, "noise pass failed, drawing fallback gradient");
            (render_fallback(params, dimensions), 0, Some(fault.to_string()))
        }
    };

    if degraded_samples > 0 {
        debug!(degraded_samples, "replaced non-finite noise samples");
    }

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        width = dimensions.width,
        height = dimensions.height,
        texture = params.texture_type.as_str(),
        algorithm = params.algorithm.as_str(),
        elapsed_ms,
        "texture generated"
    );

    Rendered {
        buffer,
        report: GenerationReport {
            width: dimensions.width,
            height: dimensions.height,
            elapsed_ms,
            degraded_samples,
            fallback,
        },
    }
}

/// The noise pass on its own. Rows are filled in parallel; every pixel
/// depends only on its coordinates and `params`, so the result does not
/// depend on scheduling.
pub fn try_render(params: &TextureParams, dimensions: Dimensions) -> Result<NoisePass, RenderFault> {
    let mut data = allocate(dimensions)?;
    if data.is_empty() {
        return Ok(NoisePass {
            buffer: PixelBuffer { dimensions, data },
            degraded_samples: 0,
        });
    }

    let octaves = OctaveSum::from_params(params);
    let roughness = params.effective_roughness();
    let (color1, color2) = (params.color1, params.color2);
    let degraded = AtomicU64::new(0);

    data.par_chunks_mut(row_len(dimensions))
        .enumerate()
        .try_for_each(|(y, row)| {
            let mut rng = rand::thread_rng();
            let fy = y as f64;
            let mut row_degraded = 0u64;

            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let fx = x as f64;
                let composite = octaves.sample(fx, fy, &mut rng);
                row_degraded += u64::from(composite.degraded);

                let shaped = params.texture_type.shape(composite.value, fx, fy, dimensions);
                let t = roughness_curve(shaped, roughness);
                if !t.is_finite() {
                    return Err(RenderFault::NonFinite { x, y });
                }
                pixel.copy_from_slice(&color1.lerp(color2, t).to_rgba());
            }

            degraded.fetch_add(row_degraded, Ordering::Relaxed);
            Ok(())
        })?;

    Ok(NoisePass {
        buffer: PixelBuffer { dimensions, data },
        degraded_samples: degraded.into_inner(),
    })
}

/// Linear gradient from `color1` at the top-left pixel to `color2` at the
/// bottom-right pixel, each pixel projected onto that diagonal.
///
/// Only a canvas too large to allocate at all yields an empty 0x0 buffer.
pub fn render_fallback(params: &TextureParams, dimensions: Dimensions) -> PixelBuffer {
    let mut data = match allocate(dimensions) {
        Ok(data) => data,
        Err(fault) => {
            error!(%fault, "fallback gradient cannot be allocated");
            return PixelBuffer::empty();
        }
    };
    if data.is_empty() {
        return PixelBuffer { dimensions, data };
    }

    let dx = f64::from(dimensions.width.saturating_sub(1));
    let dy = f64::from(dimensions.height.saturating_sub(1));
    let length_sq = dx * dx + dy * dy;

    for (y, row) in data.chunks_exact_mut(row_len(dimensions)).enumerate() {
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            let t = if length_sq > 0.0 {
                ((x as f64 * dx + y as f64 * dy) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            pixel.copy_from_slice(&gradient_color(params.color1, params.color2, t));
        }
    }

    PixelBuffer { dimensions, data }
}

fn gradient_color(from: Color, to: Color, t: f64) -> [u8; 4] {
    from.lerp(to, t).to_rgba()
}

/// Zeroed RGBA storage, reserved fallibly so an absurd canvas size becomes a
/// fault instead of an abort.
fn allocate(dimensions: Dimensions) -> Result<Vec<u8>, RenderFault> {
    let fault = RenderFault::Allocation {
        width: dimensions.width,
        height: dimensions.height,
    };
    let len = dimensions.rgba_len().ok_or_else(|| fault.clone())?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| fault)?;
    data.resize(len, 0);
    Ok(data)
}

fn row_len(dimensions: Dimensions) -> usize {
    // Only called after `allocate` proved width * height * 4 fits in usize.
    usize::try_from(dimensions.width).unwrap_or(0) * 4
}
