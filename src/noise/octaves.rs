use rand::Rng;

use crate::model::{NoiseAlgorithm, TextureParams};

/// Result of summing all octaves at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composite {
    /// Normalized noise in [0, 1] (NaN only if the parameters themselves are NaN).
    pub value: f64,
    /// How many octaves had to fall back to a random sample.
    pub degraded: u32,
}

/// Fractal-Brownian-motion summation of one kernel. Parameters are clamped
/// once at construction and reused for every pixel of a pass.
#[derive(Debug, Clone, Copy)]
pub struct OctaveSum {
    algorithm: NoiseAlgorithm,
    scale: f64,
    octaves: u32,
    persistence: f64,
}

impl OctaveSum {
    pub fn from_params(params: &TextureParams) -> Self {
        Self {
            algorithm: params.algorithm,
            scale: params.scale,
            octaves: params.effective_octaves(),
            persistence: params.effective_persistence(),
        }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Sum `octaves` samples, doubling frequency and scaling amplitude by
    /// `persistence` each step, then map the amplitude-weighted mean from
    /// [-1, 1] to [0, 1].
    pub fn sample<R: Rng + ?Sized>(&self, x: f64, y: f64, rng: &mut R) -> Composite {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.scale;
        let mut max_value = 0.0;
        let mut degraded = 0;

        for octave in 0..self.octaves {
            let sample = self
                .algorithm
                .sample(x * frequency, y * frequency, octave, rng);
            if sample.is_degraded() {
                degraded += 1;
            }

            value += sample.value() * amplitude;
            max_value += amplitude;

            amplitude *= self.persistence;
            frequency *= 2.0;
        }

        let normalized = if max_value > 0.0 { value / max_value } else { 0.0 };
        Composite {
            value: ((normalized + 1.0) * 0.5).clamp(0.0, 1.0),
            degraded,
        }
    }
}
