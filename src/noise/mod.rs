pub mod kernels;
pub mod octaves;

use rand::Rng;

use crate::model::NoiseAlgorithm;

pub use octaves::{Composite, OctaveSum};

/// One kernel evaluation. A kernel that produces a non-finite value is
/// replaced by a uniform random value in [-1, 1] so a single bad sample can
/// never abort a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Exact(f64),
    Degraded(f64),
}

impl Sample {
    pub fn value(self) -> f64 {
        match self {
            Sample::Exact(v) | Sample::Degraded(v) => v,
        }
    }

    pub fn is_degraded(self) -> bool {
        matches!(self, Sample::Degraded(_))
    }
}

impl NoiseAlgorithm {
    /// Raw kernel value. `octave` only affects the fractal kernel.
    #[inline]
    pub fn evaluate(self, x: f64, y: f64, octave: u32) -> f64 {
        match self {
            NoiseAlgorithm::Perlin => kernels::perlin_like(x, y),
            NoiseAlgorithm::Simplex => kernels::simplex_like(x, y),
            NoiseAlgorithm::Voronoi => kernels::voronoi_like(x, y),
            NoiseAlgorithm::Fractal => kernels::fractal_like(x, y, octave),
        }
    }

    /// Kernel value with the per-sample fallback applied.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(self, x: f64, y: f64, octave: u32, rng: &mut R) -> Sample {
        let v = self.evaluate(x, y, octave);
        if v.is_finite() {
            Sample::Exact(v)
        } else {
            Sample::Degraded(rng.gen_range(-1.0..=1.0))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn dispatch_matches_kernels() {
        let (x, y) = (13.0, -4.5);
        assert_eq!(NoiseAlgorithm::Perlin.evaluate(x, y, 3), kernels::perlin_like(x, y));
        assert_eq!(NoiseAlgorithm::Simplex.evaluate(x, y, 3), kernels::simplex_like(x, y));
        assert_eq!(NoiseAlgorithm::Voronoi.evaluate(x, y, 3), kernels::voronoi_like(x, y));
        assert_eq!(NoiseAlgorithm::Fractal.evaluate(x, y, 3), kernels::fractal_like(x, y, 3));
    }

    #[test]
    fn finite_samples_are_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = NoiseAlgorithm::Simplex.sample(4.0, 9.0, 0, &mut rng);
        assert_eq!(s, Sample::Exact(kernels::simplex_like(4.0, 9.0)));
        assert!(!s.is_degraded());
    }

    #[test]
    fn non_finite_samples_degrade_into_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for algorithm in NoiseAlgorithm::ALL {
            for _ in 0..50 {
                let s = algorithm.sample(f64::INFINITY, 0.0, 1, &mut rng);
                assert!(s.is_degraded(), "{algorithm:?} should degrade");
                assert!((-1.0..=1.0).contains(&s.value()));
            }
        }
    }
}
