//! Scalar noise kernels.
//!
//! These are cheap trigonometric surrogates rather than lattice-gradient
//! noise. Each is a pure function of its inputs; the same coordinates always
//! give the same value.

use std::f64::consts::FRAC_PI_4;

/// Side length of a voronoi-like cell in sample space.
pub const VORONOI_CELL_SIZE: f64 = 50.0;

/// Three overlapping sine waves, averaged. Always within [-1, 1].
pub fn perlin_like(x: f64, y: f64) -> f64 {
    ((x * 0.1).sin() + (y * 0.1).sin() + ((x + y) * 0.05).sin()) / 3.0
}

/// Two diagonal sine waves weighted 0.7 / 0.3. Always within [-1, 1].
pub fn simplex_like(x: f64, y: f64) -> f64 {
    let n0 = (x * 0.1 + y * 0.05).sin() * 0.7;
    let n1 = (x * 0.05 + y * 0.1).sin() * 0.3;
    n0 + n1
}

/// Distance from the point to the center of its own square cell, remapped
/// so the center is -1 and the clamped result never leaves [-1, 1].
///
/// Cell centers are fixed, not jittered: this is a smooth distance field,
/// not a nearest-seed diagram.
pub fn voronoi_like(x: f64, y: f64) -> f64 {
    let cell_x = (x / VORONOI_CELL_SIZE).floor();
    let cell_y = (y / VORONOI_CELL_SIZE).floor();

    let center_x = cell_x * VORONOI_CELL_SIZE + VORONOI_CELL_SIZE * 0.5;
    let center_y = cell_y * VORONOI_CELL_SIZE + VORONOI_CELL_SIZE * 0.5;

    let dist = (x - center_x).hypot(y - center_y);
    ((dist / VORONOI_CELL_SIZE - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Product of a sine and a cosine over coordinates rotated by a multiple of
/// 45° per octave, so successive octaves run in different directions.
pub fn fractal_like(x: f64, y: f64, octave: u32) -> f64 {
    let angle = f64::from(octave) * FRAC_PI_4;
    let (sin, cos) = angle.sin_cos();
    let rot_x = x * cos - y * sin;
    let rot_y = x * sin + y * cos;
    (rot_x * 0.1).sin() * (rot_y * 0.1).cos()
}
