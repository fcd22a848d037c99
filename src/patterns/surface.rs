//! Spatially varying patterns: each mixes a function of the pixel position
//! into the noise value and clamps the result back to [0, 1].

use crate::model::Dimensions;

/// Concentric rings around the canvas center. The ring term lies in
/// [0.4, 1.0], so it only ever darkens toward `color1`.
pub fn wood(value: f64, x: f64, y: f64, canvas: Dimensions) -> f64 {
    let (center_x, center_y) = canvas.center();
    let distance = (x - center_x).hypot(y - center_y);
    let ring = (distance * 0.05).sin() * 0.3 + 0.7;
    (value * ring).clamp(0.0, 1.0)
}

/// Fine horizontal and vertical scratches.
pub fn metal(value: f64, x: f64, y: f64) -> f64 {
    let scratch = (x * 0.2).sin() * 0.1 + (y * 0.1).sin() * 0.05;
    (value + scratch).clamp(0.0, 1.0)
}

/// Broad diagonal veins.
pub fn marble(value: f64, x: f64, y: f64) -> f64 {
    let vein = (x * 0.03 + y * 0.02).sin() * 0.2;
    (value + vein).clamp(0.0, 1.0)
}

/// Tight crossed weave.
pub fn fabric(value: f64, x: f64, y: f64) -> f64 {
    let weave = ((x * 0.4).sin() + (y * 0.4).sin()) * 0.1;
    (value + weave).clamp(0.0, 1.0)
}

/// Heat falls off by up to 30% from the top row to the bottom.
pub fn fire(value: f64, y: f64, canvas: Dimensions) -> f64 {
    let heat = 1.0 - (y / f64::from(canvas.height)) * 0.3;
    (value * heat).clamp(0.0, 1.0)
}

/// Interference ripples.
pub fn water(value: f64, x: f64, y: f64) -> f64 {
    let ripple = (x * 0.2).sin() * (y * 0.2).sin() * 0.15;
    (value + ripple).clamp(0.0, 1.0)
}
