pub mod surface;
pub mod tone;

use crate::model::{Dimensions, TextureType};

impl TextureType {
    /// Shape a normalized noise value for this texture type.
    ///
    /// `x` and `y` are pixel coordinates; `canvas` supplies the size for
    /// patterns anchored to the canvas (wood rings, fire falloff). Every arm
    /// returns a value in [0, 1] for inputs in [0, 1].
    #[inline]
    pub fn shape(self, value: f64, x: f64, y: f64, canvas: Dimensions) -> f64 {
        match self {
            TextureType::Wood => surface::wood(value, x, y, canvas),
            TextureType::Stone => tone::stone(value),
            TextureType::Metal => surface::metal(value, x, y),
            TextureType::Marble => surface::marble(value, x, y),
            TextureType::Fabric => surface::fabric(value, x, y),
            TextureType::Clouds => tone::clouds(value),
            TextureType::Fire => surface::fire(value, y, canvas),
            TextureType::Water => surface::water(value, x, y),
            TextureType::Abstract => value,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn abstract_is_identity() {
        let canvas = Dimensions::default();
        for v in [0.0, 0.13, 0.5, 0.99, 1.0] {
            assert_eq!(TextureType::Abstract.shape(v, 17.0, 301.0, canvas), v);
        }
    }

    #[test]
    fn every_type_stays_in_unit_range() {
        let canvas = Dimensions::new(320, 200);
        for texture in TextureType::ALL {
            for step in 0..=20 {
                let v = f64::from(step) / 20.0;
                for x in (0..320).step_by(23) {
                    for y in (0..200).step_by(19) {
                        let shaped = texture.shape(v, f64::from(x), f64::from(y), canvas);
                        assert!(
                            (0.0..=1.0).contains(&shaped),
                            "{texture:?} produced {shaped} for v={v} at ({x}, {y})"
                        );
                    }
                }
            }
        }
    }
}
