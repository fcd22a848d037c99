use crate::model::params::ROUGHNESS_RANGE;

/// Power-law contrast curve. Exponents below 1 lift the midtones toward
/// `color2`, exponents above 1 push them toward `color1`. Both the value and
/// the exponent are clamped before use.
#[inline]
pub fn roughness_curve(value: f64, roughness: f64) -> f64 {
    let exponent = roughness.clamp(*ROUGHNESS_RANGE.start(), *ROUGHNESS_RANGE.end());
    value.clamp(0.0, 1.0).powf(exponent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for r in [0.1, 0.5, 1.0, 2.0] {
            assert!(roughness_curve(0.0, r).abs() < 1e-12);
            assert!((roughness_curve(1.0, r) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn low_roughness_lightens_high_darkens() {
        assert!(roughness_curve(0.5, 0.3) > 0.5);
        assert!(roughness_curve(0.5, 1.7) < 0.5);
        assert!((roughness_curve(0.5, 1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn exponent_and_value_are_clamped() {
        assert!((roughness_curve(0.3, 5.0) - roughness_curve(0.3, 2.0)).abs() < 1e-12);
        assert!((roughness_curve(0.3, 0.0) - roughness_curve(0.3, 0.1)).abs() < 1e-12);
        assert!((roughness_curve(1.4, 0.8) - 1.0).abs() < 1e-12);
        assert!(roughness_curve(-0.2, 0.8).abs() < 1e-12);
    }

    #[test]
    fn nan_roughness_poisons_the_curve() {
        assert!(roughness_curve(0.5, f64::NAN).is_nan());
    }
}
