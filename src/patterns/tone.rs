//! Position-independent tone curves.

/// Brighter half is lifted by a gentle gamma, darker half pulled down 10%.
pub fn stone(value: f64) -> f64 {
    if value > 0.5 {
        value.powf(0.8)
    } else {
        value * 0.9
    }
}

pub fn clouds(value: f64) -> f64 {
    value.powf(0.6)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn stone_splits_at_half() {
        assert!((stone(0.5) - 0.45).abs() < 1e-12);
        assert!((stone(0.81) - 0.81_f64.powf(0.8)).abs() < 1e-12);
        assert!(stone(0.51) > stone(0.5));
        assert!((stone(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clouds_lift_midtones() {
        assert!(clouds(0.25) > 0.25);
        assert!(clouds(0.0).abs() < 1e-12);
        assert!((clouds(1.0) - 1.0).abs() < 1e-12);
    }
}
