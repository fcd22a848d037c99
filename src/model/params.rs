use std::fmt;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::color::Color;

/// Octave count is clamped into this range at the point of use.
pub const OCTAVES_RANGE: RangeInclusive<i32> = 1..=8;
/// Per-octave amplitude decay is clamped into this range at the point of use.
pub const PERSISTENCE_RANGE: RangeInclusive<f64> = 0.1..=1.0;
/// Contrast exponent is clamped into this range at the point of use.
pub const ROUGHNESS_RANGE: RangeInclusive<f64> = 0.1..=2.0;

/// Colors offered by [`TextureParams::randomize`].
pub const RANDOM_PALETTE: [Color; 12] = [
    Color::rgb(0x8B, 0x45, 0x13),
    Color::rgb(0xD2, 0x69, 0x1E),
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0xE5, 0xE5, 0xE5),
    Color::rgb(0xFF, 0x63, 0x47),
    Color::rgb(0xF5, 0xF5, 0xDC),
    Color::rgb(0xDC, 0xDC, 0xDC),
    Color::rgb(0x69, 0x69, 0x69),
    Color::rgb(0xA9, 0xA9, 0xA9),
    Color::rgb(0x41, 0x69, 0xE1),
    Color::rgb(0x32, 0xCD, 0x32),
    Color::rgb(0xFF, 0x69, 0xB4),
];

// ── Texture type ─────────────────────────────────────────────────

/// Which pattern shaping is applied to the composited noise.
///
/// Deserialization is lenient: any name that is not one of the eight shaped
/// types becomes `Abstract`, which leaves the noise untouched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, JsonSchema,
)]
#[serde(from = "String", into = "String")]
#[ts(export)]
pub enum TextureType {
    #[default]
    Wood,
    Stone,
    Metal,
    Marble,
    Fabric,
    Clouds,
    Fire,
    Water,
    Abstract,
}

impl TextureType {
    pub const ALL: [TextureType; 9] = [
        TextureType::Wood,
        TextureType::Stone,
        TextureType::Metal,
        TextureType::Marble,
        TextureType::Fabric,
        TextureType::Clouds,
        TextureType::Fire,
        TextureType::Water,
        TextureType::Abstract,
    ];

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(TextureType::Abstract)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TextureType::Wood => "Wood",
            TextureType::Stone => "Stone",
            TextureType::Metal => "Metal",
            TextureType::Marble => "Marble",
            TextureType::Fabric => "Fabric",
            TextureType::Clouds => "Clouds",
            TextureType::Fire => "Fire",
            TextureType::Water => "Water",
            TextureType::Abstract => "Abstract",
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<String> for TextureType {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<TextureType> for String {
    fn from(t: TextureType) -> String {
        t.as_str().to_string()
    }
}

// ── Noise algorithm ──────────────────────────────────────────────

/// Which noise kernel feeds the octave sum. Unknown names fall back to Perlin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, JsonSchema,
)]
#[serde(from = "String", into = "String", rename_all = "lowercase")]
#[ts(export)]
pub enum NoiseAlgorithm {
    #[default]
    Perlin,
    Simplex,
    Voronoi,
    Fractal,
}

impl NoiseAlgorithm {
    pub const ALL: [NoiseAlgorithm; 4] = [
        NoiseAlgorithm::Perlin,
        NoiseAlgorithm::Simplex,
        NoiseAlgorithm::Voronoi,
        NoiseAlgorithm::Fractal,
    ];

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(NoiseAlgorithm::Perlin)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NoiseAlgorithm::Perlin => "perlin",
            NoiseAlgorithm::Simplex => "simplex",
            NoiseAlgorithm::Voronoi => "voronoi",
            NoiseAlgorithm::Fractal => "fractal",
        }
    }

    /// Human-readable name for status displays.
    pub const fn display_name(self) -> &'static str {
        match self {
            NoiseAlgorithm::Perlin => "Perlin Noise",
            NoiseAlgorithm::Simplex => "Simplex Noise",
            NoiseAlgorithm::Voronoi => "Voronoi Cells",
            NoiseAlgorithm::Fractal => "Fractal Patterns",
        }
    }
}

impl From<String> for NoiseAlgorithm {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<NoiseAlgorithm> for String {
    fn from(a: NoiseAlgorithm) -> String {
        a.as_str().to_string()
    }
}

// ── Parameters ───────────────────────────────────────────────────

/// Everything one generation pass needs. Owned by the caller and treated as
/// immutable for the duration of a pass.
///
/// Fields are stored as given; `octaves`, `persistence` and `roughness` are
/// only clamped when read through the `effective_*` accessors, so bad input
/// from a UI never becomes an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct TextureParams {
    pub texture_type: TextureType,
    pub algorithm: NoiseAlgorithm,
    /// Base sampling frequency. Practically > 0; not clamped.
    pub scale: f64,
    pub roughness: f64,
    pub octaves: i32,
    pub persistence: f64,
    #[ts(type = "string")]
    #[schemars(with = "String")]
    pub color1: Color,
    #[ts(type = "string")]
    #[schemars(with = "String")]
    pub color2: Color,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            texture_type: TextureType::Wood,
            algorithm: NoiseAlgorithm::Perlin,
            scale: 0.05,
            roughness: 0.5,
            octaves: 4,
            persistence: 0.5,
            color1: Color::rgb(0x8B, 0x45, 0x13),
            color2: Color::rgb(0xD2, 0x69, 0x1E),
        }
    }
}

impl TextureParams {
    #[allow(clippy::cast_sign_loss)] // clamped to 1..=8 first
    pub fn effective_octaves(&self) -> u32 {
        self.octaves
            .clamp(*OCTAVES_RANGE.start(), *OCTAVES_RANGE.end()) as u32
    }

    pub fn effective_persistence(&self) -> f64 {
        self.persistence
            .clamp(*PERSISTENCE_RANGE.start(), *PERSISTENCE_RANGE.end())
    }

    pub fn effective_roughness(&self) -> f64 {
        self.roughness
            .clamp(*ROUGHNESS_RANGE.start(), *ROUGHNESS_RANGE.end())
    }

    /// Re-roll scale, roughness, octaves, persistence and both colors.
    /// Texture type and algorithm are kept.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.scale = rng.gen::<f64>() * 0.15 + 0.02;
        self.roughness = rng.gen::<f64>() * 0.8 + 0.2;
        self.octaves = rng.gen_range(2..8);
        self.persistence = rng.gen::<f64>() * 0.7 + 0.2;
        self.color1 = random_color(rng);
        self.color2 = random_color(rng);
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    RANDOM_PALETTE.choose(rng).copied().unwrap_or(Color::BLACK)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn defaults_match_studio_startup() {
        let p = TextureParams::default();
        assert_eq!(p.texture_type, TextureType::Wood);
        assert_eq!(p.algorithm, NoiseAlgorithm::Perlin);
        assert_eq!(p.color1.to_hex(), "#8B4513");
        assert_eq!(p.color2.to_hex(), "#D2691E");
        assert_eq!(p.effective_octaves(), 4);
    }

    #[test]
    fn effective_values_are_clamped() {
        let p = TextureParams {
            octaves: 0,
            persistence: 0.0,
            roughness: 5.0,
            ..TextureParams::default()
        };
        assert_eq!(p.effective_octaves(), 1);
        assert!((p.effective_persistence() - 0.1).abs() < f64::EPSILON);
        assert!((p.effective_roughness() - 2.0).abs() < f64::EPSILON);

        let p = TextureParams {
            octaves: 20,
            persistence: 3.0,
            roughness: -1.0,
            ..TextureParams::default()
        };
        assert_eq!(p.effective_octaves(), 8);
        assert!((p.effective_persistence() - 1.0).abs() < f64::EPSILON);
        assert!((p.effective_roughness() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_ui_json() {
        let json = r##"{
            "textureType": "Marble",
            "scale": 0.02,
            "roughness": 0.3,
            "octaves": 3,
            "persistence": 0.4,
            "color1": "#FFFFFF",
            "color2": "#E5E5E5",
            "algorithm": "voronoi"
        }"##;
        let p: TextureParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.texture_type, TextureType::Marble);
        assert_eq!(p.algorithm, NoiseAlgorithm::Voronoi);
        assert_eq!(p.octaves, 3);
        assert_eq!(p.color2, Color::rgb(0xE5, 0xE5, 0xE5));
    }

    #[test]
    fn unknown_names_fall_back() {
        let json = r#"{ "textureType": "Plasma", "algorithm": "wavelet" }"#;
        let p: TextureParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.texture_type, TextureType::Abstract);
        assert_eq!(p.algorithm, NoiseAlgorithm::Perlin);
        // Missing fields take defaults.
        assert!((p.scale - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_with_ui_names() {
        let value = serde_json::to_value(TextureParams::default()).unwrap();
        assert_eq!(value["textureType"], "Wood");
        assert_eq!(value["algorithm"], "perlin");
        assert_eq!(value["color1"], "#8B4513");
    }

    #[test]
    fn display_names() {
        assert_eq!(NoiseAlgorithm::Voronoi.display_name(), "Voronoi Cells");
        assert_eq!(NoiseAlgorithm::from_name("FRACTAL"), NoiseAlgorithm::Fractal);
        assert_eq!(TextureType::from_name("clouds"), TextureType::Clouds);
    }

    #[test]
    fn randomize_stays_in_ranges_and_keeps_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = TextureParams {
            texture_type: TextureType::Fire,
            algorithm: NoiseAlgorithm::Fractal,
            ..TextureParams::default()
        };
        for _ in 0..200 {
            p.randomize(&mut rng);
            assert!((0.02..0.17).contains(&p.scale));
            assert!((0.2..1.0).contains(&p.roughness));
            assert!((2..8).contains(&p.octaves));
            assert!((0.2..0.9).contains(&p.persistence));
            assert!(RANDOM_PALETTE.contains(&p.color1));
            assert!(RANDOM_PALETTE.contains(&p.color2));
        }
        assert_eq!(p.texture_type, TextureType::Fire);
        assert_eq!(p.algorithm, NoiseAlgorithm::Fractal);
    }

    #[test]
    fn randomize_is_repeatable_with_a_seed() {
        let mut a = TextureParams::default();
        let mut b = TextureParams::default();
        a.randomize(&mut StdRng::seed_from_u64(42));
        b.randomize(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
