use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;

use super::color::Color;
use super::params::{TextureParams, TextureType};

/// A named starting point for the parameter panel. Applying a preset leaves
/// the noise algorithm alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    #[serde(rename = "type")]
    pub texture_type: TextureType,
    pub scale: f64,
    pub roughness: f64,
    pub color1: Color,
    pub color2: Color,
    pub octaves: i32,
    pub persistence: f64,
}

impl Preset {
    pub fn apply(&self, params: &mut TextureParams) {
        params.texture_type = self.texture_type;
        params.scale = self.scale;
        params.roughness = self.roughness;
        params.color1 = self.color1;
        params.color2 = self.color2;
        params.octaves = self.octaves;
        params.persistence = self.persistence;
    }
}

/// Built-in presets, in menu order.
static PRESETS: LazyLock<IndexMap<&'static str, Preset>> = LazyLock::new(|| {
    IndexMap::from([
        (
            "rough-wood",
            Preset {
                texture_type: TextureType::Wood,
                scale: 0.05,
                roughness: 0.8,
                color1: Color::rgb(0x8B, 0x45, 0x13),
                color2: Color::rgb(0xD2, 0x69, 0x1E),
                octaves: 4,
                persistence: 0.5,
            },
        ),
        (
            "smooth-marble",
            Preset {
                texture_type: TextureType::Marble,
                scale: 0.02,
                roughness: 0.3,
                color1: Color::rgb(0xFF, 0xFF, 0xFF),
                color2: Color::rgb(0xE5, 0xE5, 0xE5),
                octaves: 3,
                persistence: 0.4,
            },
        ),
        (
            "rusted-metal",
            Preset {
                texture_type: TextureType::Metal,
                scale: 0.1,
                roughness: 0.9,
                color1: Color::rgb(0x8B, 0x45, 0x13),
                color2: Color::rgb(0xFF, 0x63, 0x47),
                octaves: 5,
                persistence: 0.6,
            },
        ),
        (
            "soft-fabric",
            Preset {
                texture_type: TextureType::Fabric,
                scale: 0.03,
                roughness: 0.4,
                color1: Color::rgb(0xF5, 0xF5, 0xDC),
                color2: Color::rgb(0xDC, 0xDC, 0xDC),
                octaves: 4,
                persistence: 0.3,
            },
        ),
        (
            "ancient-stone",
            Preset {
                texture_type: TextureType::Stone,
                scale: 0.08,
                roughness: 0.7,
                color1: Color::rgb(0x69, 0x69, 0x69),
                color2: Color::rgb(0xA9, 0xA9, 0xA9),
                octaves: 6,
                persistence: 0.5,
            },
        ),
    ])
});

pub fn presets() -> &'static IndexMap<&'static str, Preset> {
    &PRESETS
}

pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.get(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::params::NoiseAlgorithm;

    #[test]
    fn presets_keep_menu_order() {
        let ids: Vec<_> = presets().keys().copied().collect();
        assert_eq!(
            ids,
            ["rough-wood", "smooth-marble", "rusted-metal", "soft-fabric", "ancient-stone"]
        );
    }

    #[test]
    fn apply_overwrites_everything_but_algorithm() {
        let mut params = TextureParams {
            algorithm: NoiseAlgorithm::Simplex,
            ..TextureParams::default()
        };
        find_preset("rusted-metal").unwrap().apply(&mut params);
        assert_eq!(params.texture_type, TextureType::Metal);
        assert_eq!(params.algorithm, NoiseAlgorithm::Simplex);
        assert_eq!(params.octaves, 5);
        assert_eq!(params.color2.to_hex(), "#FF6347");
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(find_preset("glossy-plastic").is_none());
    }

    #[test]
    fn serializes_with_type_key() {
        let value = serde_json::to_value(find_preset("ancient-stone").unwrap()).unwrap();
        assert_eq!(value["type"], "Stone");
        assert_eq!(value["color1"], "#696969");
    }
}
