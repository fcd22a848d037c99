pub mod canvas;
pub mod color;
pub mod params;
pub mod presets;

// Re-export commonly used types at the model level.
pub use canvas::Dimensions;
pub use color::Color;
pub use params::{NoiseAlgorithm, TextureParams, TextureType};
pub use presets::{find_preset, presets, Preset};
