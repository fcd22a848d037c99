//! Procedural 2D texture generation: octave-summed noise kernels shaped into
//! material patterns and blended between two colors into an RGBA buffer.

pub mod engine;
pub mod error;
pub mod model;
pub mod noise;
pub mod paths;
pub mod patterns;
pub mod settings;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use engine::{generate, render, GenerationReport, PixelBuffer, RenderFault, Rendered};
pub use error::StudioError;
pub use model::{Color, Dimensions, NoiseAlgorithm, TextureParams, TextureType};
