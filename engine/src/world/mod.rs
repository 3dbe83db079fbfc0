//! World Module
//!
//! Terrain elevation queries and procedural height generation.

pub mod noise;
pub mod terrain;

pub use noise::FractalNoise;
pub use terrain::{FlatTerrain, FnTerrain, HeightField, HeightFieldError, NoTerrain, TerrainQuery};
