//! Simulation Configuration
//!
//! All tunables in one serde tree. Every section defaults field-by-field, so
//! a JSON file only needs the values it overrides:
//!
//! ```json
//! { "subject": { "gravity": 20.0 }, "camera": { "follow_distance": 8.0 } }
//! ```

use std::path::Path;

use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::player::SubjectConfig;
use crate::world::{FractalNoise, HeightField, HeightFieldError};

/// Errors from loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
    /// A value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Procedural terrain used by the headless driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: f32,
    /// Elevation range: samples span `[base, base + amplitude]`.
    pub amplitude: f32,
    pub base: f32,
    /// Noise frequency in cycles per meter.
    pub frequency: f32,
    pub octaves: u32,
    pub cell_size: f32,
    /// Grid samples per side; the field is centered on the origin.
    pub resolution: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 1.0,
            amplitude: 12.0,
            base: -4.0,
            frequency: 0.02,
            octaves: 4,
            cell_size: 2.0,
            resolution: 257,
        }
    }
}

impl TerrainConfig {
    /// Sample the fractal noise into a height field.
    pub fn build(&self) -> Result<HeightField, HeightFieldError> {
        let noise = FractalNoise {
            seed: self.seed,
            octaves: self.octaves,
            ..FractalNoise::default()
        };
        let half_extent = self.cell_size * self.resolution.saturating_sub(1) as f32 * 0.5;
        let origin = Vec2::splat(-half_extent);
        let (base, amplitude, frequency) = (self.base, self.amplitude, self.frequency);
        let height = |x: f32, z: f32| base + amplitude * noise.sample(x * frequency, z * frequency);

        let size = self.resolution;
        HeightField::from_fn(origin, self.cell_size, size, size, height)
    }
}

/// Headless run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u32,
    /// Fixed timestep in seconds.
    pub delta_time: f32,
    /// Log the state every this many frames (0 = only the last).
    pub report_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            delta_time: 1.0 / 60.0,
            report_every: 60,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub subject: SubjectConfig,
    pub camera: CameraConfig,
    pub terrain: TerrainConfig,
    pub run: RunConfig,
}

impl SimConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        if let Err(e) = config.validate() {
            warn!("config rejected: {e}");
            return Err(e);
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.subject;
        non_negative("subject.speed", s.speed)?;
        non_negative("subject.boost_speed", s.boost_speed)?;
        non_negative("subject.gravity", s.gravity)?;
        non_negative("subject.jump_impulse", s.jump_impulse)?;
        finite("subject.clearance", s.clearance)?;
        if !s.spawn_position.is_finite() {
            return Err(invalid("subject.spawn_position must be finite"));
        }

        let c = &self.camera;
        positive("camera.follow_distance", c.follow_distance)?;
        let tp = &c.third_person;
        finite("camera.third_person.theta", tp.theta)?;
        finite("camera.third_person.look_sensitivity", tp.look_sensitivity)?;
        if !(tp.phi_min > 0.0 && tp.phi_min < tp.phi_max && tp.phi_max < std::f32::consts::PI) {
            return Err(invalid("camera.third_person phi limits out of range"));
        }
        finite("camera.third_person.phi", tp.phi)?;
        let fly = &c.fly;
        non_negative("camera.fly.speed", fly.speed)?;
        non_negative("camera.fly.boost_speed", fly.boost_speed)?;
        finite("camera.fly.look_sensitivity", fly.look_sensitivity)?;
        if !(fly.pitch_limit_degrees > 0.0 && fly.pitch_limit_degrees < 90.0) {
            return Err(invalid("camera.fly.pitch_limit_degrees must be in (0, 90)"));
        }

        let t = &self.terrain;
        positive("terrain.cell_size", t.cell_size)?;
        finite("terrain.amplitude", t.amplitude)?;
        finite("terrain.base", t.base)?;
        finite("terrain.frequency", t.frequency)?;
        if t.resolution < 2 {
            return Err(invalid("terrain.resolution must be at least 2"));
        }

        non_negative("run.delta_time", self.run.delta_time)?;
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_string())
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        let reason = format!("{name} must be finite, got {value}");
        Err(ConfigError::Invalid(reason))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        let reason = format!("{name} must be >= 0, got {value}");
        return Err(ConfigError::Invalid(reason));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        let reason = format!("{name} must be > 0, got {value}");
        return Err(ConfigError::Invalid(reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TerrainQuery;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_survive_json() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{ "subject": { "gravity": 20.0, "spawn_position": [0.0, 5.0, 0.0] },
                 "camera": { "follow_distance": 8.0 } }"#;
        let parsed = SimConfig::from_json(json).unwrap();
        let spawn = parsed.subject.spawn_position;
        assert_eq!(parsed.subject.gravity, 20.0);
        assert_eq!(spawn, glam::Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(parsed.subject.speed, 10.0);
        assert_eq!(parsed.camera.follow_distance, 8.0);
        assert_eq!(parsed.camera.fly, crate::camera::FlyConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "subject": { "gravity": -1.0 } }"#,
            r#"{ "camera": { "follow_distance": 0.0 } }"#,
            r#"{ "camera": { "third_person": { "phi_min": 1.5, "phi_max": 1.0 } } }"#,
            r#"{ "camera": { "fly": { "pitch_limit_degrees": 90.0 } } }"#,
            r#"{ "terrain": { "resolution": 1 } }"#,
            r#"{ "run": { "delta_time": -0.1 } }"#,
        ];
        for case in cases {
            match SimConfig::from_json(case) {
                Err(ConfigError::Invalid(_)) => {}
                other => panic!("expected Invalid for {case}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_json() {
        let result = SimConfig::from_json("{ nope");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SimConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_terrain_build_is_centered() {
        let terrain = TerrainConfig {
            resolution: 33,
            cell_size: 1.0,
            ..TerrainConfig::default()
        };
        let field = terrain.build().unwrap();
        let elevation = field.elevation_at(0.0, 0.0).unwrap();
        let top = terrain.base + terrain.amplitude;
        assert!(elevation >= terrain.base && elevation <= top);
        assert!(field.elevation_at(16.0, -16.0).is_some());
        assert!(field.elevation_at(17.0, 0.0).is_none());
    }
}
