//! Inspection Surface
//!
//! Named property access for an external inspector or debug panel. Values
//! are read and written through [`Inspectable`]; writes to `camera.mode`
//! run the same handoff as the in-game toggle.

use log::debug;

use crate::camera::CameraMode;
use crate::player::SubjectController;
use crate::world::TerrainQuery;

/// A property value as seen by the inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Bool(bool),
    Mode(CameraMode),
    /// Free text, accepted for mode writes (`"fly"`, `"third_person"`).
    Text(String),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Float(_) => "float",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Mode(_) => "mode",
            PropertyValue::Text(_) => "text",
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Mode(mode) => write!(f, "{mode}"),
            PropertyValue::Text(text) => f.write_str(text),
        }
    }
}

/// Static description of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub writable: bool,
}

/// Errors from inspector reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectError {
    UnknownProperty(String),
    ReadOnly(&'static str),
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    InvalidValue {
        name: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectError::UnknownProperty(name) => write!(f, "unknown property: {name}"),
            InspectError::ReadOnly(name) => write!(f, "property is read-only: {name}"),
            InspectError::TypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "{name}: expected {expected}, got {found}"),
            InspectError::InvalidValue { name, reason } => write!(f, "{name}: {reason}"),
        }
    }
}

impl std::error::Error for InspectError {}

/// Read/write access to named properties.
pub trait Inspectable {
    fn properties(&self) -> &'static [PropertyInfo];
    fn get(&self, name: &str) -> Result<PropertyValue, InspectError>;
    fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), InspectError>;
}

impl PropertyInfo {
    const fn writable(name: &'static str) -> Self {
        Self {
            name,
            writable: true,
        }
    }

    const fn read_only(name: &'static str) -> Self {
        Self {
            name,
            writable: false,
        }
    }
}

const SUBJECT_PROPERTIES: &[PropertyInfo] = &[
    PropertyInfo::writable("camera.mode"),
    PropertyInfo::writable("camera.follow_distance"),
    PropertyInfo::writable("subject.speed"),
    PropertyInfo::writable("subject.boost_speed"),
    PropertyInfo::writable("subject.gravity"),
    PropertyInfo::writable("subject.jump_impulse"),
    PropertyInfo::writable("subject.clearance"),
    PropertyInfo::read_only("subject.is_grounded"),
    PropertyInfo::read_only("subject.vertical_velocity"),
    PropertyInfo::read_only("subject.current_speed"),
];

fn lookup(name: &str) -> Result<&'static PropertyInfo, InspectError> {
    SUBJECT_PROPERTIES
        .iter()
        .find(|info| info.name == name)
        .ok_or_else(|| InspectError::UnknownProperty(name.to_string()))
}

fn expect_float(name: &'static str, value: &PropertyValue) -> Result<f32, InspectError> {
    match value {
        PropertyValue::Float(v) if v.is_finite() => Ok(*v),
        PropertyValue::Float(v) => Err(InspectError::InvalidValue {
            name,
            reason: format!("{v} is not finite"),
        }),
        other => Err(InspectError::TypeMismatch {
            name,
            expected: "float",
            found: other.kind(),
        }),
    }
}

fn expect_mode(name: &'static str, value: &PropertyValue) -> Result<CameraMode, InspectError> {
    match value {
        PropertyValue::Mode(mode) => Ok(*mode),
        PropertyValue::Text(text) => match CameraMode::parse(text) {
            Some(mode) => Ok(mode),
            None => Err(InspectError::InvalidValue {
                name,
                reason: format!("unknown camera mode '{text}'"),
            }),
        },
        other => Err(InspectError::TypeMismatch {
            name,
            expected: "mode",
            found: other.kind(),
        }),
    }
}

impl<T: TerrainQuery> Inspectable for SubjectController<T> {
    fn properties(&self) -> &'static [PropertyInfo] {
        SUBJECT_PROPERTIES
    }

    fn get(&self, name: &str) -> Result<PropertyValue, InspectError> {
        let info = lookup(name)?;
        let config = self.config();
        let state = self.state();
        let value = match info.name {
            "camera.mode" => PropertyValue::Mode(self.camera_mode()),
            "camera.follow_distance" => PropertyValue::Float(self.camera().follow_distance()),
            "subject.speed" => PropertyValue::Float(config.speed),
            "subject.boost_speed" => PropertyValue::Float(config.boost_speed),
            "subject.gravity" => PropertyValue::Float(config.gravity),
            "subject.jump_impulse" => PropertyValue::Float(config.jump_impulse),
            "subject.clearance" => PropertyValue::Float(config.clearance),
            "subject.is_grounded" => PropertyValue::Bool(state.is_grounded),
            "subject.vertical_velocity" => PropertyValue::Float(state.vertical_velocity),
            "subject.current_speed" => PropertyValue::Float(state.speed),
            _ => return Err(InspectError::UnknownProperty(name.to_string())),
        };
        Ok(value)
    }

    fn set(&mut self, name: &str, value: PropertyValue) -> Result<(), InspectError> {
        let info = lookup(name)?;
        if !info.writable {
            return Err(InspectError::ReadOnly(info.name));
        }

        match info.name {
            "camera.mode" => {
                let mode = expect_mode(info.name, &value)?;
                self.set_camera_mode(mode);
            }
            "camera.follow_distance" => {
                let distance = expect_float(info.name, &value)?;
                if distance <= 0.0 {
                    return Err(InspectError::InvalidValue {
                        name: info.name,
                        reason: "must be positive".to_string(),
                    });
                }
                self.set_follow_distance(distance);
            }
            "subject.clearance" => {
                self.config_mut().clearance = expect_float(info.name, &value)?;
            }
            field => {
                let v = expect_float(info.name, &value)?;
                if v < 0.0 {
                    return Err(InspectError::InvalidValue {
                        name: info.name,
                        reason: "must not be negative".to_string(),
                    });
                }
                let config = self.config_mut();
                match field {
                    "subject.speed" => config.speed = v,
                    "subject.boost_speed" => config.boost_speed = v,
                    "subject.gravity" => config.gravity = v,
                    "subject.jump_impulse" => config.jump_impulse = v,
                    _ => return Err(InspectError::UnknownProperty(name.to_string())),
                }
            }
        }

        debug!("inspector: {name} = {value}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::player::SubjectConfig;
    use crate::world::FlatTerrain;

    fn subject() -> SubjectController<FlatTerrain> {
        let terrain = FlatTerrain::new(0.0);
        SubjectController::new(SubjectConfig::default(), &CameraConfig::default(), terrain)
    }

    #[test]
    fn test_every_property_readable() {
        let subject = subject();
        for info in subject.properties() {
            assert!(subject.get(info.name).is_ok(), "{}", info.name);
        }
    }

    #[test]
    fn test_mode_write_runs_handoff() {
        let mut subject = subject();
        let before = subject.camera().position();

        let fly = PropertyValue::Text("fly".into());
        subject.set("camera.mode", fly).unwrap();

        assert_eq!(subject.camera_mode(), CameraMode::Fly);
        assert!(subject.camera().fly().is_active());
        assert!(!subject.camera().third_person().is_active());
        assert!(subject.camera().position().abs_diff_eq(before, 1e-4));
        let mode = subject.get("camera.mode").unwrap();
        assert_eq!(mode, PropertyValue::Mode(CameraMode::Fly));

        let orbit = PropertyValue::Mode(CameraMode::ThirdPerson);
        subject.set("camera.mode", orbit).unwrap();
        assert_eq!(subject.camera_mode(), CameraMode::ThirdPerson);
    }

    #[test]
    fn test_float_writes() {
        let mut subject = subject();
        let gravity = PropertyValue::Float(20.0);
        subject.set("subject.gravity", gravity).unwrap();
        let distance = PropertyValue::Float(6.0);
        subject.set("camera.follow_distance", distance.clone()).unwrap();

        assert_eq!(subject.config().gravity, 20.0);
        assert_eq!(subject.get("camera.follow_distance"), Ok(distance));
    }

    #[test]
    fn test_rejected_writes() {
        let mut subject = subject();
        assert_eq!(
            subject.set("subject.is_grounded", PropertyValue::Bool(true)),
            Err(InspectError::ReadOnly("subject.is_grounded"))
        );
        assert!(matches!(
            subject.set("nope", PropertyValue::Float(1.0)),
            Err(InspectError::UnknownProperty(_))
        ));
        assert!(matches!(
            subject.set("subject.speed", PropertyValue::Bool(true)),
            Err(InspectError::TypeMismatch { .. })
        ));
        assert!(matches!(
            subject.set("subject.speed", PropertyValue::Float(-1.0)),
            Err(InspectError::InvalidValue { .. })
        ));
        assert!(matches!(
            subject.set("camera.mode", PropertyValue::Text("orbit".into())),
            Err(InspectError::InvalidValue { .. })
        ));
        assert_eq!(subject.config().speed, 10.0);
    }
}
