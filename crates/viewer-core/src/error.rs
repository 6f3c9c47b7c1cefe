use crate::scene::NodeId;
use thiserror::Error;

/// Failures when building or editing the scene graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("scene node {0:?} does not exist")]
    UnknownNode(NodeId),
}

/// Rejected tuning values for the camera rig or inspection engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name}: value {value} is out of range")]
    OutOfRange { name: &'static str, value: f32 },
}

/// Check that `min <= max`, naming the offending setting otherwise.
pub(crate) fn ensure_ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}
