//! Configuration system

pub use serde::{Deserialize, Serialize};

use crate::scene::MaterialId;

/// Serialized configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl ConfigFormat {
    /// Pick a format from a file name's extension
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            Ok(Self::Toml)
        } else if path.ends_with(".ron") {
            Ok(Self::Ron)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
}

/// Configuration trait
///
/// Parsing only; reading and writing files is left to the host.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration text in the given format
    fn from_str_as(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize configuration to text in the given format
    fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// When poses are written to tracked nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosePolicy {
    /// Only on the tick a node is created or its geometry rewritten.
    /// Unchanged surfaces keep their last applied pose.
    #[default]
    ChangedOnly,

    /// Every tick a pose resolves, whether or not geometry changed
    EveryTick,
}

/// What happens to tracked meshes whose surface stops being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Tracked meshes stay resident forever
    #[default]
    Never,

    /// Evict after this many consecutive ticks without a sighting
    AfterMissedTicks(u32),
}

/// Synchronization engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Material bound to every newly created node
    pub material: Option<MaterialId>,

    /// Pose application gating
    pub pose_policy: PosePolicy,

    /// Reclamation of vanished surfaces
    pub eviction: EvictionPolicy,
}

impl Config for SyncConfig {}

impl SyncConfig {
    /// Builder pattern: set the material
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder pattern: set the pose policy
    pub fn with_pose_policy(mut self, pose_policy: PosePolicy) -> Self {
        self.pose_policy = pose_policy;
        self
    }

    /// Builder pattern: set the eviction policy
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }
}
