//! Error types for world generation and the world codec.

use thiserror::Error;

/// Rejected `WorldGeneratorConfig`, reported before any scene is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number_of_scenes must be at least 1")]
    NoScenes,

    #[error("{axis} bounds are inverted: min {min} > max {max}")]
    InvertedBounds {
        axis: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{axis} minimum {min} is below the smallest playable scene ({floor})")]
    TooSmall {
        axis: &'static str,
        min: u32,
        floor: u32,
    },

    #[error("authored scene index {index} is outside 0..{scene_count}")]
    AuthoredIndexOutOfRange { index: usize, scene_count: usize },

    #[error("scene name `{0}` is used by more than one scene")]
    DuplicateSceneName(String),
}

/// Failure of a `generate_world` run. No partial world is kept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("exit in `{scene}` targets unknown scene `{target}`")]
    UnknownExitTarget { scene: String, target: String },

    #[error("exit in `{scene}` targets entry `{entry}` which `{target}` does not define")]
    MissingEntry {
        scene: String,
        target: String,
        entry: String,
    },

    #[error("scene `{0}` has no default spawn point")]
    MissingDefaultSpawn(String),
}

/// Failure to decode a serialized world.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed world data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("world data is inconsistent: {0}")]
    Inconsistent(#[source] GeneratorError),

    #[error("no world has been generated yet")]
    NotGenerated,
}
