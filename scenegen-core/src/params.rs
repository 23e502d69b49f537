use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::LevelDescription;

/// Smallest scene that still fits the ground strip, a platform band and the
/// entry zones on both sides.
pub const MIN_SCENE_WIDTH: u32 = 640;
pub const MIN_SCENE_HEIGHT: u32 = 480;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    pub fn multiplier(self) -> f32 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DensitySettings {
    pub platform: Density,
    pub vegetation: Density,
    pub enemy: Density,
}

impl DensitySettings {
    pub fn uniform(density: Density) -> Self {
        Self {
            platform: density,
            vegetation: density,
            enemy: density,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorldGeneratorConfig {
    pub seed: u64,
    pub number_of_scenes: usize,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub density: DensitySettings,
    /// Scene index -> hand-authored scene used verbatim instead of generating.
    #[serde(default)]
    pub authored: BTreeMap<usize, LevelDescription>,
}

impl Default for WorldGeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            number_of_scenes: 5,
            min_width: 1920,
            max_width: 3840,
            min_height: 1080,
            max_height: 2160,
            density: DensitySettings::default(),
            authored: BTreeMap::new(),
        }
    }
}

impl WorldGeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_scenes == 0 {
            return Err(ConfigError::NoScenes);
        }
        check_axis("width", self.min_width, self.max_width, MIN_SCENE_WIDTH)?;
        check_axis("height", self.min_height, self.max_height, MIN_SCENE_HEIGHT)?;

        let mut names = BTreeSet::new();
        for index in 0..self.number_of_scenes {
            let name = match self.authored.get(&index) {
                Some(level) => level.name.clone(),
                None => generated_scene_name(index),
            };
            if !names.insert(name.clone()) {
                return Err(ConfigError::DuplicateSceneName(name));
            }
        }
        if let Some(&index) = self
            .authored
            .keys()
            .find(|&&index| index >= self.number_of_scenes)
        {
            return Err(ConfigError::AuthoredIndexOutOfRange {
                index,
                scene_count: self.number_of_scenes,
            });
        }
        Ok(())
    }
}

fn check_axis(axis: &'static str, min: u32, max: u32, floor: u32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedBounds { axis, min, max });
    }
    if min < floor {
        return Err(ConfigError::TooSmall { axis, min, floor });
    }
    Ok(())
}

pub fn generated_scene_name(index: usize) -> String {
    format!("scene_{index}")
}
