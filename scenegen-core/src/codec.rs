//! Plain-data round trip of a generated world.
//!
//! The wire format is a JSON object with exactly three stable fields:
//! `seed`, `scenes` and `config` (the three density settings). Coordinates
//! decode straight into `glam::Vec2`, so consumers never see bare `{x, y}`
//! records.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::level::LevelDescription;
use crate::params::DensitySettings;
use crate::systems::stitch::check_connectivity;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub scenes: Vec<LevelDescription>,
    pub config: DensitySettings,
}

#[derive(Serialize)]
struct WorldSnapshotRef<'a> {
    seed: u64,
    scenes: &'a [LevelDescription],
    config: &'a DensitySettings,
}

impl WorldSnapshot {
    /// Parses and checks that every exit still resolves inside the snapshot.
    pub fn from_json(data: &str) -> Result<Self, CodecError> {
        let snapshot: WorldSnapshot = serde_json::from_str(data)?;
        check_connectivity(&snapshot.scenes).map_err(CodecError::Inconsistent)?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        serialize_world(self.seed, &self.scenes, &self.config)
    }
}

pub fn serialize_world(
    seed: u64,
    scenes: &[LevelDescription],
    config: &DensitySettings,
) -> Result<String, CodecError> {
    let snapshot = WorldSnapshotRef {
        seed,
        scenes,
        config,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

pub fn serialize_world_pretty(
    seed: u64,
    scenes: &[LevelDescription],
    config: &DensitySettings,
) -> Result<String, CodecError> {
    let snapshot = WorldSnapshotRef {
        seed,
        scenes,
        config,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

pub fn deserialize_world(data: &str) -> Result<Vec<LevelDescription>, CodecError> {
    Ok(WorldSnapshot::from_json(data)?.scenes)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{deserialize_world, serialize_world, WorldSnapshot};
    use crate::error::CodecError;
    use crate::level::{BackgroundTheme, LevelDescription, DEFAULT_ENTRY};
    use crate::params::{Density, DensitySettings};
    use crate::systems::stitch::connect_scenes;

    fn small_world() -> Vec<LevelDescription> {
        let mut scenes = vec![
            LevelDescription::new("a", BackgroundTheme::Forest, 900, 700),
            LevelDescription::new("b", BackgroundTheme::Ruins, 1100, 700),
        ];
        connect_scenes(&mut scenes);
        scenes
    }

    #[test]
    fn wire_format_has_three_top_level_fields() {
        let json = serialize_world(7, &small_world(), &DensitySettings::uniform(Density::Low))
            .expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        let object = value.as_object().expect("object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["config", "scenes", "seed"]);
        assert_eq!(value["config"]["enemy"], "low");
    }

    #[test]
    fn round_trip_restores_coordinates() {
        let scenes = small_world();
        let json = serialize_world(7, &scenes, &DensitySettings::default()).expect("serialize");
        let back = deserialize_world(&json).expect("deserialize");
        assert_eq!(back, scenes);
        let spawn: Vec2 = back[0].spawn_points[DEFAULT_ENTRY];
        assert_eq!(spawn, scenes[0].spawn_points[DEFAULT_ENTRY]);
    }

    #[test]
    fn snapshot_keeps_seed_and_densities() {
        let settings = DensitySettings {
            platform: Density::High,
            vegetation: Density::Low,
            enemy: Density::Medium,
        };
        let json = serialize_world(99, &small_world(), &settings).expect("serialize");
        let snapshot = WorldSnapshot::from_json(&json).expect("parse");
        assert_eq!(snapshot.seed, 99);
        assert_eq!(snapshot.config, settings);
        assert_eq!(snapshot.to_json().expect("serialize"), json);
    }

    #[test]
    fn malformed_input_is_a_structured_error() {
        assert!(matches!(
            deserialize_world("{\"seed\": 1, \"scenes\": ["),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            deserialize_world("{\"seed\": \"x\", \"scenes\": [], \"config\": {}}"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn dangling_exit_is_inconsistent() {
        let mut scenes = small_world();
        scenes.remove(1);
        let json = serialize_world(1, &scenes, &DensitySettings::default()).expect("serialize");
        assert!(matches!(
            deserialize_world(&json),
            Err(CodecError::Inconsistent(_))
        ));
    }
}
