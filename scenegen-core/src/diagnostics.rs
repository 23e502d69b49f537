use std::collections::BTreeMap;

use blake3::Hasher;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::level::LevelDescription;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldDiagnostics {
    pub scene_hashes: BTreeMap<String, String>,
    pub checksum: String,
}

impl Default for WorldDiagnostics {
    fn default() -> Self {
        Self {
            scene_hashes: BTreeMap::new(),
            checksum: String::from("unset"),
        }
    }
}

impl WorldDiagnostics {
    /// Per-scene hashes plus a checksum over them in scene order, so
    /// reordering scenes changes the checksum.
    pub fn compute(scenes: &[LevelDescription]) -> Self {
        let mut scene_hashes = BTreeMap::new();
        let mut combined = Hasher::new();
        for scene in scenes {
            let hash = hash_scene(scene);
            combined.update(scene.name.as_bytes());
            combined.update(hash.as_bytes());
            scene_hashes.insert(scene.name.clone(), hash);
        }
        Self {
            scene_hashes,
            checksum: combined.finalize().to_hex().to_string(),
        }
    }
}

fn update_str(h: &mut Hasher, s: &str) {
    h.update(&(s.len() as u64).to_le_bytes());
    h.update(s.as_bytes());
}

fn update_f32(h: &mut Hasher, v: f32) {
    h.update(&v.to_bits().to_le_bytes());
}

fn update_vec2(h: &mut Hasher, v: Vec2) {
    update_f32(h, v.x);
    update_f32(h, v.y);
}

fn hash_scene(scene: &LevelDescription) -> String {
    let mut h = Hasher::new();
    update_str(&mut h, &scene.name);
    h.update(&[scene.background.as_u8()]);
    h.update(&scene.width.to_le_bytes());
    h.update(&scene.height.to_le_bytes());

    for (key, point) in &scene.spawn_points {
        update_str(&mut h, key);
        update_vec2(&mut h, *point);
    }
    for exit in &scene.exits {
        for v in [exit.x, exit.y, exit.width, exit.height] {
            update_f32(&mut h, v);
        }
        update_str(&mut h, &exit.target_scene);
        update_str(&mut h, &exit.target_entry);
    }
    for platform in &scene.platforms {
        update_vec2(&mut h, platform.center);
        update_f32(&mut h, platform.width);
        update_f32(&mut h, platform.height);
    }
    for plant in &scene.vegetation {
        update_vec2(&mut h, plant.position);
        h.update(&[plant.kind.as_u8()]);
    }
    for enemy in &scene.enemies {
        update_vec2(&mut h, enemy.position);
        h.update(&[enemy.kind.as_u8()]);
        for stat in [
            enemy.stats.health,
            enemy.stats.attack,
            enemy.stats.defense,
            enemy.stats.speed,
        ] {
            h.update(&stat.to_le_bytes());
        }
    }
    h.finalize().to_hex().to_string()
}
