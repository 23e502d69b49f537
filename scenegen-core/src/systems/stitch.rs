use std::collections::BTreeMap;

use glam::Vec2;
use tracing::warn;

use crate::error::GeneratorError;
use crate::level::{ExitDescriptor, LevelDescription, DEFAULT_ENTRY};

pub const EXIT_WIDTH: f32 = 48.0;
pub const EXIT_HEIGHT: f32 = 160.0;
/// Spawns float this far above the ground strip.
const SPAWN_LIFT: f32 = 48.0;
/// Entry spawns sit this far in from the edge they arrive through, clear of
/// the exit rectangle on that edge.
const ENTRY_INSET: f32 = 120.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

pub fn entry_key(from_scene: &str) -> String {
    format!("from_{from_scene}")
}

pub fn default_spawn(level: &LevelDescription) -> Vec2 {
    Vec2::new(
        (level.width as f32 * 0.5).floor(),
        level.ground_y() - SPAWN_LIFT,
    )
}

fn entry_spawn(level: &LevelDescription, side: Side) -> Vec2 {
    let x = match side {
        Side::Left => ENTRY_INSET,
        Side::Right => level.width as f32 - ENTRY_INSET,
    };
    Vec2::new(x, level.ground_y() - SPAWN_LIFT)
}

fn exit_on(
    level: &LevelDescription,
    side: Side,
    target_scene: &str,
    target_entry: String,
) -> ExitDescriptor {
    let x = match side {
        Side::Left => 0.0,
        Side::Right => level.width as f32 - EXIT_WIDTH,
    };
    ExitDescriptor {
        x,
        y: level.ground_y() - EXIT_HEIGHT,
        width: EXIT_WIDTH,
        height: EXIT_HEIGHT,
        target_scene: target_scene.to_string(),
        target_entry,
    }
}

/// Wires consecutive scenes into a corridor: scene `i` exits right into
/// scene `i + 1`, which exits left back into `i`. Every scene gets a
/// `default` spawn. Existing spawn keys are never overwritten, and no exit is
/// added toward a neighbour the scene already has an exit to.
pub fn connect_scenes(scenes: &mut [LevelDescription]) {
    for scene in &mut *scenes {
        let spawn = default_spawn(scene);
        scene
            .spawn_points
            .entry(DEFAULT_ENTRY.to_string())
            .or_insert(spawn);
    }

    for i in 1..scenes.len() {
        let (head, tail) = scenes.split_at_mut(i);
        let prev = &mut head[i - 1];
        let next = &mut tail[0];
        link(prev, Side::Right, next, Side::Left);
        link(next, Side::Left, prev, Side::Right);
    }
}

fn link(from: &mut LevelDescription, exit_side: Side, to: &mut LevelDescription, arrival: Side) {
    let arrival_spawn = entry_spawn(to, arrival);
    let declared: Vec<String> = from
        .exits_towards(&to.name)
        .map(|e| e.target_entry.clone())
        .collect();

    if declared.is_empty() {
        let key = entry_key(&from.name);
        let exit = exit_on(from, exit_side, &to.name, key.clone());
        from.exits.push(exit);
        to.spawn_points.entry(key).or_insert(arrival_spawn);
        return;
    }

    warn!(
        scene = %from.name,
        target = %to.name,
        "scene already declares an exit toward its neighbour, not stitching another"
    );
    for key in declared {
        to.spawn_points.entry(key).or_insert(arrival_spawn);
    }
}

/// Checks every exit resolves to a scene and an entry spawn in it, and that
/// every scene has a default spawn.
pub fn check_connectivity(scenes: &[LevelDescription]) -> Result<(), GeneratorError> {
    let by_name: BTreeMap<&str, &LevelDescription> =
        scenes.iter().map(|s| (s.name.as_str(), s)).collect();

    for scene in scenes {
        if !scene.spawn_points.contains_key(DEFAULT_ENTRY) {
            return Err(GeneratorError::MissingDefaultSpawn(scene.name.clone()));
        }
        for exit in &scene.exits {
            let target = by_name.get(exit.target_scene.as_str()).ok_or_else(|| {
                GeneratorError::UnknownExitTarget {
                    scene: scene.name.clone(),
                    target: exit.target_scene.clone(),
                }
            })?;
            if target.spawn(&exit.target_entry).is_none() {
                return Err(GeneratorError::MissingEntry {
                    scene: scene.name.clone(),
                    target: exit.target_scene.clone(),
                    entry: exit.target_entry.clone(),
                });
            }
        }
    }
    Ok(())
}
