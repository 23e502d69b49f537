use glam::Vec2;
use tracing::trace;

use crate::level::{EnemyKind, EnemyPlacement, EnemyStats, VegetationKind, VegetationPlacement};
use crate::params::Density;
use crate::rng::Lcg;

pub const VEGETATION_ATTEMPTS: usize = 10;
pub const ENEMY_ATTEMPTS: usize = 20;

const VEGETATION_SPACING: f32 = 180.0;
const BASE_ENEMY_COUNT: f32 = 2.0;
const MIN_ENEMY_SEPARATION: f32 = 140.0;
const MIN_VEGETATION_CLEARANCE: f32 = 48.0;

/// Distance from each side edge kept free of enemies, where stitched entry
/// spawns land.
pub const ENTRY_CLEARANCE: f32 = 160.0;

/// Horizontal placement band. `y` is the top edge items rest on. Only exists
/// while a scene is being generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Surface {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn inset(&self, margin: f32) -> Surface {
        Surface {
            x: self.x + margin,
            y: self.y,
            width: self.width - 2.0 * margin,
        }
    }
}

pub fn vegetation_count(surface_width: f32, density: Density) -> usize {
    (surface_width / VEGETATION_SPACING * density.multiplier())
        .floor()
        .max(0.0) as usize
}

pub fn enemy_count(density: Density) -> usize {
    ((BASE_ENEMY_COUNT * density.multiplier()).floor() as usize).max(1)
}

/// Stats depend only on the scene index, so scene order alone sets the
/// difficulty curve.
pub fn enemy_stats(scene_index: usize) -> EnemyStats {
    let index = scene_index as f64;
    let base_level = (3.0 + index * 1.5).floor();
    let scaling = 1.0 + index * 0.2;
    EnemyStats::uniform((base_level * scaling).floor() as u32)
}

/// Draws a whole-pixel center x that keeps `half_width` inside the surface.
fn draw_x(rng: &mut Lcg, surface: &Surface, half_width: f32) -> Option<f32> {
    let lo = (surface.x + half_width).ceil();
    let hi = (surface.right() - half_width).floor();
    if hi < lo {
        return None;
    }
    Some(rng.next_int(lo as i64, hi as i64 + 1) as f32)
}

fn resting_on(surface: &Surface, x: f32, footprint: Vec2) -> Vec2 {
    Vec2::new(x, surface.y - footprint.y * 0.5)
}

/// Places vegetation on one surface, appending to `placed` (all vegetation
/// of the scene so far). Overlaps are retried up to `VEGETATION_ATTEMPTS`
/// times, after which the last position is kept anyway.
pub fn place_vegetation(
    rng: &mut Lcg,
    surface: &Surface,
    density: Density,
    placed: &mut Vec<VegetationPlacement>,
) {
    let fitting: Vec<VegetationKind> = VegetationKind::ALL
        .into_iter()
        .filter(|k| k.footprint().x <= surface.width)
        .collect();
    if fitting.is_empty() {
        return;
    }

    for _ in 0..vegetation_count(surface.width, density) {
        let kind = fitting[rng.next_int(0, fitting.len() as i64) as usize];
        let footprint = kind.footprint();

        let mut candidate = None;
        for attempt in 0..VEGETATION_ATTEMPTS {
            let Some(x) = draw_x(rng, surface, footprint.x * 0.5) else {
                break;
            };
            let item = VegetationPlacement {
                position: resting_on(surface, x, footprint),
                kind,
            };
            let rect = item.rect();
            candidate = Some(item);
            if !placed.iter().any(|other| other.rect().overlaps(&rect)) {
                break;
            }
            if attempt + 1 == VEGETATION_ATTEMPTS {
                trace!(?kind, x, "vegetation retries exhausted, accepting overlap");
            }
        }
        placed.extend(candidate);
    }
}

/// Places enemies on the ground surface, clear of each other and of all
/// vegetation. Retries exhausted means the last drawn position is kept.
pub fn place_enemies(
    rng: &mut Lcg,
    ground: &Surface,
    density: Density,
    scene_index: usize,
    vegetation: &[VegetationPlacement],
) -> Vec<EnemyPlacement> {
    let stats = enemy_stats(scene_index);
    let count = enemy_count(density);
    let mut enemies: Vec<EnemyPlacement> = Vec::with_capacity(count);

    for _ in 0..count {
        let kind = EnemyKind::ALL[rng.next_int(0, EnemyKind::ALL.len() as i64) as usize];
        let footprint = kind.footprint();
        let lane = if ground.width - 2.0 * ENTRY_CLEARANCE >= footprint.x {
            ground.inset(ENTRY_CLEARANCE)
        } else {
            *ground
        };

        let mut candidate = None;
        for attempt in 0..ENEMY_ATTEMPTS {
            let Some(x) = draw_x(rng, &lane, footprint.x * 0.5) else {
                break;
            };
            let enemy = EnemyPlacement {
                position: resting_on(&lane, x, footprint),
                kind,
                stats,
            };
            candidate = Some(enemy);
            if enemy_fits(&enemy, &enemies, vegetation) {
                break;
            }
            if attempt + 1 == ENEMY_ATTEMPTS {
                trace!(?kind, x, "enemy retries exhausted, accepting overlap");
            }
        }
        enemies.extend(candidate);
    }
    enemies
}

fn enemy_fits(
    enemy: &EnemyPlacement,
    enemies: &[EnemyPlacement],
    vegetation: &[VegetationPlacement],
) -> bool {
    let rect = enemy.rect();
    let x = enemy.position.x;
    let clear_of_enemies = enemies.iter().all(|other| {
        !other.rect().overlaps(&rect) && (other.position.x - x).abs() >= MIN_ENEMY_SEPARATION
    });
    clear_of_enemies
        && vegetation
            .iter()
            .all(|v| (v.position.x - x).abs() >= MIN_VEGETATION_CLEARANCE)
}
