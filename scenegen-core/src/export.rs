use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::codec;
use crate::generator::ProceduralWorldGenerator;
use crate::level::{BackgroundTheme, EnemyKind, LevelDescription, Rect, VegetationKind};

/// World pixels per preview pixel.
const PREVIEW_SCALE: f32 = 8.0;
const SPAWN_MARKER: f32 = 24.0;

#[derive(Serialize)]
struct SceneMeta<'a> {
    name: &'a str,
    width: u32,
    height: u32,
    platforms: usize,
    vegetation: usize,
    enemies: usize,
    exits: usize,
    hash: &'a str,
}

#[derive(Serialize)]
struct ExportMeta<'a> {
    seed: u64,
    scene_count: usize,
    scenes: Vec<SceneMeta<'a>>,
    checksum: &'a str,
    timestamp_unix_s: u64,
}

/// Writes `world.json`, `meta.json` and one layout preview PNG per scene.
pub fn export_snapshot(generator: &ProceduralWorldGenerator, dir: impl AsRef<Path>) -> Result<()> {
    let scenes = generator.scenes();
    if scenes.is_empty() {
        bail!("nothing to export: no world has been generated");
    }
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating export dir {}", dir.display()))?;

    let config = generator.config();
    let world_json = codec::serialize_world_pretty(config.seed, scenes, &config.density)?;
    fs::write(dir.join("world.json"), world_json)?;

    for (index, scene) in scenes.iter().enumerate() {
        let path = dir.join(format!("scene_{index}.png"));
        write_scene_preview(scene, &path)
            .with_context(|| format!("writing preview {}", path.display()))?;
    }

    let diagnostics = generator.diagnostics();
    let meta = ExportMeta {
        seed: config.seed,
        scene_count: scenes.len(),
        scenes: scenes
            .iter()
            .map(|s| SceneMeta {
                name: &s.name,
                width: s.width,
                height: s.height,
                platforms: s.platforms.len(),
                vegetation: s.vegetation.len(),
                enemies: s.enemies.len(),
                exits: s.exits.len(),
                hash: diagnostics
                    .scene_hashes
                    .get(&s.name)
                    .map_or("unset", String::as_str),
            })
            .collect(),
        checksum: &diagnostics.checksum,
        timestamp_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs()),
    };
    let meta_json = serde_json::to_string_pretty(&meta)?;
    fs::write(dir.join("meta.json"), meta_json)?;
    Ok(())
}

/// Top-down layout preview: flat rectangles only, no sprites.
fn write_scene_preview(scene: &LevelDescription, path: &Path) -> Result<()> {
    let w = ((scene.width as f32 / PREVIEW_SCALE).ceil() as u32).max(1);
    let h = ((scene.height as f32 / PREVIEW_SCALE).ceil() as u32).max(1);
    let mut img: RgbImage = ImageBuffer::from_pixel(w, h, Rgb(background_color(scene.background)));

    let ground = Rect {
        x: 0.0,
        y: scene.ground_y(),
        width: scene.width as f32,
        height: scene.height as f32 - scene.ground_y(),
    };
    fill_rect(&mut img, &ground, [92, 64, 40]);

    for platform in &scene.platforms {
        fill_rect(&mut img, &platform.rect(), [150, 120, 90]);
    }
    for plant in &scene.vegetation {
        fill_rect(&mut img, &plant.rect(), vegetation_color(plant.kind));
    }
    for enemy in &scene.enemies {
        fill_rect(&mut img, &enemy.rect(), enemy_color(enemy.kind));
    }
    for exit in &scene.exits {
        fill_rect(&mut img, &exit.rect(), [250, 220, 40]);
    }
    for point in scene.spawn_points.values() {
        let marker = Rect::from_center(*point, Vec2::splat(SPAWN_MARKER));
        fill_rect(&mut img, &marker, [255, 255, 255]);
    }

    img.save(path)?;
    Ok(())
}

fn fill_rect(img: &mut RgbImage, rect: &Rect, color: [u8; 3]) {
    let max_x = img.width() as f32;
    let max_y = img.height() as f32;
    let x0 = (rect.x / PREVIEW_SCALE).floor().clamp(0.0, max_x) as u32;
    let y0 = (rect.y / PREVIEW_SCALE).floor().clamp(0.0, max_y) as u32;
    let x1 = (rect.right() / PREVIEW_SCALE).ceil().clamp(0.0, max_x) as u32;
    let y1 = (rect.bottom() / PREVIEW_SCALE).ceil().clamp(0.0, max_y) as u32;
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgb(color));
        }
    }
}

fn background_color(theme: BackgroundTheme) -> [u8; 3] {
    match theme {
        BackgroundTheme::Forest => [118, 170, 206],
        BackgroundTheme::Caverns => [40, 36, 52],
        BackgroundTheme::Ruins => [176, 150, 120],
    }
}

fn vegetation_color(kind: VegetationKind) -> [u8; 3] {
    match kind {
        VegetationKind::Tree => [34, 110, 48],
        VegetationKind::Bush => [70, 140, 60],
        VegetationKind::Fern => [96, 168, 84],
        VegetationKind::Flower => [222, 110, 170],
    }
}

fn enemy_color(kind: EnemyKind) -> [u8; 3] {
    match kind {
        EnemyKind::Slime => [120, 220, 120],
        EnemyKind::Goblin => [200, 60, 40],
        EnemyKind::Wolf => [110, 110, 120],
    }
}
