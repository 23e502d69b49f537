use crate::level::{BackgroundTheme, LevelDescription};
use crate::params::{generated_scene_name, WorldGeneratorConfig};
use crate::rng::Lcg;
use crate::systems::placement::{self, Surface};
use crate::systems::platforms;

const EXTRA_LARGE_CHANCE: f64 = 0.10;
const LARGE_CHANCE: f64 = 0.30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Normal,
    Large,
    ExtraLarge,
}

impl SizeClass {
    /// Fractions of the configured `[min, max]` range this class draws from.
    fn span(self) -> (f64, f64) {
        match self {
            Self::Normal => (0.0, 0.5),
            Self::Large => (0.4, 0.8),
            Self::ExtraLarge => (0.7, 1.0),
        }
    }
}

/// Everything the generator knows about a scene before building it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    pub index: usize,
    pub name: String,
}

impl GenerationParams {
    pub fn for_index(index: usize) -> Self {
        Self {
            index,
            name: generated_scene_name(index),
        }
    }
}

pub fn classify_size(roll: f64) -> SizeClass {
    if roll < EXTRA_LARGE_CHANCE {
        SizeClass::ExtraLarge
    } else if roll < EXTRA_LARGE_CHANCE + (1.0 - EXTRA_LARGE_CHANCE) * LARGE_CHANCE {
        SizeClass::Large
    } else {
        SizeClass::Normal
    }
}

pub fn pick_theme(roll: f64) -> BackgroundTheme {
    if roll < 0.6 {
        BackgroundTheme::Forest
    } else if roll < 0.8 {
        BackgroundTheme::Caverns
    } else {
        BackgroundTheme::Ruins
    }
}

/// Inclusive draw from the `class` sub-range of `[min, max]`.
fn pick_dimension(rng: &mut Lcg, min: u32, max: u32, class: SizeClass) -> u32 {
    let range = f64::from(max - min);
    let (lo, hi) = class.span();
    let lo = i64::from(min) + (range * lo).floor() as i64;
    let hi = i64::from(min) + (range * hi).floor() as i64;
    rng.next_int(lo, hi + 1) as u32
}

/// Ground strip plus the top edge of every platform.
pub fn surfaces(level: &LevelDescription) -> Vec<Surface> {
    let ground = Surface {
        x: 0.0,
        y: level.ground_y(),
        width: level.width as f32,
    };
    std::iter::once(ground)
        .chain(level.platforms.iter().map(|p| {
            let rect = p.rect();
            Surface {
                x: rect.x,
                y: rect.y,
                width: rect.width,
            }
        }))
        .collect()
}

/// Builds one scene: size, theme, platforms, then vegetation on every surface
/// and enemies on the ground.
pub fn run(
    rng: &mut Lcg,
    params: &GenerationParams,
    config: &WorldGeneratorConfig,
) -> LevelDescription {
    let class = classify_size(rng.next_f64());
    let width = pick_dimension(rng, config.min_width, config.max_width, class);
    let height = pick_dimension(rng, config.min_height, config.max_height, class);
    let background = pick_theme(rng.next_f64());

    let mut level = LevelDescription::new(params.name.clone(), background, width, height);
    level.platforms = platforms::run(rng, width, height, config.density.platform);

    let surfaces = surfaces(&level);
    let mut vegetation = Vec::new();
    for surface in &surfaces {
        placement::place_vegetation(rng, surface, config.density.vegetation, &mut vegetation);
    }
    level.enemies = placement::place_enemies(
        rng,
        &surfaces[0],
        config.density.enemy,
        params.index,
        &vegetation,
    );
    level.vegetation = vegetation;
    level
}

#[cfg(test)]
mod tests {
    use super::{classify_size, pick_theme, run, surfaces, GenerationParams, SizeClass};
    use crate::level::BackgroundTheme;
    use crate::params::WorldGeneratorConfig;
    use crate::rng::Lcg;

    #[test]
    fn size_class_thresholds() {
        assert_eq!(classify_size(0.05), SizeClass::ExtraLarge);
        assert_eq!(classify_size(0.10), SizeClass::Large);
        assert_eq!(classify_size(0.36), SizeClass::Large);
        assert_eq!(classify_size(0.38), SizeClass::Normal);
        assert_eq!(classify_size(0.99), SizeClass::Normal);
    }

    #[test]
    fn theme_thresholds() {
        assert_eq!(pick_theme(0.0), BackgroundTheme::Forest);
        assert_eq!(pick_theme(0.6), BackgroundTheme::Caverns);
        assert_eq!(pick_theme(0.79), BackgroundTheme::Caverns);
        assert_eq!(pick_theme(0.8), BackgroundTheme::Ruins);
    }

    #[test]
    fn dimensions_stay_within_bounds() {
        let config = WorldGeneratorConfig::default();
        for seed in 0..200 {
            let mut rng = Lcg::new(seed);
            let level = run(&mut rng, &GenerationParams::for_index(0), &config);
            assert!((config.min_width..=config.max_width).contains(&level.width));
            assert!((config.min_height..=config.max_height).contains(&level.height));
        }
    }

    #[test]
    fn collapsed_bounds_produce_fixed_size() {
        let config = WorldGeneratorConfig {
            min_width: 1500,
            max_width: 1500,
            min_height: 900,
            max_height: 900,
            ..WorldGeneratorConfig::default()
        };
        for seed in 0..20 {
            let level = run(&mut Lcg::new(seed), &GenerationParams::for_index(2), &config);
            assert_eq!((level.width, level.height), (1500, 900));
        }
    }

    #[test]
    fn ground_surface_spans_the_scene() {
        let config = WorldGeneratorConfig::default();
        let level = run(&mut Lcg::new(9), &GenerationParams::for_index(1), &config);
        let surfaces = surfaces(&level);
        assert_eq!(surfaces.len(), level.platforms.len() + 1);
        assert_eq!(surfaces[0].width, level.width as f32);
        assert_eq!(surfaces[0].y, level.ground_y());
    }

    #[test]
    fn enemies_stand_on_the_ground() {
        let config = WorldGeneratorConfig::default();
        let level = run(&mut Lcg::new(21), &GenerationParams::for_index(3), &config);
        assert_eq!(level.name, "scene_3");
        assert!(!level.enemies.is_empty());
        for enemy in &level.enemies {
            assert_eq!(enemy.rect().bottom(), level.ground_y());
        }
        assert!(level.spawn_points.is_empty());
        assert!(level.exits.is_empty());
    }
}
