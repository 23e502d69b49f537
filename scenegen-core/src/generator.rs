use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::codec;
use crate::diagnostics::WorldDiagnostics;
use crate::error::{CodecError, ConfigError, GeneratorError};
use crate::level::LevelDescription;
use crate::params::WorldGeneratorConfig;
use crate::rng::Lcg;
use crate::systems::scene::{self, GenerationParams};
use crate::systems::stitch;
use crate::time::SceneTimer;

/// How one scene index gets its content, decided before any generation runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenePlan {
    Authored(LevelDescription),
    Generated(GenerationParams),
}

impl ScenePlan {
    pub fn resolve(config: &WorldGeneratorConfig) -> Vec<ScenePlan> {
        (0..config.number_of_scenes)
            .map(|index| match config.authored.get(&index) {
                Some(level) => ScenePlan::Authored(level.clone()),
                None => ScenePlan::Generated(GenerationParams::for_index(index)),
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Authored(level) => &level.name,
            Self::Generated(params) => &params.name,
        }
    }
}

/// Owns one random stream and the last world it produced. Every
/// `generate_world` call restarts the stream from the configured seed, so
/// the world is a pure function of the config.
pub struct ProceduralWorldGenerator {
    config: WorldGeneratorConfig,
    rng: Lcg,
    scenes: Vec<LevelDescription>,
    diagnostics: WorldDiagnostics,
    timings_ms: BTreeMap<String, f64>,
}

impl ProceduralWorldGenerator {
    pub fn new(config: WorldGeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: Lcg::new(config.seed),
            config,
            scenes: Vec::new(),
            diagnostics: WorldDiagnostics::default(),
            timings_ms: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &WorldGeneratorConfig {
        &self.config
    }

    pub fn scenes(&self) -> &[LevelDescription] {
        &self.scenes
    }

    pub fn diagnostics(&self) -> &WorldDiagnostics {
        &self.diagnostics
    }

    pub fn timings_ms(&self) -> &BTreeMap<String, f64> {
        &self.timings_ms
    }

    /// Builds every scene, stitches them and checks the exit graph. The
    /// stored world is only replaced once the whole run succeeded.
    pub fn generate_world(&mut self) -> Result<&[LevelDescription], GeneratorError> {
        self.rng = Lcg::new(self.config.seed);
        let plans = ScenePlan::resolve(&self.config);

        let mut scenes = Vec::with_capacity(plans.len());
        let mut timings_ms = BTreeMap::new();
        for plan in plans {
            let timer = SceneTimer::start(plan.name());
            let authored = matches!(plan, ScenePlan::Authored(_));
            let level = match plan {
                ScenePlan::Authored(level) => level,
                ScenePlan::Generated(params) => scene::run(&mut self.rng, &params, &self.config),
            };
            let (name, elapsed_ms) = timer.finish();
            debug!(
                scene = %name,
                authored,
                width = level.width,
                height = level.height,
                background = ?level.background,
                platforms = level.platforms.len(),
                vegetation = level.vegetation.len(),
                enemies = level.enemies.len(),
                elapsed_ms,
                "scene ready"
            );
            timings_ms.insert(name, elapsed_ms);
            scenes.push(level);
        }

        stitch::connect_scenes(&mut scenes);
        stitch::check_connectivity(&scenes)?;

        let diagnostics = WorldDiagnostics::compute(&scenes);
        info!(
            seed = self.config.seed,
            scenes = scenes.len(),
            checksum = %diagnostics.checksum,
            "world generated"
        );

        self.scenes = scenes;
        self.diagnostics = diagnostics;
        self.timings_ms = timings_ms;
        Ok(&self.scenes)
    }

    pub fn serialize_world(&self) -> Result<String, CodecError> {
        if self.scenes.is_empty() {
            return Err(CodecError::NotGenerated);
        }
        codec::serialize_world(self.config.seed, &self.scenes, &self.config.density)
    }

    pub fn deserialize_world(data: &str) -> Result<Vec<LevelDescription>, CodecError> {
        codec::deserialize_world(data)
    }
}

/// One-shot generation for callers that do not keep the generator around.
pub fn generate_world(
    config: &WorldGeneratorConfig,
) -> Result<Vec<LevelDescription>, GeneratorError> {
    let mut generator = ProceduralWorldGenerator::new(config.clone())?;
    generator.generate_world()?;
    Ok(generator.scenes)
}

#[cfg(test)]
mod tests {
    use super::{generate_world, ProceduralWorldGenerator, ScenePlan};
    use crate::error::{CodecError, ConfigError, GeneratorError};
    use crate::level::{BackgroundTheme, ExitDescriptor, LevelDescription};
    use crate::params::WorldGeneratorConfig;

    fn config_with_boss() -> WorldGeneratorConfig {
        let mut config = WorldGeneratorConfig {
            number_of_scenes: 4,
            ..WorldGeneratorConfig::default()
        };
        config.authored.insert(
            2,
            LevelDescription::new("boss_arena", BackgroundTheme::Ruins, 1600, 900),
        );
        config
    }

    #[test]
    fn plans_are_resolved_per_index() {
        let plans = ScenePlan::resolve(&config_with_boss());
        let names: Vec<&str> = plans.iter().map(ScenePlan::name).collect();
        assert_eq!(names, ["scene_0", "scene_1", "boss_arena", "scene_3"]);
        assert!(matches!(plans[2], ScenePlan::Authored(_)));
        assert!(matches!(plans[3], ScenePlan::Generated(ref p) if p.index == 3));
    }

    #[test]
    fn authored_scene_is_used_verbatim_then_stitched() {
        let scenes = generate_world(&config_with_boss()).expect("generate");
        let boss = &scenes[2];
        assert_eq!(boss.name, "boss_arena");
        assert_eq!((boss.width, boss.height), (1600, 900));
        assert!(boss.platforms.is_empty() && boss.enemies.is_empty());
        assert_eq!(boss.exits.len(), 2);
        assert!(boss.spawn("from_scene_1").is_some());
        assert!(boss.spawn("from_scene_3").is_some());
        assert_eq!(scenes[1].exits_towards("boss_arena").count(), 1);
    }

    #[test]
    fn repeated_runs_on_one_generator_match() {
        let mut generator =
            ProceduralWorldGenerator::new(WorldGeneratorConfig::default()).expect("config");
        let first = generator.generate_world().expect("first").to_vec();
        let checksum = generator.diagnostics().checksum.clone();
        let second = generator.generate_world().expect("second").to_vec();
        assert_eq!(first, second);
        assert_eq!(generator.diagnostics().checksum, checksum);
        assert_eq!(generator.timings_ms().len(), 5);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = WorldGeneratorConfig {
            number_of_scenes: 0,
            ..WorldGeneratorConfig::default()
        };
        assert!(matches!(
            ProceduralWorldGenerator::new(config.clone()),
            Err(ConfigError::NoScenes)
        ));
        assert_eq!(
            generate_world(&config),
            Err(GeneratorError::Config(ConfigError::NoScenes))
        );
    }

    #[test]
    fn dangling_authored_exit_fails_without_keeping_a_world() {
        let mut config = config_with_boss();
        if let Some(boss) = config.authored.get_mut(&2) {
            boss.exits.push(ExitDescriptor {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: 40.0,
                target_scene: "secret_room".to_string(),
                target_entry: "default".to_string(),
            });
        }
        let mut generator = ProceduralWorldGenerator::new(config).expect("config");
        assert!(matches!(
            generator.generate_world(),
            Err(GeneratorError::UnknownExitTarget { .. })
        ));
        assert!(generator.scenes().is_empty());
        assert!(matches!(
            generator.serialize_world(),
            Err(CodecError::NotGenerated)
        ));
    }
}
