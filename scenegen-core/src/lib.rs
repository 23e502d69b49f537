pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod generator;
pub mod level;
pub mod params;
pub mod rng;
pub mod systems;
pub mod time;

pub use codec::{deserialize_world, serialize_world, WorldSnapshot};
pub use error::{CodecError, ConfigError, GeneratorError};
pub use generator::{generate_world, ProceduralWorldGenerator, ScenePlan};
pub use level::{
    BackgroundTheme, EnemyKind, EnemyPlacement, EnemyStats, ExitDescriptor, LevelDescription,
    PlatformDescriptor, VegetationKind, VegetationPlacement,
};
pub use params::{Density, DensitySettings, WorldGeneratorConfig};
pub use systems::stitch::connect_scenes;
