use anyhow::{Context, Result};
use scenegen_core::export::export_snapshot;
use scenegen_core::{Density, DensitySettings, ProceduralWorldGenerator, WorldGeneratorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let mut config = WorldGeneratorConfig::default();
    for arg in std::env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("--seed=") {
            config.seed = v.parse().with_context(|| format!("bad seed `{v}`"))?;
        } else if let Some(v) = arg.strip_prefix("--scenes=") {
            config.number_of_scenes = v.parse().with_context(|| format!("bad scene count `{v}`"))?;
        } else if let Some(v) = arg.strip_prefix("--density=") {
            let density = match v {
                "low" => Density::Low,
                "medium" => Density::Medium,
                "high" => Density::High,
                other => anyhow::bail!("unknown density `{other}`"),
            };
            config.density = DensitySettings::uniform(density);
        }
    }

    let mut generator = ProceduralWorldGenerator::new(config)?;
    generator.generate_world()?;

    let config = generator.config();
    let out_dir = format!(
        "exports/world_seed{}_{}scenes",
        config.seed, config.number_of_scenes
    );
    export_snapshot(&generator, &out_dir)?;

    println!("exported: {out_dir}");
    println!("checksum: {}", generator.diagnostics().checksum);
    Ok(())
}
