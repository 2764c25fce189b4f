use anyhow::{Context as _, Result};
use rop_core::{config, Artifacts, PredictorConfig};

mod app;
mod state;
mod ui;

fn main() -> Result<()> {
    let base = config::executable_dir()?;
    let cfg = PredictorConfig::load_or_default(&base)
        .with_context(|| format!("failed to read {}", config::CONFIG_FILE))?;
    app::logging::init(&cfg, &base)?;

    match &cfg.source {
        Some(path) => log::info!("configuration read from {}", path.display()),
        None => log::info!("no {} found, using defaults", config::CONFIG_FILE),
    }

    // Both artifacts must load before the terminal is taken over.
    let paths = cfg.artifact_paths(&base);
    let artifacts = Artifacts::load(&paths).context("failed to load prediction artifacts")?;

    app::run::run(app::Context {
        pipeline: artifacts.into_pipeline(),
        paths,
    })
}
