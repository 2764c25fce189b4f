use std::{fs::OpenOptions, path::Path};

use anyhow::{Context as _, Result};
use env_logger::{Builder, Env, Target, WriteStyle};
use rop_core::PredictorConfig;

/// Sends log output to a file, since stderr belongs to the terminal UI.
///
/// `RUST_LOG` overrides the configured filter. Nothing is logged when the
/// config sets `log_file` to null.
pub fn init(config: &PredictorConfig, base: &Path) -> Result<()> {
    let Some(path) = config.log_path(base) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    builder(
        Env::default().default_filter_or(config.log_filter.as_str()),
        Target::Pipe(Box::new(file)),
    )
    .try_init()?;

    let shown = path.display().to_string();
    log::info!(log_file = shown.as_str(); "logging initialised");
    Ok(())
}

/// Plain-text logger that keeps the key-values attached to each record.
fn builder(env: Env<'_>, target: Target) -> Builder {
    let mut builder = Builder::from_env(env);
    builder.target(target).write_style(WriteStyle::Never);
    builder
}
