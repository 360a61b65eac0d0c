use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where `init` put things.
#[derive(Debug, Clone, Serialize)]
pub struct Initialized {
    config_path: PathBuf,
    output_dir: PathBuf,
}

/// Creates the home directory, its `reports` subdirectory and a default `config.json`.
///
/// # Arguments
/// - `home` - The directory that will be the root of the data directory, e.g. `$HOME/self-invest`
///
/// # Errors
/// - Returns an error if a config file already exists or any file operation fails.
pub async fn init(home: &Path) -> Result<Out<Initialized>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(Out::new(
        format!(
            "Successfully created the config at {}",
            config.config_path().display()
        ),
        Initialized {
            config_path: config.config_path().to_path_buf(),
            output_dir: config.output_dir(),
        },
    ))
}
