//! Configuration file handling.
//!
//! The configuration file is stored at `$SELF_INVEST_HOME/config.json` and controls how the
//! summary document is produced: its format, the sanitization policy, the currency and where the
//! document is written. The file is optional; when it is missing every setting has its default.

use crate::report::{
    Currency, Format, Policy, RenderOptions, DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL,
    DEFAULT_PLACEHOLDER,
};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "self-invest";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const REPORTS: &str = "reports";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SELF_INVEST_HOME` and from there it loads `$SELF_INVEST_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, its `reports` subdirectory and an initial `config.json` with
    /// default settings.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let config = Self {
            root,
            config_path,
            config_file,
        };
        utils::make_dir(config.output_dir()).await?;
        Ok(config)
    }

    /// Loads `config.json` from `home`. When the file does not exist the defaults are used, and
    /// nothing is created on disk.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = if maybe_relative.is_dir() {
            utils::canonicalize(&maybe_relative).await?
        } else {
            maybe_relative
        };

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn format(&self) -> Format {
        self.config_file.format
    }

    /// The configured policy, if any. See [`RenderOptions::policy`] for the effective one.
    pub fn policy(&self) -> Option<Policy> {
        self.config_file.policy
    }

    pub fn currency(&self) -> Currency {
        Currency::new(
            &self.config_file.currency_symbol,
            &self.config_file.currency_code,
        )
    }

    /// The directory documents are written to. A relative `output_dir` is resolved against the
    /// home directory.
    pub fn output_dir(&self) -> PathBuf {
        let p = self
            .config_file
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(REPORTS));
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// The rendering settings described by this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(
            self.config_file.format,
            self.config_file.policy,
            self.currency(),
            &self.config_file.placeholder,
        )
    }
}

/// Represents the serialization and deserialization format of the configuration file. Every
/// field except `app_name` may be omitted.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "self-invest",
///   "config_version": 1,
///   "format": "pdf",
///   "policy": "transliterate",
///   "currency_symbol": "₹",
///   "currency_code": "INR",
///   "placeholder": "Not filled",
///   "output_dir": "reports"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    /// Application name, should always be "self-invest"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The format of the summary document
    format: Format,

    /// How text is adapted to the format's encoding. When omitted it follows the format.
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<Policy>,

    /// The currency glyph used in the document
    currency_symbol: String,

    /// The three-letter code that replaces the glyph when transliterating
    currency_code: String,

    /// Written in place of values that were left empty
    placeholder: String,

    /// Where documents are written (relative to the home directory or absolute)
    /// Defaults to $SELF_INVEST_HOME/reports if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            format: Format::default(),
            policy: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            output_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.currency_code.is_ascii(),
            "Invalid currency_code in config file: '{}' is not ASCII",
            config.currency_code
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
