//! Command handlers for the reflect CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod console;
mod form;
mod init;
mod report;

use crate::args::RenderArgs;
use crate::model::{Tier, Totals};
use crate::presenter::{self, Presenter};
use crate::{utils, Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use form::form;
pub use init::{init, Initialized};
pub use report::report;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// What a submission left behind: the figures and where the document was written.
#[derive(Debug, Clone, Serialize)]
pub struct Delivered {
    path: PathBuf,
    totals: Totals,
    tier: Tier,
}

impl Delivered {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// Runs one submission through `presenter` with the config's settings, overridden by `args`,
/// then writes the rendered document to the output directory.
async fn deliver<P>(
    config: &Config,
    args: &RenderArgs,
    presenter: &mut P,
) -> Result<Out<Delivered>>
where
    P: Presenter,
{
    let mut options = config.render_options();
    if let Some(format) = args.format() {
        options = options.with_format(format);
    }
    if let Some(policy) = args.policy() {
        options = options.with_policy(policy);
    }
    debug!(
        "Rendering as {} with the {} policy",
        options.format(),
        options.policy()
    );

    let submission = presenter::submit(presenter, &options)?;

    let dir = args
        .output_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir());
    utils::make_dir(&dir).await?;
    let path = dir.join(submission.download().filename());
    utils::write(&path, submission.download().bytes()).await?;

    Ok(Out::new(
        format!("Saved your summary to {}", path.display()),
        Delivered {
            path,
            totals: *submission.totals(),
            tier: submission.tier(),
        },
    ))
}
