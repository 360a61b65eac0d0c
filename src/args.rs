//! These structs provide the CLI interface for the reflect CLI.

use crate::report::{Format, Policy};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// reflect: Where are you investing?
///
/// A quick reflection that compares what you spend on everyday things with what you invest in
/// your own growth: books, fitness, training. Answer the questions, see what share of your
/// spending goes into personal growth, and take home a summary document.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory with a default config.json and a reports directory.
    ///
    /// This is optional: without a config file every setting has its default. Run it when you
    /// want to change the defaults, e.g. the currency or the document format.
    Init,
    /// Answer the reflection questions on the terminal and get your summary.
    ///
    /// The reflection question accepts several lines; finish it with an empty line.
    Form(RenderArgs),
    /// Produce the summary from answers stored in a JSON file.
    ///
    /// The file holds an object that maps field names to values, for example
    /// {"education": "1000", "gadgets": 500, "books": "200", "reflection": "Read more"}.
    /// Field names: education, house_and_car, gadgets, entertainment, fashion, travel,
    /// other_investments, books, fitness, training, reflection.
    Report(ReportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration and reports are held. Defaults to ~/self-invest
    #[arg(long, env = "SELF_INVEST_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Settings that override config.json for one run.
#[derive(Debug, Parser, Clone, Default)]
pub struct RenderArgs {
    /// The format of the summary document.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// How text is adapted to the document's encoding. Defaults to transliterate for pdf and
    /// unicode for text.
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Where to write the summary document. Defaults to $SELF_INVEST_HOME/reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also print an HTML download link that embeds the document as base64.
    #[arg(long)]
    link: bool,
}

impl RenderArgs {
    pub fn new(
        format: Option<Format>,
        policy: Option<Policy>,
        output_dir: Option<PathBuf>,
        link: bool,
    ) -> Self {
        Self {
            format,
            policy,
            output_dir,
            link,
        }
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn policy(&self) -> Option<Policy> {
        self.policy
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn link(&self) -> bool {
        self.link
    }
}

/// (Not shown): Args for the `reflect report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The JSON file to read. If not supplied, input will be taken from stdin.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    #[clap(flatten)]
    render: RenderArgs,
}

impl ReportArgs {
    pub fn new(input: Option<PathBuf>, render: RenderArgs) -> Self {
        Self { input, render }
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn render(&self) -> &RenderArgs {
        &self.render
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("self-invest"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SELF_INVEST_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("self-invest")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
