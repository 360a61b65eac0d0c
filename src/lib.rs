//! Compares self-reported everyday spending with spending on personal growth, picks a qualitative
//! tier for the ratio and renders a downloadable summary document.
//!
//! The computation is pure: a [`ReflectionRecord`] goes in, [`Totals`], a [`Tier`] and a
//! [`report::Download`] come out. Anything interactive sits behind the [`presenter::Presenter`]
//! trait.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod presenter;
pub mod report;
mod utils;


pub use config::Config;
pub use error::{Error, Result};
pub use model::{coerce, Field, Group, ReflectionRecord, Severity, Tier, Totals};
