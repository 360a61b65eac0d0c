//! The boundary between the reflection core and whatever shows the form to the user.
//!
//! A [`Presenter`] supplies the raw value of each field and displays what the core hands back.
//! The core never reaches for ambient state: [`submit`] reads every field through the presenter,
//! then runs the pure [`reflect`] on the collected record.

use crate::model::{Field, ReflectionRecord, Severity, Tier, Totals};
use crate::report::{self, Download, RenderOptions};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, trace};

/// Shown before the figures of a submission.
pub const SUMMARY_HEADING: &str = "🎯 Here's your reflection summary:";

/// A presentation layer for the reflection form.
pub trait Presenter {
    /// The current raw value of `field`, exactly as entered.
    fn read(&mut self, field: Field) -> Result<String>;

    fn success(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    /// A plain line of the on-screen summary.
    fn line(&mut self, text: &str);

    /// Offers the rendered document to the user.
    fn download(&mut self, download: &Download) -> Result<()>;

    /// Shows the message of `tier`, styled by its severity.
    fn notify(&mut self, tier: Tier) {
        let message = tier.message();
        match tier.severity() {
            Severity::Warning => self.warning(message),
            Severity::Info => self.info(message),
            Severity::Success => self.success(message),
        }
    }
}

/// Everything one submission produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    record: ReflectionRecord,
    totals: Totals,
    tier: Tier,
    download: Download,
}

impl Submission {
    pub fn record(&self) -> &ReflectionRecord {
        &self.record
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn download(&self) -> &Download {
        &self.download
    }

    /// The figures as they are shown on screen.
    pub fn summary_lines(&self, currency_symbol: &str) -> [String; 3] {
        [
            format!(
                "🧾 General Spending Total: {currency_symbol} {}",
                self.totals.general_total()
            ),
            format!(
                "📘 Self-Growth Investment Total: {currency_symbol} {}",
                self.totals.growth_total()
            ),
            format!(
                "📊 You've invested {:.1}% in personal growth.",
                self.totals.growth_percent()
            ),
        ]
    }
}

/// Computes the totals and tier of `record` and renders its summary document. This is a pure
/// function of its arguments.
pub fn reflect(record: ReflectionRecord, options: &RenderOptions) -> Result<Submission> {
    let totals = Totals::compute(&record);
    let tier = Tier::select(totals.growth_percent());
    debug!(
        "general={} growth={} percent={:.1} tier={tier}",
        totals.general_total(),
        totals.growth_total(),
        totals.growth_percent()
    );
    let download = report::render(&record, &totals, options)
        .context("Unable to generate the summary document")?;
    Ok(Submission {
        record,
        totals,
        tier,
        download,
    })
}

/// Reads every field from `presenter`, computes the submission and shows it.
///
/// Nothing is shown when the document cannot be rendered.
pub fn submit<P>(presenter: &mut P, options: &RenderOptions) -> Result<Submission>
where
    P: Presenter + ?Sized,
{
    let mut record = ReflectionRecord::new();
    for field in Field::ALL {
        let value = presenter
            .read(field)
            .with_context(|| format!("Unable to read the '{}' field", field.label()))?;
        trace!("{field} = {value:?}");
        record.set(field, value);
    }

    let submission = reflect(record, options)?;

    presenter.success(SUMMARY_HEADING);
    for line in submission.summary_lines(options.currency().symbol()) {
        presenter.line(&line);
    }
    presenter.notify(submission.tier());
    presenter.download(submission.download())?;
    Ok(submission)
}
