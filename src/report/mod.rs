//! Turns a submission into a downloadable summary document.
//!
//! A [`Document`] is assembled from the record and its totals, sanitized according to a
//! [`Policy`], rendered in a [`Format`] and wrapped in a [`Download`].

mod document;
mod download;
mod pdf;
mod sanitize;
mod text;

pub use document::{Document, Gap, Line, DEFAULT_PLACEHOLDER, TITLE};
pub use download::{Download, MIME_TYPE};
pub use pdf::PdfRenderer;
pub use sanitize::{
    Currency, Policy, Sanitized, DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL,
};
pub use text::TextRenderer;

use crate::model::{ReflectionRecord, Totals};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The stem of the downloaded file's name.
const FILE_STEM: &str = "Self_Investment_Summary";

/// The one way rendering can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A character cannot be represented in the renderer's output encoding.
    #[error(
        "Cannot write {character:?} (U+{code_point:04X}) as {encoding} in the line \"{line}\"; \
        use the transliterate policy or the text format"
    )]
    Unencodable {
        character: char,
        code_point: u32,
        encoding: &'static str,
        line: String,
    },
}

/// Produces the bytes of a document in one output format.
pub trait Render {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError>;
}

/// The output formats of the summary document.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// A PDF using a single-byte Latin-1 font encoding.
    #[default]
    Pdf,
    /// Paged UTF-8 text.
    Text,
}

serde_plain::derive_display_from_serialize!(Format);
serde_plain::derive_fromstr_from_deserialize!(Format);

impl Format {
    pub fn filename(&self) -> String {
        match self {
            Format::Pdf => format!("{FILE_STEM}.pdf"),
            Format::Text => format!("{FILE_STEM}.txt"),
        }
    }

    /// The policy to use when none has been configured: the one that this format can always
    /// encode.
    pub fn default_policy(&self) -> Policy {
        match self {
            Format::Pdf => Policy::Transliterate,
            Format::Text => Policy::Unicode,
        }
    }

    pub fn renderer(&self) -> Box<dyn Render> {
        match self {
            Format::Pdf => Box::new(PdfRenderer),
            Format::Text => Box::new(TextRenderer),
        }
    }

    /// The text of the download link.
    pub fn link_text(&self) -> &'static str {
        match self {
            Format::Pdf => "📥 Download PDF",
            Format::Text => "📥 Download Text",
        }
    }
}

/// Everything that controls how the summary document is produced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    format: Format,
    policy: Option<Policy>,
    currency: Currency,
    placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: Format::default(),
            policy: None,
            currency: Currency::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new(
        format: Format,
        policy: Option<Policy>,
        currency: Currency,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            format,
            policy,
            currency,
            placeholder: placeholder.into(),
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The configured policy, or the format's default when none was configured.
    pub fn policy(&self) -> Policy {
        self.policy.unwrap_or_else(|| self.format.default_policy())
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// Builds, sanitizes and renders the summary document for a record.
///
/// # Errors
/// - [`RenderError::Unencodable`] when the policy leaves a character that the format cannot
///   encode. Nothing is produced in that case.
pub fn render(
    record: &ReflectionRecord,
    totals: &Totals,
    options: &RenderOptions,
) -> Result<Download, RenderError> {
    let policy = options.policy();
    let format = options.format();
    let document = Document::new(record, totals, options.currency(), options.placeholder())
        .sanitize(policy, options.currency());
    let bytes = format.renderer().render(&document)?;
    debug!(
        "Rendered {} bytes as {format} with the {policy} policy",
        bytes.len()
    );
    Ok(Download::new(format.filename(), format.link_text(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_policy_follows_format() {
        let options = RenderOptions::default();
        assert_eq!(options.policy(), Policy::Transliterate);
        assert_eq!(options.clone().with_format(Format::Text).policy(), Policy::Unicode);
        assert_eq!(
            options.with_format(Format::Text).with_policy(Policy::Transliterate).policy(),
            Policy::Transliterate
        );
    }

    #[test]
    fn test_render_pdf() {
        let record = ReflectionRecord::from_values([(Field::Education, "1000")]);
        let totals = Totals::compute(&record);
        let download = render(&record, &totals, &RenderOptions::default()).unwrap();
        assert_eq!(download.filename(), "Self_Investment_Summary.pdf");
        assert!(download.bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_unicode_pdf_fails() {
        let record = ReflectionRecord::new();
        let totals = Totals::compute(&record);
        let options = RenderOptions::default().with_policy(Policy::Unicode);
        let err = render(&record, &totals, &options).unwrap_err();
        assert!(err.to_string().contains("U+1F9E0"));
        assert!(err.to_string().contains("transliterate"));
    }

    #[test]
    fn test_render_unicode_text() {
        let record = ReflectionRecord::from_values([(Field::Books, "200")]);
        let totals = Totals::compute(&record);
        let options = RenderOptions::default().with_format(Format::Text);
        let download = render(&record, &totals, &options).unwrap();
        assert_eq!(download.filename(), "Self_Investment_Summary.txt");
        let text = String::from_utf8(download.bytes().to_vec()).unwrap();
        assert!(text.contains("Books & Resources: ₹ 200"));
    }

    #[test]
    fn test_transliterated_label_has_no_residual_bytes() {
        let record = ReflectionRecord::from_values([(Field::Gadgets, "₹ 300 🙂")]);
        let totals = Totals::compute(&record);
        let options = RenderOptions::default()
            .with_format(Format::Text)
            .with_policy(Policy::Transliterate);
        let download = render(&record, &totals, &options).unwrap();
        assert!(download.bytes().is_ascii());
        let text = String::from_utf8(download.bytes().to_vec()).unwrap();
        assert!(text.contains("Mobiles & Laptops: INR INR 300 \n"));
    }
}
