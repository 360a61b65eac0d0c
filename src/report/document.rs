//! Assembles the format-independent content of the summary document.

use crate::model::{Field, ReflectionRecord, Totals};
use crate::report::{Currency, Policy};
use serde::Serialize;
use tracing::{debug, warn};

/// The heading at the top of the document.
pub const TITLE: &str = "🧠 Self-Investment Reflection Summary";
/// Substituted for values that were left empty.
pub const DEFAULT_PLACEHOLDER: &str = "Not filled";

/// Vertical space between blocks of the document.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gap {
    /// After the title.
    Large,
    /// Between the entries and the summary figures.
    Small,
}

/// One line of the document, before any layout has been applied.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    Title(String),
    /// A `<label>: <currency> <value>` line for one form field.
    Entry { field: Field, text: String },
    /// One of the computed figures.
    Summary(String),
    Gap(Gap),
}

impl Line {
    /// The printable text of the line, `None` for gaps.
    pub fn text(&self) -> Option<&str> {
        match self {
            Line::Title(text) | Line::Entry { text, .. } | Line::Summary(text) => {
                Some(text.as_str())
            }
            Line::Gap(_) => None,
        }
    }
}

/// The content of the summary document: a title, one line per form field, and the totals.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Builds the document text for a record and its totals. Values that are empty or only
    /// whitespace are replaced with `placeholder`.
    pub fn new(
        record: &ReflectionRecord,
        totals: &Totals,
        currency: &Currency,
        placeholder: &str,
    ) -> Self {
        let symbol = currency.symbol();
        let mut lines = vec![Line::Title(TITLE.to_string()), Line::Gap(Gap::Large)];

        for entry in record.entries() {
            let value = if entry.is_blank() {
                placeholder
            } else {
                entry.value()
            };
            lines.push(Line::Entry {
                field: entry.field(),
                text: format!("{}: {symbol} {value}", entry.label()),
            });
        }

        lines.push(Line::Gap(Gap::Small));
        lines.push(Line::Summary(format!(
            "🧾 Total Spent on General Expenses: {symbol} {}",
            totals.general_total()
        )));
        lines.push(Line::Summary(format!(
            "📘 Total Spent on Self-Growth: {symbol} {}",
            totals.growth_total()
        )));
        lines.push(Line::Summary(format!(
            "📊 Personal Growth Investment: {:.1}% of your total spending",
            totals.growth_percent()
        )));

        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Applies `policy` to every line.
    ///
    /// Free-text reflection content is sanitized like everything else. Since that can silently
    /// lose what the user wrote, a warning is logged when it happens.
    pub fn sanitize(self, policy: Policy, currency: &Currency) -> Self {
        if policy == Policy::Unicode {
            return self;
        }
        let lines = self
            .lines
            .into_iter()
            .map(|line| match line {
                Line::Title(text) => Line::Title(clean(&text, policy, currency)),
                Line::Summary(text) => Line::Summary(clean(&text, policy, currency)),
                Line::Entry { field, text } => {
                    let sanitized = policy.apply(&text, currency);
                    if field.is_free_text() && sanitized.dropped() > 0 {
                        warn!(
                            "{} character(s) of the '{}' entry cannot be written with the {policy} \
                            policy and were removed",
                            sanitized.dropped(),
                            field.label()
                        );
                    }
                    Line::Entry {
                        field,
                        text: sanitized.text().to_string(),
                    }
                }
                gap @ Line::Gap(_) => gap,
            })
            .collect();
        debug!("Sanitized document with the {policy} policy");
        Self { lines }
    }

    /// The printable lines joined with newlines, without any layout.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .filter_map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn clean(text: &str, policy: Policy, currency: &Currency) -> String {
    policy.apply(text, currency).text().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> (ReflectionRecord, Totals) {
        let record = ReflectionRecord::from_values([
            (Field::Education, "1000"),
            (Field::Gadgets, "500"),
            (Field::Books, "200"),
            (Field::Reflection, "More books 📚"),
        ]);
        let totals = Totals::compute(&record);
        (record, totals)
    }

    #[test]
    fn test_document_lines() {
        let (record, totals) = scenario();
        let doc = Document::new(&record, &totals, &Currency::default(), DEFAULT_PLACEHOLDER);
        let texts: Vec<&str> = doc.lines().iter().filter_map(Line::text).collect();
        assert_eq!(texts.len(), 1 + 11 + 3);
        assert_eq!(texts[0], TITLE);
        assert_eq!(texts[1], "Education: ₹ 1000");
        assert_eq!(texts[2], "House & Car: ₹ Not filled");
        assert_eq!(texts[11], "Personal Reflection: ₹ More books 📚");
        assert_eq!(texts[12], "🧾 Total Spent on General Expenses: ₹ 1500");
        assert_eq!(texts[13], "📘 Total Spent on Self-Growth: ₹ 200");
        assert_eq!(
            texts[14],
            "📊 Personal Growth Investment: 11.8% of your total spending"
        );
    }

    #[test]
    fn test_blank_values_use_placeholder() {
        let record = ReflectionRecord::from_values([(Field::Travel, "   ")]);
        let totals = Totals::compute(&record);
        let doc = Document::new(&record, &totals, &Currency::default(), "n/a");
        assert!(doc.plain_text().contains("Travel & Picnics: ₹ n/a"));
    }

    #[test]
    fn test_sanitize_transliterate() {
        let (record, totals) = scenario();
        let currency = Currency::default();
        let doc = Document::new(&record, &totals, &currency, DEFAULT_PLACEHOLDER)
            .sanitize(Policy::Transliterate, &currency);
        let text = doc.plain_text();
        assert!(text.is_ascii());
        assert!(text.starts_with("Self-Investment Reflection Summary\n"));
        assert!(text.contains("Education: INR 1000"));
        assert!(text.contains("Personal Reflection: INR More books "));
        assert!(text.contains("Total Spent on Self-Growth: INR 200"));
        assert!(!text.contains('₹'));
    }

    #[test]
    fn test_sanitize_ascii_currency_is_consistent() {
        let (record, totals) = scenario();
        let currency = Currency::new("$", "USD");
        let doc = Document::new(&record, &totals, &currency, DEFAULT_PLACEHOLDER)
            .sanitize(Policy::Transliterate, &currency);
        let text = doc.plain_text();
        assert!(text.contains("Education: USD 1000"));
        assert!(text.contains("Total Spent on General Expenses: USD 1500"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_sanitize_unicode_is_identity() {
        let (record, totals) = scenario();
        let currency = Currency::default();
        let doc = Document::new(&record, &totals, &currency, DEFAULT_PLACEHOLDER);
        assert_eq!(doc.clone().sanitize(Policy::Unicode, &currency), doc);
    }
}
