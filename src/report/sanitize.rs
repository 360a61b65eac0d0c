//! Text sanitization applied to every line of the summary document before it is rendered.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The default currency glyph used in labels and amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
/// The ASCII abbreviation that replaces [`DEFAULT_CURRENCY_SYMBOL`] when transliterating.
pub const DEFAULT_CURRENCY_CODE: &str = "INR";

/// How document text is adapted to the output encoding.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Emit text as-is. Needs an output encoding that covers every character used.
    Unicode,
    /// Replace the currency symbol with its code, then strip every non-ASCII character.
    Transliterate,
}

serde_plain::derive_display_from_serialize!(Policy);
serde_plain::derive_fromstr_from_deserialize!(Policy);

/// A currency glyph together with its three-letter ASCII code.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Currency {
    symbol: String,
    code: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL, DEFAULT_CURRENCY_CODE)
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            code: code.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// The result of sanitizing one piece of text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Sanitized<'a> {
    text: Cow<'a, str>,
    dropped: usize,
}

impl<'a> Sanitized<'a> {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> Cow<'a, str> {
        self.text
    }

    /// How many characters were removed, not counting currency symbols that were replaced.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Policy {
    /// Applies the policy to `text`.
    ///
    /// ```
    /// # use self_invest::report::{Currency, Policy};
    /// let currency = Currency::default();
    /// let out = Policy::Transliterate.apply("📘 Books: ₹ 200", &currency);
    /// assert_eq!(out.text(), "Books: INR 200");
    /// assert_eq!(Policy::Unicode.apply("📘 Books: ₹ 200", &currency).text(), "📘 Books: ₹ 200");
    /// ```
    pub fn apply<'a>(&self, text: &'a str, currency: &Currency) -> Sanitized<'a> {
        match self {
            Policy::Unicode => Sanitized {
                text: Cow::Borrowed(text),
                dropped: 0,
            },
            Policy::Transliterate => transliterate(text, currency),
        }
    }
}

fn transliterate<'a>(text: &'a str, currency: &Currency) -> Sanitized<'a> {
    let symbol = currency.symbol();
    let replaced = if !symbol.is_empty() && text.contains(symbol) {
        Cow::Owned(text.replace(symbol, currency.code()))
    } else {
        Cow::Borrowed(text)
    };
    if replaced.is_ascii() {
        return Sanitized {
            text: replaced,
            dropped: 0,
        };
    }

    let mut dropped = 0;
    let mut out = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            dropped += 1;
        }
    }

    // A decorative glyph at the start of a line leaves its separating space behind.
    let leading_glyph = replaced.chars().next().is_some_and(|c| !c.is_ascii());
    if leading_glyph {
        out = out.trim_start().to_string();
    }

    Sanitized {
        text: Cow::Owned(out),
        dropped,
    }
}
