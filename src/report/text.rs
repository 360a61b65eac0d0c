//! Renders the summary document as paged UTF-8 text, which can hold any character.

use crate::report::{Document, Gap, Line, Render, RenderError};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMNS: usize = 80;
const LINES_PER_PAGE: usize = 60;
const PAGE_BREAK: &str = "\u{c}";

/// Renders a [`Document`] as UTF-8 text in 80 terminal columns, with a form feed between pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Render for TextRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let mut rows: Vec<String> = Vec::new();
        for line in document.lines() {
            match line {
                Line::Title(text) => {
                    let text = clean(text);
                    let pad = COLUMNS.saturating_sub(text.width()) / 2;
                    rows.push(format!("{}{text}", " ".repeat(pad)));
                }
                Line::Entry { text, .. } | Line::Summary(text) => {
                    for paragraph in clean(text).split('\n') {
                        rows.extend(wrap(paragraph, COLUMNS));
                    }
                }
                Line::Gap(Gap::Large | Gap::Small) => rows.push(String::new()),
            }
        }

        let pages: Vec<String> = rows
            .chunks(LINES_PER_PAGE)
            .map(|page| {
                let mut s = page.join("\n");
                s.push('\n');
                s
            })
            .collect();
        Ok(pages.join(PAGE_BREAK).into_bytes())
    }
}

/// Tabs become spaces, other control characters apart from newlines are dropped.
fn clean(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Greedy word wrap by display width. Wide characters take two columns and combining marks none.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    let mut fresh = true;

    for word in text.split(' ') {
        if !fresh {
            if width + 1 + word.width() > columns {
                rows.push(std::mem::take(&mut current));
                width = 0;
            } else {
                current.push(' ');
                width += 1;
            }
        }
        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if width > 0 && width + w > columns {
                rows.push(std::mem::take(&mut current));
                width = 0;
            }
            current.push(c);
            width += w;
        }
        fresh = false;
    }
    rows.push(current);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, ReflectionRecord, Totals};
    use crate::report::{Currency, Policy, DEFAULT_PLACEHOLDER, TITLE};

    fn render(record: &ReflectionRecord) -> String {
        let currency = Currency::default();
        let doc = Document::new(
            record,
            &Totals::compute(record),
            &currency,
            DEFAULT_PLACEHOLDER,
        )
        .sanitize(Policy::Unicode, &currency);
        String::from_utf8(TextRenderer.render(&doc).unwrap()).unwrap()
    }

    #[test]
    fn test_keeps_unicode() {
        let record = ReflectionRecord::from_values([
            (Field::Education, "1000"),
            (Field::Reflection, "मैं और किताबें पढ़ूँगा"),
        ]);
        let text = render(&record);
        assert!(text.contains("🧠 Self-Investment Reflection Summary"));
        assert!(text.contains("Education: ₹ 1000\n"));
        assert!(text.contains("Personal Reflection: ₹ मैं और किताबें पढ़ूँगा\n"));
        assert!(text.contains("🧾 Total Spent on General Expenses: ₹ 1000\n"));
        assert!(!text.contains(PAGE_BREAK));
    }

    #[test]
    fn test_title_is_centered() {
        let text = render(&ReflectionRecord::new());
        let first = text.lines().next().unwrap();
        let pad = first.len() - first.trim_start().len();
        assert_eq!(pad, (COLUMNS - TITLE.width()) / 2);
    }

    #[test]
    fn test_multiline_reflection_paginates() {
        let reflection = vec!["one more habit"; 100].join("\n");
        let text = render(&ReflectionRecord::from_values([(Field::Reflection, reflection)]));
        assert_eq!(text.matches(PAGE_BREAK).count(), 1);
        assert!(text.lines().all(|l| l.width() <= COLUMNS));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("ab cd ef", 5), vec!["ab cd", "ef"]);
        assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap("", 3), vec![""]);
    }

    #[test]
    fn test_wrap_counts_display_width() {
        assert_eq!(wrap("漢字漢字漢", 4), vec!["漢字", "漢字", "漢"]);
        assert_eq!(wrap("ab 漢字", 4), vec!["ab", "漢字"]);
        // e + combining acute accent fits in one column
        assert_eq!(wrap("cafe\u{301} ok", 7), vec!["cafe\u{301} ok"]);
    }

    #[test]
    fn test_wide_reflection_stays_within_columns() {
        let reflection = "读书".repeat(60);
        let text = render(&ReflectionRecord::from_values([(Field::Reflection, reflection)]));
        assert!(text.lines().all(|l| l.width() <= COLUMNS));
        assert!(text.lines().any(|l| l.width() == COLUMNS));
    }
}
