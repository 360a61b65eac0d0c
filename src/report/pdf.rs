//! A minimal PDF writer for the summary document.
//!
//! The document uses the standard Helvetica font with `WinAnsiEncoding`, so every character must
//! fit in a single Latin-1 byte. Nothing time-dependent is written: the same document always
//! produces the same bytes.

use crate::report::{Document, Gap, Line, Render, RenderError};
use tracing::trace;

/// Points per millimetre.
const MM: f64 = 72.0 / 25.4;
/// A4 portrait.
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 10.0 * MM;
/// Padding inside a text cell on its left and right.
const CELL_PADDING: f64 = 1.0 * MM;
/// A new page starts when a line would come closer than this to the bottom edge.
const BOTTOM_MARGIN: f64 = 20.0 * MM;
const TITLE_WIDTH: f64 = 200.0 * MM;
const FONT_SIZE: f64 = 12.0;
const LINE_HEIGHT: f64 = 10.0 * MM;
const ENCODING: &str = "Latin-1";

/// Glyph widths of Helvetica for the printable ASCII range, in 1/1000 of the font size.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
/// Used for Latin-1 letters outside ASCII, which are mostly accented forms of average width.
const DEFAULT_WIDTH: u16 = 556;

/// Renders a [`Document`] as a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl Render for PdfRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let mut layout = Layout::new();
        for line in document.lines() {
            match line {
                Line::Title(text) => {
                    let bytes = encode(text)?;
                    layout.centered(bytes);
                }
                Line::Entry { text, .. } | Line::Summary(text) => {
                    let bytes = encode(text)?;
                    layout.paragraphs(&bytes);
                }
                Line::Gap(Gap::Large) => layout.gap(10.0 * MM),
                Line::Gap(Gap::Small) => layout.gap(5.0 * MM),
            }
        }
        trace!("Laid out {} PDF page(s)", layout.pages.len());
        Ok(serialize(&layout.pages))
    }
}

/// Encodes `text` as Latin-1. Tabs become spaces and other control characters, apart from
/// newlines, are dropped.
fn encode(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => bytes.push(b'\n'),
            '\t' => bytes.push(b' '),
            c if c.is_control() => {}
            c if (c as u32) <= 0xFF => bytes.push(c as u32 as u8),
            c => {
                return Err(RenderError::Unencodable {
                    character: c,
                    code_point: c as u32,
                    encoding: ENCODING,
                    line: text.to_string(),
                })
            }
        }
    }
    Ok(bytes)
}

fn glyph_width(byte: u8) -> f64 {
    let units = match byte {
        0x20..=0x7E => HELVETICA_WIDTHS[usize::from(byte - 0x20)],
        _ => DEFAULT_WIDTH,
    };
    f64::from(units) * FONT_SIZE / 1000.0
}

fn text_width(bytes: &[u8]) -> f64 {
    bytes.iter().copied().map(glyph_width).sum()
}

/// A run of text placed on a page. `y` is the baseline, measured from the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
struct Run {
    x: f64,
    y: f64,
    bytes: Vec<u8>,
}

/// Places lines top to bottom, starting new pages as needed.
struct Layout {
    pages: Vec<Vec<Run>>,
    /// Distance of the next line's top from the top of the page.
    y: f64,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: MARGIN,
        }
    }

    fn gap(&mut self, height: f64) {
        self.y += height;
    }

    fn centered(&mut self, bytes: Vec<u8>) {
        let x = MARGIN + (TITLE_WIDTH - text_width(&bytes)) / 2.0;
        self.place(x, bytes);
    }

    /// Writes `bytes` left aligned, one paragraph per newline, wrapping at word boundaries.
    fn paragraphs(&mut self, bytes: &[u8]) {
        let max = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING;
        for paragraph in bytes.split(|&b| b == b'\n') {
            for line in wrap(paragraph, max) {
                self.place(MARGIN + CELL_PADDING, line);
            }
        }
    }

    fn place(&mut self, x: f64, bytes: Vec<u8>) {
        if self.y + LINE_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.pages.push(Vec::new());
            self.y = MARGIN;
        }
        let baseline = self.y + 0.5 * LINE_HEIGHT + 0.3 * FONT_SIZE;
        if !bytes.is_empty() {
            if let Some(page) = self.pages.last_mut() {
                page.push(Run {
                    x,
                    y: PAGE_HEIGHT - baseline,
                    bytes,
                });
            }
        }
        self.y += LINE_HEIGHT;
    }
}

/// Greedy word wrap. Words wider than `max` are broken between characters. Always returns at
/// least one line.
fn wrap(text: &[u8], max: f64) -> Vec<Vec<u8>> {
    let space = glyph_width(b' ');
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut width = 0.0;
    let mut fresh = true;

    for word in text.split(|&b| b == b' ') {
        if !fresh {
            if width + space + text_width(word) > max {
                lines.push(std::mem::take(&mut current));
                width = 0.0;
            } else {
                current.push(b' ');
                width += space;
            }
        }
        for &b in word {
            let w = glyph_width(b);
            if width + w > max && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                width = 0.0;
            }
            current.push(b);
            width += w;
        }
        fresh = false;
    }
    lines.push(current);
    lines
}

/// Escapes the bytes of a PDF literal string.
fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}

fn content_stream(runs: &[Run]) -> Vec<u8> {
    let mut out = Vec::new();
    for run in runs {
        out.extend_from_slice(
            format!("BT /F1 {FONT_SIZE:.0} Tf {:.2} {:.2} Td (", run.x, run.y).as_bytes(),
        );
        out.extend_from_slice(&escape(&run.bytes));
        out.extend_from_slice(b") Tj ET\n");
    }
    out
}

/// Accumulates numbered objects and their byte offsets.
struct Writer {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl Writer {
    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.out.len());
        let number = self.offsets.len();
        self.out
            .extend_from_slice(format!("{number} 0 obj\n").as_bytes());
        self.out.extend_from_slice(body);
        self.out.extend_from_slice(b"\nendobj\n");
    }
}

/// Object layout: 1 catalog, 2 page tree, 3 font, then a page and its content stream for each
/// page.
fn serialize(pages: &[Vec<Run>]) -> Vec<u8> {
    let mut w = Writer {
        out: b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
        offsets: Vec::new(),
    };
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    w.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    w.object(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );
    w.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");

    for (i, runs) in pages.iter().enumerate() {
        let contents = 5 + 2 * i;
        w.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.2} {PAGE_HEIGHT:.2}] \
                /Resources << /Font << /F1 3 0 R >> >> /Contents {contents} 0 R >>"
            )
            .as_bytes(),
        );
        let stream = content_stream(runs);
        let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        body.extend_from_slice(&stream);
        body.extend_from_slice(b"\nendstream");
        w.object(&body);
    }

    let xref = w.out.len();
    let count = w.offsets.len() + 1;
    let mut tail = format!("xref\n0 {count}\n0000000000 65535 f \n");
    for offset in &w.offsets {
        tail.push_str(&format!("{offset:010} 00000 n \n"));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n"
    ));
    w.out.extend_from_slice(tail.as_bytes());
    w.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, ReflectionRecord, Totals};
    use crate::report::{Currency, Policy, DEFAULT_PLACEHOLDER};

    fn document(record: &ReflectionRecord, policy: Policy) -> Document {
        let currency = Currency::default();
        Document::new(
            record,
            &Totals::compute(record),
            &currency,
            DEFAULT_PLACEHOLDER,
        )
        .sanitize(policy, &currency)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_pdf_structure() {
        let record = ReflectionRecord::from_values([(Field::Education, "1000")]);
        let bytes = PdfRenderer
            .render(&document(&record, Policy::Transliterate))
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"(Education: INR 1000) Tj"));
        assert!(contains(&bytes, b"(Self-Investment Reflection Summary) Tj"));
        assert!(contains(&bytes, b"Personal Growth Investment: 0.0% of your total spending"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let essay = "Fewer gadgets, more courses. ".repeat(300);
        let record = ReflectionRecord::from_values([(Field::Reflection, essay)]);
        let bytes = PdfRenderer
            .render(&document(&record, Policy::Transliterate))
            .unwrap();
        let xref = bytes
            .windows(6)
            .rposition(|w| w == b"\nxref\n")
            .unwrap()
            + 1;
        let tail = std::str::from_utf8(&bytes[xref..]).unwrap();
        let size: usize = tail
            .split("/Size ")
            .nth(1)
            .and_then(|s| s.split(' ').next())
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert!(size > 6, "expected several pages, got /Size {size}");

        let entries: Vec<&str> = tail.lines().skip(3).take(size - 1).collect();
        assert_eq!(entries.len(), size - 1);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()), "{entry}");
        }
        let startxref: usize = tail
            .lines()
            .rev()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert_eq!(startxref, xref);
    }

    #[test]
    fn test_deterministic() {
        let record = ReflectionRecord::from_values([(Field::Books, "200"), (Field::Fitness, "x")]);
        let doc = document(&record, Policy::Transliterate);
        assert_eq!(
            PdfRenderer.render(&doc).unwrap(),
            PdfRenderer.render(&doc).unwrap()
        );
    }

    #[test]
    fn test_unicode_policy_fails_on_glyphs() {
        let err = PdfRenderer
            .render(&document(&ReflectionRecord::new(), Policy::Unicode))
            .unwrap_err();
        match err {
            RenderError::Unencodable {
                character, line, ..
            } => {
                assert_eq!(character, '🧠');
                assert!(line.contains("Self-Investment"));
            }
        }
    }

    #[test]
    fn test_latin1_is_encoded_as_single_bytes() {
        assert_eq!(encode("café\tok").unwrap(), b"caf\xE9 ok".to_vec());
        assert_eq!(encode("a\u{7}b").unwrap(), b"ab".to_vec());
        assert!(encode("€").is_err());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(b"a(b)\\c"), b"a\\(b\\)\\\\c".to_vec());
    }

    #[test]
    fn test_wrap() {
        let max = text_width(b"aaaa aaaa") + 0.01;
        let lines = wrap(b"aaaa aaaa aaaa", max);
        assert_eq!(lines, vec![b"aaaa aaaa".to_vec(), b"aaaa".to_vec()]);

        let long = vec![b'm'; 200];
        let lines = wrap(&long, 100.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l) <= 100.0));
        assert_eq!(lines.concat(), long);

        assert_eq!(wrap(b"", 100.0), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_long_reflection_adds_pages() {
        let essay = "I will read more and spend less on gadgets. ".repeat(200);
        let record = ReflectionRecord::from_values([(Field::Reflection, essay)]);
        let bytes = PdfRenderer
            .render(&document(&record, Policy::Transliterate))
            .unwrap();
        assert!(!contains(&bytes, b"/Count 1 "));
        assert!(contains(&bytes, b"/Type /Page /Parent 2 0 R"));
        let pages = String::from_utf8_lossy(&bytes)
            .matches("/Type /Page /Parent")
            .count();
        assert!(pages > 1);
    }
}
