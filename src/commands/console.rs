//! A `Presenter` that talks to the user through a terminal.

use crate::model::{Field, ReflectionRecord};
use crate::presenter::Presenter;
use crate::report::Download;
use crate::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::warn;

/// Where field values come from.
enum Source<R> {
    /// Ask for each field and read the answer.
    Prompt(R),
    /// Answers that were collected beforehand.
    Answers(ReflectionRecord),
}

/// Shows the form and its results as plain text on `W`.
pub(crate) struct Console<R, W> {
    source: Source<R>,
    out: W,
    currency_symbol: String,
    link: bool,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    /// A console that prompts for every field on `out` and reads the answers from `input`.
    pub(crate) fn prompt(input: R, out: W, currency_symbol: impl Into<String>, link: bool) -> Self {
        Self {
            source: Source::Prompt(input),
            out,
            currency_symbol: currency_symbol.into(),
            link,
        }
    }

    /// A console that answers every field from `answers` without asking.
    pub(crate) fn answers(
        answers: ReflectionRecord,
        out: W,
        currency_symbol: impl Into<String>,
        link: bool,
    ) -> Self {
        Self {
            source: Source::Answers(answers),
            out,
            currency_symbol: currency_symbol.into(),
            link,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_out(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!("Unable to write to the terminal: {e}");
        }
    }
}

/// Prompts for `field` on `out` and reads the answer from `input`.
fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    currency_symbol: &str,
    field: Field,
) -> Result<String> {
    let prompt = field.prompt(currency_symbol);
    match field.is_free_text() {
        true => writeln!(out, "{prompt}\n(finish with an empty line)")?,
        false => write!(out, "{prompt}: ")?,
    }
    out.flush()?;

    if field.is_free_text() {
        return read_paragraph(input);
    }
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Unable to read from the terminal")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads lines until an empty line or the end of input. Returns them joined with newlines.
fn read_paragraph(input: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let n = input
            .read_line(&mut line)
            .context("Unable to read from the terminal")?;
        let line = line.trim_end_matches(['\r', '\n']);
        if n == 0 || line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

impl<R, W> Presenter for Console<R, W>
where
    R: BufRead,
    W: Write,
{
    fn read(&mut self, field: Field) -> Result<String> {
        match &mut self.source {
            Source::Answers(answers) => Ok(answers.get(field).to_string()),
            Source::Prompt(input) => ask(input, &mut self.out, &self.currency_symbol, field),
        }
    }

    fn success(&mut self, message: &str) {
        self.emit(message);
    }

    fn info(&mut self, message: &str) {
        self.emit(&format!("info: {message}"));
    }

    fn warning(&mut self, message: &str) {
        self.emit(&format!("warning: {message}"));
    }

    fn line(&mut self, text: &str) {
        self.emit(&format!("  {text}"));
    }

    fn download(&mut self, download: &Download) -> Result<()> {
        self.emit("---");
        if self.link {
            let anchor = download.anchor();
            self.emit(&anchor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::submit;
    use crate::report::RenderOptions;
    use crate::Tier;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_every_field() {
        let answers = "1000\n\n500\n\n\n\n\n200\n\n\nRead more\nSleep early\n\n";
        let mut console = Console::prompt(Cursor::new(answers), Vec::new(), "₹", false);
        let submission = submit(&mut console, &RenderOptions::default()).unwrap();

        assert_eq!(submission.totals().general_total(), 1500);
        assert_eq!(submission.totals().growth_total(), 200);
        assert_eq!(submission.tier(), Tier::Moderate);
        assert_eq!(submission.record().reflection(), "Read more\nSleep early");

        let out = String::from_utf8(console.into_out()).unwrap();
        assert!(out.contains("🏫 School/College Education (₹): "));
        assert!(out.contains("(finish with an empty line)"));
        assert!(out.contains("  🧾 General Spending Total: ₹ 1500"));
        assert!(out.contains("info: ⚠️ Not bad, but there's room to grow!"));
        assert!(!out.contains("<a href"));
    }

    #[test]
    fn test_prompt_handles_early_eof() {
        let mut console = Console::prompt(Cursor::new("42\r\n"), Vec::new(), "₹", false);
        let submission = submit(&mut console, &RenderOptions::default()).unwrap();
        assert_eq!(submission.totals().general_total(), 42);
        assert_eq!(submission.record().reflection(), "");
    }

    #[test]
    fn test_answers_with_link() {
        let record = ReflectionRecord::from_values([(Field::Books, "50"), (Field::Travel, "100")]);
        let mut console =
            Console::<std::io::Empty, _>::answers(record, Vec::new(), "₹", true);
        let submission = submit(&mut console, &RenderOptions::default()).unwrap();
        assert_eq!(submission.tier(), Tier::High);

        let out = String::from_utf8(console.into_out()).unwrap();
        assert!(!out.contains("School/College"));
        assert!(out.contains("💪 Great job!"));
        assert!(out.contains(&submission.download().anchor()));
    }
}
