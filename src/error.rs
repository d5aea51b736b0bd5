use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Something the parser was prepared to accept at the failing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Number,
    Operator,
    OpenParen,
    CloseParen,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Number => write!(f, "number"),
            Expected::Operator => write!(f, "operator"),
            Expected::OpenParen => write!(f, "'('"),
            Expected::CloseParen => write!(f, "')'"),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Input did not match the grammar. Evaluation never runs when one of these is produced.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub expected: Vec<Expected>,
    /// Text of the offending token, `None` when input ended early.
    pub found: Option<String>,
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(span: Span, expected: Vec<Expected>, found: Option<String>) -> Self {
        Self {
            span,
            expected,
            found,
            help: None,
        }
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn message(&self) -> String {
        let found = match &self.found {
            Some(text) => format!("'{}'", text),
            None => "end of input".to_string(),
        };
        format!("expected {} at {}", self.expected_list(), found)
    }

    /// 1-based line and column of the error start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let upto = &source[..self.span.start.min(source.len())];
        let line = upto.matches('\n').count() + 1;
        let line_start = upto.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = upto[line_start..].chars().count() + 1;
        (line, col)
    }

    /// One-line rendering, `<stdin>:1:4: error: expected ...`.
    pub fn describe(&self, source: &str, filename: Option<&str>) -> String {
        let (line, col) = self.line_col(source);
        format!(
            "{}:{}:{}: error: {}",
            filename.unwrap_or("<stdin>"),
            line,
            col,
            self.message()
        )
    }

    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        self.write_report(source, filename, io::stderr(), true)
    }

    pub fn write_report(
        &self,
        source: &str,
        filename: Option<&str>,
        out: impl io::Write,
        color: bool,
    ) -> io::Result<()> {
        let filename = filename.unwrap_or("<stdin>");
        let label_color = Color::Yellow;

        // ariadne counts chars; the trailing space gives end-of-input errors a column.
        let padded = format!("{} ", source);
        let range = self.char_range(source);

        let (title, help) = if color {
            (
                "Syntax Error".fg(label_color).to_string(),
                "help".fg(Color::Cyan).to_string(),
            )
        } else {
            ("Syntax Error".to_string(), "help".to_string())
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, range.start)
            .with_config(ariadne::Config::default().with_color(color))
            .with_message(format!("{}: {}", title, self.message()))
            .with_label(
                Label::new((filename, range))
                    .with_message(format!("expected {}", self.expected_list()))
                    .with_color(label_color),
            );

        if let Some(ref help_text) = self.help {
            report_builder = report_builder.with_note(format!("{}: {}", help, help_text));
        }

        report_builder
            .finish()
            .write((filename, Source::from(padded.as_str())), out)
    }

    /// Char range of the span, at least one char wide.
    fn char_range(&self, source: &str) -> Range<usize> {
        let to_chars = |byte: usize| source[..byte.min(source.len())].chars().count();
        let start = to_chars(self.span.start);
        let end = to_chars(self.span.end).max(start + 1);
        start..end
    }

    fn expected_list(&self) -> String {
        let items: Vec<String> = self.expected.iter().map(|e| e.to_string()).collect();
        match items.split_last() {
            None => "nothing".to_string(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ParseError {}
