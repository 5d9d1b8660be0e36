use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of an annotation or declaration, as reported by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Span {
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn at_line(line: usize, column: usize) -> Self {
        let pos = Position {
            offset: 0,
            line,
            column,
        };
        Self::new(pos, pos)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An error kind paired with the span of the annotation that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedError<K> {
    kind: K,
    span: Span,
}

impl<K> SpannedError<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl<K: Display> Display for SpannedError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.kind.fmt(f)
    }
}

impl<K: std::error::Error> std::error::Error for SpannedError<K> {}

fn build_marker(len: usize, single_line: bool) -> String {
    if single_line && len == 1 {
        "^".to_string()
    } else {
        "-".repeat(len.max(1))
    }
}

/// Formats a message with a source snippet and marker lines highlighting
/// the span.
///
/// Single-line spans get a caret (^) for a single char and dashes otherwise.
/// Multi-line spans underline each covered line. One line of context is
/// shown before and after the span.
///
/// ```text
/// (3:5) Unknown static field `DEFAULT_PROT` in `app.Defaults`
/// │ 2 │ class Server {
/// │ 3 │     Server(@Default(field = "DEFAULT_PROT") int port) {}
/// │   │     -----------------------------------
/// │ 4 │ }
/// ```
pub fn format_error(source: &str, span: Span, error: impl Display) -> String {
    let start_line = span.start.line.max(1);
    let end_line = span.end.line.max(start_line);
    let lines: Vec<&str> = source.lines().collect();

    let first_line = start_line.saturating_sub(1).max(1);
    let last_line = (end_line + 1).min(lines.len());

    let number_width = last_line.to_string().len();

    let mut out = String::new();
    out.push_str(&format!(
        "({}:{}) {}\n",
        span.start.line, span.start.column, error
    ));

    let single_line = start_line == end_line;

    for line_no in first_line..=last_line {
        let content = lines.get(line_no - 1).copied().unwrap_or("");
        out.push_str(&format!(
            "│ {:>number_width$} │ {}\n",
            line_no,
            content,
            number_width = number_width
        ));

        if line_no < start_line || line_no > end_line {
            continue;
        }

        let start_col = if line_no == span.start.line {
            span.start.column.max(1)
        } else {
            1
        };
        let end_col_excl = if line_no == span.end.line {
            span.end.column.max(start_col)
        } else {
            content.chars().count() + 1
        };

        if end_col_excl > start_col {
            let len = end_col_excl - start_col;
            let mut marker = String::with_capacity(start_col - 1 + len);
            marker.push_str(&" ".repeat(start_col - 1));
            marker.push_str(&build_marker(len, single_line));
            out.push_str(&format!(
                "│ {:>number_width$} │ {}\n",
                "",
                marker,
                number_width = number_width
            ));
        }
    }
    out
}
