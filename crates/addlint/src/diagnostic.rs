//! Findings produced by the rule

use std::fmt;

use serde::Serialize;

/// Source position of a node.
///
/// Lines and columns are both 1-indexed. Positions order by line, then column,
/// which is source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start position of a span.
    pub fn of(span: proc_macro2::Span) -> Self {
        Self::from(span.start())
    }
}

impl From<proc_macro2::LineColumn> for Position {
    // proc-macro2 columns are 0-indexed
    fn from(lc: proc_macro2::LineColumn) -> Self {
        Self {
            line: lc.line,
            column: lc.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One finding: where it is, and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Position of the reported node
    #[serde(flatten)]
    pub position: Position,

    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// The diagnostics of one evaluation, in source order.
///
/// Consumed once; run the evaluator again for a fresh sequence.
#[derive(Debug)]
pub struct Diagnostics {
    inner: std::vec::IntoIter<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new(found: Vec<Diagnostic>) -> Self {
        Self {
            inner: found.into_iter(),
        }
    }
}

impl Iterator for Diagnostics {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_line_column() {
        let pos = Position::from(proc_macro2::LineColumn { line: 3, column: 0 });
        assert_eq!(pos, Position::new(3, 1));
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 5));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(Position::new(4, 13), "integer addition found \"1 + 2\"");
        assert_eq!(diag.to_string(), "4:13: integer addition found \"1 + 2\"");
    }

    #[test]
    fn test_diagnostic_serializes_flat() {
        let diag = Diagnostic::new(Position::new(2, 7), "msg");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["line"], 2);
        assert_eq!(json["column"], 7);
        assert_eq!(json["message"], "msg");
    }

    #[test]
    fn test_diagnostics_iterates_once() {
        let mut diags = Diagnostics::new(vec![
            Diagnostic::new(Position::new(1, 1), "a"),
            Diagnostic::new(Position::new(2, 1), "b"),
        ]);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.next().unwrap().message, "a");
        assert_eq!(diags.next().unwrap().message, "b");
        assert!(diags.next().is_none());
    }
}
