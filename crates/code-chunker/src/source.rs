use serde::{Deserialize, Serialize};

/// Inclusive, 1-indexed line range of a declaration.
///
/// A bound of `0` means the provider had no position for the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Both bounds carry a real position
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.start > 0 && self.end > 0
    }

    /// `other` lies entirely within this span
    #[must_use]
    pub const fn covers(&self, other: LineSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The source file as raw lines; index `i` is physical line `i`.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split source text into lines without touching their content
    pub fn from_source(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `line` (1-indexed)
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Lines `start..=end`, each followed by a newline.
    ///
    /// Unknown bounds give an empty string; `end` is clamped to the buffer.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        if start == 0 || end == 0 {
            return String::new();
        }

        let last = end.min(self.lines.len());
        let mut out = String::new();
        for line in self.lines.iter().take(last).skip(start - 1) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Slice for a declaration span
    #[must_use]
    pub fn slice_span(&self, span: LineSpan) -> String {
        self.slice(span.start, span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> LineBuffer {
        LineBuffer::from_source("one\n  two\nthree\n")
    }

    #[test]
    fn test_slice_is_verbatim() {
        assert_eq!(buffer().slice(1, 2), "one\n  two\n");
        assert_eq!(buffer().slice(2, 2), "  two\n");
    }

    #[test]
    fn test_slice_unknown_bounds_is_empty() {
        assert_eq!(buffer().slice(0, 2), "");
        assert_eq!(buffer().slice(1, 0), "");
        assert_eq!(buffer().slice_span(LineSpan::default()), "");
    }

    #[test]
    fn test_slice_clamps_end() {
        assert_eq!(buffer().slice(3, 99), "three\n");
        assert_eq!(buffer().slice(7, 9), "");
    }

    #[test]
    fn test_line_indexing() {
        let buffer = buffer();
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.line(0), None);
        assert_eq!(buffer.line(2), Some("  two"));
        assert_eq!(buffer.line(4), None);
    }

    #[test]
    fn test_crlf_lines_keep_indentation() {
        let buffer = LineBuffer::from_source("a\r\n\tb\r\n");
        assert_eq!(buffer.slice(1, 2), "a\n\tb\n");
    }

    #[test]
    fn test_span_covers() {
        let outer = LineSpan::new(2, 5);
        assert!(outer.covers(LineSpan::new(2, 5)));
        assert!(outer.covers(LineSpan::new(3, 3)));
        assert!(!outer.covers(LineSpan::new(5, 6)));
        assert!(!outer.covers(LineSpan::new(1, 2)));
    }
}
