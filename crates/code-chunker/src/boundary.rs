//! Text scans around a type declaration: the doc comment above it and the
//! line holding its opening brace.

use crate::source::LineBuffer;

/// First line of the block comment that ends on the line right above
/// `decl_start`, if there is one.
///
/// Only the adjacent line is checked for a closer; a blank line between
/// comment and declaration detaches the comment.
pub fn doc_comment_start(lines: &LineBuffer, decl_start: usize) -> Option<usize> {
    let above = decl_start.checked_sub(1).filter(|line| *line > 0)?;
    if !lines.line(above)?.trim().ends_with("*/") {
        return None;
    }

    (1..=above)
        .rev()
        .find(|line| lines.line(*line).is_some_and(|text| text.contains("/*")))
}

/// First line at or after `decl_start` that contains `{`
pub fn opening_brace_line(lines: &LineBuffer, decl_start: usize) -> Option<usize> {
    if decl_start == 0 {
        return None;
    }

    (decl_start..=lines.len())
        .find(|line| lines.line(*line).is_some_and(|text| text.contains('{')))
}
