//! Source file handle for diagnostic rendering.

use meta_ir::Span;

use crate::span_utils::LineOffsetTable;

/// A source file with its pre-computed line offset table.
///
/// Built once per file and shared by every diagnostic rendered against it.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: String,
    text: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    /// Create a source file handle, computing the line table.
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceFile {
            path: path.into(),
            text,
            lines,
        }
    }

    /// The display path of the file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based (line, column) where a span starts.
    pub fn line_col(&self, span: Span) -> (u32, u32) {
        self.lines.offset_to_line_col(&self.text, span.start)
    }

    /// Render a span as `path:line:col`.
    pub fn position(&self, span: Span) -> String {
        let (line, col) = self.line_col(span);
        format!("{}:{line}:{col}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position() {
        let file = SourceFile::new("person.mt", "struct Person {\n    name: String,\n}");
        assert_eq!(file.position(Span::new(20, 24)), "person.mt:2:5");
    }
}
