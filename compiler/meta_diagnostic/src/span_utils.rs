//! Span utility functions for diagnostic rendering.
//!
//! Provides helpers for computing line and column numbers from spans.

use meta_ir::Span;

/// Pre-computed line offset table for efficient line/column lookup.
///
/// Builds a table of byte offsets for each line start, enabling O(log L)
/// binary search lookups instead of O(n) linear scans.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `offsets[0] = 0`, `offsets[n]` is
    /// the byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text. O(n) construction.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get the 1-based line number containing a byte offset.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters (not bytes) from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let offset = (offset as usize).min(source.len());

        let col_chars = source[line_start..offset].chars().count();
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute the 1-based (line, column) where a span starts.
///
/// Convenience for one-off lookups; repeated lookups should build a
/// [`LineOffsetTable`] once.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_lookup() {
        let source = "line1\nline2\nline3";
        let table = LineOffsetTable::build(source);

        assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
        assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
        assert_eq!(table.offset_to_line_col(source, 12), (3, 1));
        assert_eq!(table.line_count(), 3);
    }

    #[test]
    fn test_mid_line_column() {
        let source = "let x = 1;\nlet y = 2;";
        let table = LineOffsetTable::build(source);

        assert_eq!(table.offset_to_line_col(source, 4), (1, 5)); // 'x'
        assert_eq!(table.offset_to_line_col(source, 15), (2, 5)); // 'y'
    }

    #[test]
    fn test_offset_at_newline_belongs_to_line() {
        let source = "a\nb";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_from_offset(1), 1); // the '\n' itself
        assert_eq!(table.line_from_offset(2), 2); // 'b'
    }

    #[test]
    fn test_span_start_line_col() {
        let source = "proc main() {\n    oops\n}";
        assert_eq!(span_start_line_col(source, Span::new(18, 22)), (2, 5));
    }
}
