//! Byte offset → (line, column) lookup.
//!
//! The lexer and parser work in byte offsets (see [`crate::Span`]); error
//! messages and tokens need 1-based line/column pairs instead. [`LineIndex`]
//! precomputes the byte offset of every line start once, so lookups are a
//! binary search rather than a rescan of the source.
//!
//! Columns count bytes, not display width: a tab advances the lexer's
//! indentation counter by 8 (see the lexer's indent algorithm) but only by 1
//! column here, matching spec's "7-bit ASCII, column = byte position" model.

/// Maps byte offsets into `(line, column)` pairs, both 1-based.
pub struct LineIndex {
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in src.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Returns the 1-based `(line, column)` of a byte offset.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };
        let col = offset - self.line_starts[line];
        (line as u32 + 1, col as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        let idx = LineIndex::new("abc\ndef\n");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(2), (1, 3));
    }

    #[test]
    fn second_line_after_newline() {
        let idx = LineIndex::new("abc\ndef\n");
        assert_eq!(idx.line_col(4), (2, 1));
        assert_eq!(idx.line_col(6), (2, 3));
    }

    #[test]
    fn offset_at_end_of_input() {
        let idx = LineIndex::new("abc");
        assert_eq!(idx.line_col(3), (1, 4));
    }
}
