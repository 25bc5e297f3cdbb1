//! Line/column lookup for byte offsets.
//!
//! Pre-computes line start offsets once, then answers offset-to-line
//! queries in O(log L) via binary search. The lexer stamps every token
//! with line/column from one of these.

/// Pre-computed line offset table.
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start. `offsets[0] == 0`; each subsequent
    /// entry is the byte after a `\n`.
    offsets: Vec<u32>,
}

impl LineIndex {
    /// Build a line index from source text. O(n) scan.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineIndex { offsets }
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

    /// Get 1-based (line, column) for a byte offset.
    ///
    /// The column counts characters (not bytes) from the line start.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let offset = (offset as usize).min(source.len());

        let col_chars = source[line_start..offset].chars().count();
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
