//! Sentinel-terminated source buffer.
//!
//! The buffer appends a `0x00` sentinel after the source content and rounds
//! the allocation up to the next 64-byte boundary. The scanner detects EOF
//! by hitting the sentinel instead of bounds-checking every read, and the
//! zero padding makes multi-byte lookahead near the end of input safe.
//!
//! Construction also scans for encoding issues: byte order marks (the
//! source must be plain UTF-8) and interior NUL bytes (excluded from the
//! source character set). Issues are recorded as [`EncodingIssue`] values;
//! `tala_lexer` converts them to diagnostics.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// Layout: `[source_bytes..., 0x00, zero padding to a 64-byte boundary]`.
/// The byte at `len()` is always the sentinel, and every byte after it is
/// also zero.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    /// Length of the source content, excluding sentinel and padding.
    source_len: u32,
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte position of the problematic sequence.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`EF BB BF`) at the start of the source.
    Utf8Bom,
    /// UTF-16 little-endian BOM (`FF FE`): wrong encoding entirely.
    Utf16LeBom,
    /// UTF-16 big-endian BOM (`FE FF`): wrong encoding entirely.
    Utf16BeBom,
    /// NUL byte (U+0000) inside the source content.
    InteriorNul,
}

impl SourceBuffer {
    /// Create a sentinel-terminated buffer from source text.
    ///
    /// Sources larger than `u32::MAX` bytes saturate `len()`; the driver
    /// rejects oversized files before lexing.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to the next 64-byte boundary, with room for the sentinel.
        let padded_len = (source_len + CACHE_LINE) & !(CACHE_LINE - 1);

        // Zero-filled allocation: sentinel and padding come for free.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        prefetch_start(&buf);

        let mut encoding_issues = Vec::new();
        detect_bom(source_bytes, &mut encoding_issues);
        detect_interior_nuls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// The source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The full buffer including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Whether the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

/// Detect a byte order mark at the start of the source.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: 3,
        });
    } else if source.starts_with(&[0xFF, 0xFE]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf16LeBom,
            pos: 0,
            len: 2,
        });
    } else if source.starts_with(&[0xFE, 0xFF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf16BeBom,
            pos: 0,
            len: 2,
        });
    }
}

/// Detect NUL bytes within the source content via memchr.
fn detect_interior_nuls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut offset = 0;
    while let Some(pos) = memchr::memchr(0, &source[offset..]) {
        let absolute = offset + pos;
        if let Ok(p) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNul,
                pos: p,
                len: 1,
            });
        }
        offset = absolute + 1;
    }
}

/// Hint the CPU to pull the first cache lines of the buffer into L1 before
/// the scanner's first reads. No-op on platforms without prefetch.
#[allow(unsafe_code)]
fn prefetch_start(buf: &[u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: prefetch is a hint; invalid addresses are silently
        // ignored, and these all point into the allocated Vec.
        unsafe {
            use std::arch::x86_64::_mm_prefetch;
            let p = buf.as_ptr().cast::<i8>();
            _mm_prefetch::<3>(p);
            if buf.len() >= 128 {
                _mm_prefetch::<3>(p.add(64));
            }
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    let _ = buf;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source() {
        let buf = SourceBuffer::new("");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(buf.encoding_issues().is_empty());
        assert_eq!(buf.as_sentinel_bytes()[0], 0);
    }

    #[test]
    fn sentinel_follows_content() {
        let buf = SourceBuffer::new("hello");
        assert_eq!(buf.as_bytes(), b"hello");
        assert_eq!(buf.as_sentinel_bytes()[5], 0);
    }

    #[test]
    fn buffer_rounded_to_cache_line() {
        for len in [0, 1, 63, 64, 65, 127, 128, 1000] {
            let source = "x".repeat(len);
            let buf = SourceBuffer::new(&source);
            assert_eq!(
                buf.as_sentinel_bytes().len() % CACHE_LINE,
                0,
                "not cache-line aligned for source length {len}"
            );
        }
    }

    #[test]
    fn padding_is_all_zero() {
        let buf = SourceBuffer::new("abc");
        assert!(buf.as_sentinel_bytes()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn detects_utf8_bom() {
        let buf = SourceBuffer::new("\u{FEFF}hello");
        assert_eq!(
            buf.encoding_issues(),
            &[EncodingIssue {
                kind: EncodingIssueKind::Utf8Bom,
                pos: 0,
                len: 3,
            }]
        );
    }

    #[test]
    fn detects_interior_nuls() {
        let buf = SourceBuffer::new("a\0b\0");
        let nuls: Vec<_> = buf
            .encoding_issues()
            .iter()
            .filter(|i| i.kind == EncodingIssueKind::InteriorNul)
            .map(|i| i.pos)
            .collect();
        assert_eq!(nuls, vec![1, 3]);
    }

    #[test]
    fn clean_source_has_no_issues() {
        let buf = SourceBuffer::new("function main() { }\n");
        assert!(buf.encoding_issues().is_empty());
    }

    #[test]
    fn large_source_keeps_sentinel() {
        let source = "y".repeat(100_000);
        let buf = SourceBuffer::new(&source);
        assert_eq!(buf.len(), 100_000);
        assert_eq!(buf.as_sentinel_bytes()[100_000], 0);
    }

    #[test]
    fn cursor_starts_at_zero() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.current(), b'a');
    }
}
