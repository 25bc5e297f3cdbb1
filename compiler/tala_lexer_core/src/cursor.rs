//! Copyable cursor over a sentinel-terminated buffer.
//!
//! The cursor advances byte-by-byte. EOF is the sentinel (`0x00`) at or
//! past the source length; an interior NUL before the source length is not
//! EOF (it was recorded as an encoding issue at buffer construction).
//!
//! The cursor is `Copy`, so a snapshot of the whole cursor — or just the
//! position via [`mark()`](Cursor::mark)/[`reset()`](Cursor::reset) — is a
//! free backtracking checkpoint for rules that try a longer match and give
//! up.

/// Returns the earliest of two optional offsets.
///
/// Combines results from separate memchr calls when a skip loop needs more
/// needles than `memchr3` supports.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00`, and all bytes past `source_len` are `0x00`
/// (cache-line padding). Guaranteed by `SourceBuffer` construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

// &[u8] fat pointer (16) + u32 + u32 = 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!((source_len as usize) < buf.len());
        debug_assert!(buf[source_len as usize] == 0, "missing sentinel");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// The byte at the current position; `0x00` at EOF (the sentinel).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// The byte one position ahead. Safe at any position thanks to the
    /// sentinel and padding.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// The byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// The byte `k` positions ahead.
    ///
    /// `k` must stay within the zero padding past the sentinel, i.e.
    /// `k < 64`. All lookahead in the lexer is a handful of bytes.
    #[inline]
    pub fn peek_at(&self, k: u32) -> u8 {
        debug_assert!(k < 64, "lookahead beyond padding");
        self.buf
            .get(self.pos as usize + k as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Advance by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Whether the cursor has reached EOF (sentinel at or past the source
    /// length; interior NULs do not count).
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Snapshot the current position for later [`reset()`](Self::reset).
    #[inline]
    pub fn mark(&self) -> u32 {
        self.pos
    }

    /// Rewind to a position previously returned by [`mark()`](Self::mark).
    #[inline]
    pub fn reset(&mut self, mark: u32) {
        debug_assert!(mark <= self.pos, "reset must rewind, not advance");
        self.pos = mark;
    }

    /// Extract a source substring as `&str`.
    ///
    /// `start..end` must lie within the source content on UTF-8 character
    /// boundaries, which holds for token boundaries produced by the
    /// scanner since the buffer was built from a `&str`.
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(end <= self.source_len);
        debug_assert!(start <= end);
        // SAFETY: the buffer was constructed from valid UTF-8 and the
        // scanner only produces boundaries on character edges.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// `pred(0)` must return `false`, which holds for every byte class the
    /// lexer uses; the sentinel then terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance past horizontal whitespace (spaces and tabs).
    ///
    /// A plain byte loop: runs between tokens are short (one or two
    /// spaces, or an indent), so SIMD does not pay for itself here.
    #[inline]
    pub fn eat_horizontal_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Advance to the next `\n` or EOF. Used for line comments and
    /// documentation lines.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past ordinary string-literal content to the next
    /// interesting byte: `"`, `\`, `\n`, or `\r`. Returns the byte found,
    /// or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        let primary = memchr::memchr3(b'"', b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);

        match earliest_of(primary, cr) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance past string-template text to the next interesting byte:
    /// `` ` `` (end of template), `$` (possible interpolation), or `\`
    /// (escape). Returns the byte found, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_template_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr3(b'`', b'$', b'\\', remaining) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance past XML character data to the next interesting byte:
    /// `<` (markup), `$` (possible interpolation), or `` ` `` (end of the
    /// literal). Returns the byte found, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_xml_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr3(b'<', b'$', b'`', remaining) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the first occurrence of either needle, or EOF. Returns
    /// the byte found, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_either(&mut self, a: u8, b: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr2(a, b, remaining) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the first occurrence of `needle`, or EOF. Returns the
    /// byte found, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_byte(&mut self, needle: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr(needle, remaining) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the first occurrence of any of three needles, or EOF.
    /// Returns the byte found, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within source content fit in u32"
    )]
    pub fn skip_to_any3(&mut self, a: u8, b: u8, c: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr3(a, b, c, remaining) {
            Some(off) => {
                self.pos += off as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }
}
