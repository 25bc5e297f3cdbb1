//! Escape sequence scanning and cooking.
//!
//! The scanner validates escapes in place while tokens keep their raw
//! lexemes; [`unescape_string`] cooks a validated lexeme into its runtime
//! value for the parser. Invalid escapes never stop the scan: the
//! diagnostic is recorded and lexing continues past the sequence, with
//! U+FFFD standing in for the bad escape in cooked output.

use std::borrow::Cow;

use tala_ir::Span;
use tala_lexer_core::Cursor;

use crate::LexError;

/// Consume one escape sequence with the cursor on the `\`, validating it.
///
/// Recognized: `\n`, `\t`, `\r`, `\\`, `\"`, `` \` ``, `\$`, and
/// `\u{1-6 hex digits}`. Returns a diagnostic for anything else; the
/// cursor always ends up past the consumed bytes so the caller just keeps
/// scanning. A `\` directly before end-of-input is left to the caller's
/// unterminated-literal handling.
pub(crate) fn scan_escape(cursor: &mut Cursor<'_>) -> Option<LexError> {
    debug_assert_eq!(cursor.current(), b'\\');
    let start = cursor.pos();
    let next = cursor.peek();

    if next == 0 && {
        let mut probe = *cursor;
        probe.advance();
        probe.is_eof()
    } {
        cursor.advance();
        return None;
    }

    match next {
        b'n' | b't' | b'r' | b'\\' | b'"' | b'`' | b'$' => {
            cursor.advance_n(2);
            None
        }
        b'u' => scan_unicode_escape(cursor, start),
        _ => {
            // Skip the backslash plus one full character so a multi-byte
            // char is not split.
            cursor.advance();
            let ch = decode_char_at(cursor);
            cursor.advance_char();
            Some(LexError::invalid_escape(ch, Span::new(start, cursor.pos())))
        }
    }
}

/// Consume `\u{...}` with the cursor on the `\`.
fn scan_unicode_escape(cursor: &mut Cursor<'_>, start: u32) -> Option<LexError> {
    cursor.advance_n(2); // past `\u`
    if cursor.current() != b'{' {
        return Some(LexError::invalid_unicode_escape(Span::new(
            start,
            cursor.pos(),
        )));
    }
    cursor.advance();

    let digits_start = cursor.pos();
    cursor.eat_while(|b| b.is_ascii_hexdigit());
    let digits = cursor.slice_from(digits_start);

    if cursor.current() != b'}' {
        return Some(LexError::invalid_unicode_escape(Span::new(
            start,
            cursor.pos(),
        )));
    }
    cursor.advance();
    let span = Span::new(start, cursor.pos());

    if digits.is_empty() || digits.len() > 6 {
        return Some(LexError::invalid_unicode_escape(span));
    }
    match u32::from_str_radix(digits, 16) {
        Ok(value) if char::from_u32(value).is_some() => None,
        _ => Some(LexError::invalid_unicode_escape(span)),
    }
}

/// Decode the full character at the cursor position. Raw bytes that are
/// not valid UTF-8 here cannot occur: the buffer came from `&str`.
pub(crate) fn decode_char_at(cursor: &Cursor<'_>) -> char {
    let width = Cursor::utf8_char_width(cursor.current());
    let end = (cursor.pos() + width).min(cursor.source_len());
    cursor
        .slice(cursor.pos(), end)
        .chars()
        .next()
        .unwrap_or('\u{FFFD}')
}

/// Cook the inner text of a string literal or template text run.
///
/// Borrows when there is nothing to do. Invalid or truncated escapes
/// become U+FFFD; the scanner already reported them.
pub fn unescape_string(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('`') => out.push('`'),
            Some('$') => out.push('$'),
            Some('u') => {
                let rest = chars.as_str();
                // Even an invalid brace group is consumed, so its digits
                // do not leak into the cooked text.
                let consumed = brace_group_len(rest);
                match cook_unicode(rest) {
                    Some((value, _)) => out.push(value),
                    None => out.push('\u{FFFD}'),
                }
                for _ in 0..consumed {
                    let _ = chars.next();
                }
            }
            Some(_) => out.push('\u{FFFD}'),
            None => out.push('\u{FFFD}'),
        }
    }
    Cow::Owned(out)
}

/// Length in chars of a leading `{...}` group, or 0 if there is none.
fn brace_group_len(rest: &str) -> usize {
    match rest.strip_prefix('{').and_then(|inner| inner.find('}')) {
        Some(close) => rest[1..=close].chars().count() + 2,
        None => 0,
    }
}

/// Parse `{hex}` at the start of `rest`. Returns the character and how
/// many chars were consumed.
fn cook_unicode(rest: &str) -> Option<(char, usize)> {
    let inner = rest.strip_prefix('{')?;
    let close = inner.find('}')?;
    let digits = &inner[..close];
    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    char::from_u32(value).map(|ch| (ch, close + 2))
}
