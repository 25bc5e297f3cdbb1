//! XML literal modes.
//!
//! An XML literal is backtick-delimited like a string template but has its
//! own internal structure: character data, tags with attributes, quoted
//! attribute values, comments, processing instructions, and CDATA
//! sections. Each of those is its own mode so interpolation and
//! termination rules stay local. All of them surface `${` interpolations
//! except comments, PIs, and CDATA, whose content is opaque.

use tala_ir::{Span, Token, TokenKind};

use crate::lex_error::{LexError, LexErrorKind};
use crate::lexer::Lexer;
use crate::mode::Mode;

/// XML name start per the (ASCII subset of the) XML spec.
#[inline]
fn is_xml_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// XML name continuation; `:` is handled separately for prefixed names.
#[inline]
fn is_xml_name_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.')
}

impl Lexer<'_> {
    /// Character-data mode, the body of the literal.
    pub(crate) fn scan_xml(&mut self) -> Option<Token> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            b'`' => {
                self.cursor.advance();
                self.modes.pop();
                self.refresh_template_flag();
                return Some(self.make_token(TokenKind::XmlTemplateEnd, start));
            }
            b'$' if self.cursor.peek() == b'{' => {
                return Some(self.begin_interpolation(start));
            }
            b'<' => return Some(self.scan_xml_markup_start(start)),
            _ => {}
        }

        loop {
            match self.cursor.skip_to_xml_delim() {
                b'$' => {
                    if self.cursor.peek() == b'{' {
                        break;
                    }
                    self.cursor.advance();
                }
                // `<`, backtick, or EOF ends the run.
                _ => break,
            }
        }
        Some(self.make_token(TokenKind::XmlText, start))
    }

    /// Dispatch on the markup opener: tag, end tag, comment, PI, or CDATA.
    fn scan_xml_markup_start(&mut self, start: u32) -> Token {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.advance_n(2);
                self.modes.push(Mode::XmlTag);
                self.make_token(TokenKind::XmlTagOpenSlash, start)
            }
            b'?' => {
                self.cursor.advance_n(2);
                self.modes.push(Mode::XmlPi);
                self.make_token(TokenKind::XmlPiStart, start)
            }
            b'!' => {
                if self.matches_ahead(b"<!--") {
                    self.cursor.advance_n(4);
                    self.modes.push(Mode::XmlComment);
                    self.make_token(TokenKind::XmlCommentStart, start)
                } else if self.matches_ahead(b"<![CDATA[") {
                    self.scan_cdata(start)
                } else {
                    // Malformed `<!`: treat as an ordinary tag opener and
                    // let tag mode produce unmatched-character errors.
                    self.cursor.advance();
                    self.modes.push(Mode::XmlTag);
                    self.make_token(TokenKind::XmlTagOpen, start)
                }
            }
            _ => {
                self.cursor.advance();
                self.modes.push(Mode::XmlTag);
                self.make_token(TokenKind::XmlTagOpen, start)
            }
        }
    }

    /// A whole `<![CDATA[...]]>` section as one token; no nested structure
    /// and no interpolation inside.
    fn scan_cdata(&mut self, start: u32) -> Token {
        self.cursor.advance_n(9); // past `<![CDATA[`
        loop {
            match self.cursor.skip_to_byte(b']') {
                b']' => {
                    if self.cursor.peek() == b']' && self.cursor.peek2() == b'>' {
                        self.cursor.advance_n(3);
                        return self.make_token(TokenKind::XmlCdata, start);
                    }
                    self.cursor.advance();
                }
                _ => {
                    self.errors.push(LexError::new(
                        LexErrorKind::UnterminatedCdata,
                        Span::new(start, self.cursor.pos()),
                    ));
                    return self.make_token(TokenKind::XmlCdata, start);
                }
            }
        }
    }

    /// Inside `<...>`: names, `=`, quote openers, and the tag closers.
    /// Whitespace between tag parts is trivia.
    pub(crate) fn scan_xml_tag(&mut self) -> Option<Token> {
        self.cursor
            .eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
        if self.cursor.is_eof() {
            // Recovery happens at the dispatch loop.
            return None;
        }

        let start = self.cursor.pos();
        match self.cursor.current() {
            b'>' => {
                self.cursor.advance();
                self.modes.pop();
                Some(self.make_token(TokenKind::XmlTagClose, start))
            }
            b'/' if self.cursor.peek() == b'>' => {
                self.cursor.advance_n(2);
                self.modes.pop();
                Some(self.make_token(TokenKind::XmlTagSlashClose, start))
            }
            b'=' => {
                self.cursor.advance();
                Some(self.make_token(TokenKind::XmlEquals, start))
            }
            b'"' => {
                self.cursor.advance();
                self.modes.push(Mode::XmlDoubleQuoted);
                Some(self.make_token(TokenKind::XmlDoubleQuote, start))
            }
            b'\'' => {
                self.cursor.advance();
                self.modes.push(Mode::XmlSingleQuoted);
                Some(self.make_token(TokenKind::XmlSingleQuote, start))
            }
            b'$' if self.cursor.peek() == b'{' => Some(self.begin_interpolation(start)),
            b'`' => {
                // The literal ended mid-tag. Report once, then unwind the
                // tag frame so XML mode sees the backtick.
                self.errors.push(LexError::new(
                    LexErrorKind::UnterminatedXml,
                    Span::new(start, start + 1),
                ));
                self.modes.pop();
                None
            }
            b if is_xml_name_start(b) => {
                self.cursor.eat_while(is_xml_name_continue);
                // One optional prefix separator: `ns:name`.
                if self.cursor.current() == b':' && is_xml_name_start(self.cursor.peek()) {
                    self.cursor.advance();
                    self.cursor.eat_while(is_xml_name_continue);
                }
                Some(self.make_token(TokenKind::XmlQName, start))
            }
            _ => Some(self.scan_unmatched(start)),
        }
    }

    /// Attribute value between quotes. Plain text plus interpolation; the
    /// matching quote pops back to tag mode.
    pub(crate) fn scan_xml_quoted(&mut self, quote: u8) -> Option<Token> {
        let start = self.cursor.pos();
        if self.cursor.current() == quote {
            self.cursor.advance();
            self.modes.pop();
            let kind = if quote == b'"' {
                TokenKind::XmlDoubleQuote
            } else {
                TokenKind::XmlSingleQuote
            };
            return Some(self.make_token(kind, start));
        }
        if self.cursor.current() == b'$' && self.cursor.peek() == b'{' {
            return Some(self.begin_interpolation(start));
        }

        loop {
            match self.cursor.skip_to_either(quote, b'$') {
                b'$' => {
                    if self.cursor.peek() == b'{' {
                        break;
                    }
                    self.cursor.advance();
                }
                _ => break, // quote or EOF
            }
        }
        Some(self.make_token(TokenKind::XmlQuotedText, start))
    }

    /// `<!-- ... -->`. Content is opaque; only the terminator matters.
    pub(crate) fn scan_xml_comment(&mut self) -> Option<Token> {
        let start = self.cursor.pos();
        if self.at_comment_end() {
            self.cursor.advance_n(3);
            self.modes.pop();
            return Some(self.make_token(TokenKind::XmlCommentEnd, start));
        }

        loop {
            match self.cursor.skip_to_byte(b'-') {
                b'-' => {
                    if self.at_comment_end() {
                        break;
                    }
                    self.cursor.advance();
                }
                _ => break, // EOF
            }
        }
        Some(self.make_token(TokenKind::XmlCommentText, start))
    }

    fn at_comment_end(&self) -> bool {
        self.cursor.current() == b'-' && self.cursor.peek() == b'-' && self.cursor.peek2() == b'>'
    }

    /// `<? ... ?>`. Same opaque-content shape as comments.
    pub(crate) fn scan_xml_pi(&mut self) -> Option<Token> {
        let start = self.cursor.pos();
        if self.cursor.current() == b'?' && self.cursor.peek() == b'>' {
            self.cursor.advance_n(2);
            self.modes.pop();
            return Some(self.make_token(TokenKind::XmlPiEnd, start));
        }

        loop {
            match self.cursor.skip_to_byte(b'?') {
                b'?' => {
                    if self.cursor.peek() == b'>' {
                        break;
                    }
                    self.cursor.advance();
                }
                _ => break, // EOF
            }
        }
        Some(self.make_token(TokenKind::XmlPiText, start))
    }

    /// Compare the upcoming bytes against a short literal prefix.
    fn matches_ahead(&self, prefix: &[u8]) -> bool {
        debug_assert!(prefix.len() < 64);
        let mut k = 0u32;
        for &b in prefix {
            if self.cursor.peek_at(k) != b {
                return false;
            }
            k += 1;
        }
        true
    }
}
