//! The lexer driver and default-mode rules.
//!
//! `next_token()` is the only entry point: it dispatches on the mode on
//! top of the stack, loops past trivia, and returns exactly one token per
//! call ([`TokenKind::Eof`] forever once input is exhausted). Rule actions
//! — context-flag writes and mode pushes/pops — run before the token is
//! returned, so the next call already observes the updated state.
//!
//! Default-mode scanning lives here; the embedded-language modes are in
//! sibling modules (`template`, `xml`, `doc`).

use smallvec::SmallVec;
use tala_ir::{LineIndex, Name, Span, StringInterner, Token, TokenKind};
use tala_lexer_core::{Cursor, EncodingIssueKind, SourceBuffer};

use crate::doc::DocLineState;
use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind};
use crate::mode::{Mode, ModeStack};
use crate::{escape, ContextFlags};

/// Identifier start: `[A-Za-z_]`.
#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Identifier continuation: `[A-Za-z0-9_]`.
#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Mode-stack-driven lexer for one source unit.
///
/// Owns one cursor, one mode stack, and one context-flag bundle for the
/// duration of the scan; single-threaded and pull-based. Lex separate
/// source units concurrently with separate instances — there is no shared
/// mutable state (a shared interner is internally synchronized).
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) source: &'a str,
    pub(crate) interner: &'a StringInterner,
    pub(crate) line_index: LineIndex,
    pub(crate) modes: ModeStack,
    pub(crate) flags: ContextFlags,
    /// Brace depth per active `${` interpolation frame, innermost last.
    /// Length always equals the number of pushed `Default` frames.
    pub(crate) interp_depths: SmallVec<[u32; 4]>,
    pub(crate) doc_line: DocLineState,
    pub(crate) errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over a prepared buffer. Encoding issues found at
    /// buffer construction become diagnostics immediately.
    pub fn new(buffer: &'a SourceBuffer, interner: &'a StringInterner) -> Self {
        let mut cursor = buffer.cursor();
        let source = cursor.slice(0, buffer.len());
        let line_index = LineIndex::build(source);

        let errors: Vec<LexError> = buffer
            .encoding_issues()
            .iter()
            .map(|issue| {
                let kind = match issue.kind {
                    EncodingIssueKind::Utf8Bom
                    | EncodingIssueKind::Utf16LeBom
                    | EncodingIssueKind::Utf16BeBom => LexErrorKind::ByteOrderMark,
                    EncodingIssueKind::InteriorNul => LexErrorKind::InteriorNul,
                };
                LexError::new(kind, Span::new(issue.pos, issue.pos + issue.len))
            })
            .collect();

        // A leading BOM was already reported; scan past it.
        if let Some(issue) = buffer.encoding_issues().first() {
            if issue.pos == 0 && issue.kind != EncodingIssueKind::InteriorNul {
                cursor.advance_n(issue.len);
            }
        }

        Lexer {
            cursor,
            source,
            interner,
            line_index,
            modes: ModeStack::new(),
            flags: ContextFlags::new(),
            interp_depths: SmallVec::new(),
            doc_line: DocLineState::Body,
            errors,
        }
    }

    /// Produce the next non-trivia token; [`TokenKind::Eof`] at end of
    /// input, idempotently thereafter.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.cursor.is_eof() {
                if self.modes.depth() > 1 {
                    self.recover_eof_in_nested_mode();
                    continue;
                }
                return self.make_eof();
            }
            let produced = match self.modes.current() {
                Mode::Default => {
                    self.skip_trivia();
                    if self.cursor.is_eof() {
                        continue;
                    }
                    Some(self.scan_default())
                }
                Mode::StringTemplate => self.scan_template(),
                Mode::Xml => self.scan_xml(),
                Mode::XmlTag => self.scan_xml_tag(),
                Mode::XmlDoubleQuoted => self.scan_xml_quoted(b'"'),
                Mode::XmlSingleQuoted => self.scan_xml_quoted(b'\''),
                Mode::XmlComment => self.scan_xml_comment(),
                Mode::XmlPi => self.scan_xml_pi(),
                Mode::Doc => self.scan_doc(),
                Mode::DocCodeSingle => self.scan_doc_code(1),
                Mode::DocCodeDouble => self.scan_doc_code(2),
                Mode::DocCodeTriple => self.scan_doc_code(3),
            };
            if let Some(token) = produced {
                return token;
            }
        }
    }

    /// Diagnostics accumulated so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Consume the lexer, yielding all diagnostics.
    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Current mode stack depth (1 = only the base mode). Exposed so
    /// callers and tests can check the stack balances.
    pub fn mode_depth(&self) -> usize {
        self.modes.depth()
    }

    /// Snapshot of the context flags after the last returned token.
    pub fn context_flags(&self) -> ContextFlags {
        self.flags
    }

    // === Token construction ===

    pub(crate) fn make_token(&mut self, kind: TokenKind, start: u32) -> Token {
        let end = self.cursor.pos();
        let text = self.interner.intern(self.cursor.slice(start, end));
        let (line, column) = self.line_index.line_col(self.source, start);
        Token::new(kind, text, Span::new(start, end), line, column)
    }

    fn make_eof(&self) -> Token {
        let pos = self.cursor.source_len();
        let (line, column) = self.line_index.line_col(self.source, pos);
        Token::new(TokenKind::Eof, Name::EMPTY, Span::point(pos), line, column)
    }

    // === Trivia ===

    /// Skip whitespace and `//` line comments. Matched but never emitted.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor
                .eat_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
            if self.cursor.current() == b'/' && self.cursor.peek() == b'/' {
                self.cursor.eat_until_newline_or_eof();
            } else {
                return;
            }
        }
    }

    // === End-of-input recovery ===

    /// The source ended inside a nested construct. Report the innermost
    /// unterminated thing once, unwind to the base mode, and let the next
    /// iteration emit `Eof`.
    fn recover_eof_in_nested_mode(&mut self) {
        let span = Span::point(self.cursor.source_len());
        let error = match self.modes.current() {
            Mode::StringTemplate => Some(LexError::unterminated_template(span)),
            Mode::Xml | Mode::XmlTag | Mode::XmlDoubleQuoted | Mode::XmlSingleQuoted => {
                Some(LexError::unterminated_xml(span))
            }
            Mode::XmlComment => Some(LexError::new(LexErrorKind::UnterminatedXmlComment, span)),
            Mode::XmlPi => Some(LexError::new(LexErrorKind::UnterminatedXmlPi, span)),
            // A documentation line simply ends at end of input.
            Mode::Doc => None,
            Mode::DocCodeSingle | Mode::DocCodeDouble | Mode::DocCodeTriple => {
                Some(LexError::new(LexErrorKind::UnterminatedCodeSpan, span))
            }
            // EOF inside an interpolation frame: the enclosing literal is
            // what is unterminated.
            Mode::Default => Some(self.innermost_literal_error(span)),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
        self.modes.unwind_to_base();
        self.interp_depths.clear();
        self.flags.in_string_template = false;
    }

    /// Error for the nearest enclosing template or XML literal when input
    /// ends inside an interpolation frame.
    fn innermost_literal_error(&self, span: Span) -> LexError {
        if self.modes.any(|m| matches!(m, Mode::Xml)) {
            LexError::unterminated_xml(span)
        } else {
            LexError::unterminated_template(span)
        }
    }

    // === Default mode ===

    fn scan_default(&mut self) -> Token {
        let start = self.cursor.pos();
        match self.cursor.current() {
            b if is_ident_start(b) => self.scan_identifier_or_keyword(start),
            b'0'..=b'9' => self.scan_number(start),
            b'"' => self.scan_string(start),
            b'`' => {
                self.cursor.advance();
                self.modes.push(Mode::StringTemplate);
                self.flags.in_string_template = true;
                self.make_token(TokenKind::TemplateStart, start)
            }
            b'#' => {
                self.cursor.advance();
                self.modes.push(Mode::Doc);
                self.doc_line = DocLineState::LineStart;
                self.make_token(TokenKind::DocStart, start)
            }
            b'{' => {
                self.cursor.advance();
                if self.modes.depth() > 1 {
                    if let Some(depth) = self.interp_depths.last_mut() {
                        *depth += 1;
                    }
                }
                self.make_token(TokenKind::LeftBrace, start)
            }
            b'}' => self.scan_right_brace(start),
            _ => self.scan_operator_or_unmatched(start),
        }
    }

    /// A `}` in an interpolation frame at that frame's own brace depth
    /// pops back to the surrounding template text; everywhere else it is
    /// ordinary punctuation.
    fn scan_right_brace(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.modes.depth() > 1 {
            debug_assert!(
                !self.interp_depths.is_empty(),
                "interpolation frame without depth counter"
            );
            match self.interp_depths.last_mut() {
                Some(0) | None => {
                    self.interp_depths.pop();
                    self.modes.pop();
                }
                Some(depth) => *depth -= 1,
            }
        }
        self.make_token(TokenKind::RightBrace, start)
    }

    fn scan_identifier_or_keyword(&mut self, start: u32) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);

        // `xml` plus optional spacing plus a backtick is the start of an
        // XML literal: a strictly longer match than the bare keyword.
        if text == "xml" {
            let mark = self.cursor.mark();
            self.cursor.eat_horizontal_whitespace();
            if self.cursor.current() == b'`' {
                self.cursor.advance();
                self.modes.push(Mode::Xml);
                self.flags.in_string_template = true;
                return self.make_token(TokenKind::XmlTemplateStart, start);
            }
            self.cursor.reset(mark);
        }

        if let Some(kind) = keywords::reserved(text) {
            self.apply_keyword_action(kind);
            return self.make_token(kind, start);
        }
        if let Some(kind) = keywords::contextual(text, &self.flags) {
            self.apply_keyword_action(kind);
            return self.make_token(kind, start);
        }
        self.make_token(TokenKind::Identifier, start)
    }

    /// Flag mutations bound to specific keyword rules. Executed on the
    /// committed match, before the token is returned.
    fn apply_keyword_action(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::TableType => self.flags.in_table_type = true,
            // One-shot gate release; see ContextFlags docs.
            TokenKind::Key => self.flags.in_table_type = false,
            TokenKind::From => self.flags.in_query_expression = true,
            TokenKind::Select | TokenKind::Do => self.flags.in_query_expression = false,
            _ => {}
        }
    }

    fn scan_number(&mut self, start: u32) -> Token {
        if self.cursor.current() == b'0'
            && matches!(self.cursor.peek(), b'x' | b'X')
            && self.cursor.peek2().is_ascii_hexdigit()
        {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            return self.make_token(TokenKind::HexIntLiteral, start);
        }

        self.cursor.eat_while(|b| b.is_ascii_digit());
        let mut is_float = false;

        // A dot is only part of the number when a digit follows, so range
        // operators like `1..<n` stay intact.
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
            is_float = true;
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            let after_sign = if matches!(self.cursor.peek(), b'+' | b'-') {
                self.cursor.peek2()
            } else {
                self.cursor.peek()
            };
            if after_sign.is_ascii_digit() {
                self.cursor.advance();
                if matches!(self.cursor.current(), b'+' | b'-') {
                    self.cursor.advance();
                }
                self.cursor.eat_while(|b| b.is_ascii_digit());
                is_float = true;
            }
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.make_token(kind, start)
    }

    fn scan_string(&mut self, start: u32) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance();
                    return self.make_token(TokenKind::StringLiteral, start);
                }
                b'\\' => {
                    if let Some(err) = escape::scan_escape(&mut self.cursor) {
                        self.errors.push(err);
                    }
                }
                // Newline, carriage return, or end of input: report once
                // and hand back what we saw as a best-effort literal.
                _ => {
                    self.errors.push(LexError::unterminated_string(Span::new(
                        start,
                        self.cursor.pos(),
                    )));
                    return self.make_token(TokenKind::StringLiteral, start);
                }
            }
        }
    }

    fn scan_operator_or_unmatched(&mut self, start: u32) -> Token {
        use TokenKind::*;

        let b = self.cursor.current();
        let p = self.cursor.peek();
        let (kind, len) = match b {
            b';' => (Semicolon, 1),
            b':' => (Colon, 1),
            b',' => (Comma, 1),
            b'(' => (LeftParen, 1),
            b')' => (RightParen, 1),
            b'[' => (LeftBracket, 1),
            b']' => (RightBracket, 1),
            b'@' => (At, 1),
            b'.' => match (p, self.cursor.peek2()) {
                (b'.', b'.') => (Ellipsis, 3),
                (b'.', b'<') => (HalfOpenRange, 3),
                _ => (Dot, 1),
            },
            b'+' => match p {
                b'=' => (PlusAssign, 2),
                _ => (Plus, 1),
            },
            b'-' => match p {
                b'=' => (MinusAssign, 2),
                b'>' => (RightArrow, 2),
                _ => (Minus, 1),
            },
            b'*' => match p {
                b'=' => (StarAssign, 2),
                _ => (Star, 1),
            },
            b'/' => match p {
                b'=' => (SlashAssign, 2),
                _ => (Slash, 1),
            },
            b'%' => (Percent, 1),
            b'=' => match (p, self.cursor.peek2()) {
                (b'=', b'=') => (TripleEqual, 3),
                (b'=', _) => (EqualEqual, 2),
                (b'>', _) => (DoubleArrow, 2),
                _ => (Assign, 1),
            },
            b'!' => match (p, self.cursor.peek2()) {
                (b'=', b'=') => (NotTripleEqual, 3),
                (b'=', _) => (NotEqual, 2),
                _ => (Not, 1),
            },
            b'<' => match (p, self.cursor.peek2()) {
                (b'<', b'=') => (ShlAssign, 3),
                (b'<', _) => (Shl, 2),
                (b'=', _) => (LtEqual, 2),
                (b'-', _) => (LeftArrow, 2),
                _ => (Lt, 1),
            },
            b'>' => match (p, self.cursor.peek2()) {
                (b'>', b'>') => {
                    if self.cursor.peek_at(3) == b'=' {
                        (UshrAssign, 4)
                    } else {
                        (Ushr, 3)
                    }
                }
                (b'>', b'=') => (ShrAssign, 3),
                (b'>', _) => (Shr, 2),
                (b'=', _) => (GtEqual, 2),
                _ => (Gt, 1),
            },
            b'&' => match p {
                b'&' => (AndAnd, 2),
                b'=' => (AmpAssign, 2),
                _ => (Amp, 1),
            },
            b'|' => match p {
                b'|' => (OrOr, 2),
                b'=' => (PipeAssign, 2),
                _ => (Pipe, 1),
            },
            b'^' => match p {
                b'=' => (CaretAssign, 2),
                _ => (Caret, 1),
            },
            b'?' => match p {
                b'.' => (QuestionDot, 2),
                b':' => (Elvis, 2),
                _ => (Question, 1),
            },
            _ => return self.scan_unmatched(start),
        };

        // A `>` family token closes any open table type argument list.
        if matches!(kind, Gt | Shr | Ushr) {
            self.flags.in_table_type = false;
        }

        self.cursor.advance_n(len);
        self.make_token(kind, start)
    }

    /// No rule matches here: report the character, skip exactly one
    /// Unicode scalar, and keep scanning.
    pub(crate) fn scan_unmatched(&mut self, start: u32) -> Token {
        let b = self.cursor.current();
        if b == 0 {
            // Interior NUL: already reported as an encoding issue.
            self.cursor.advance();
            return self.make_token(TokenKind::Error, start);
        }
        let ch = escape::decode_char_at(&self.cursor);
        self.cursor.advance_char();
        self.errors.push(LexError::unmatched_character(
            ch,
            Span::new(start, self.cursor.pos()),
        ));
        self.make_token(TokenKind::Error, start)
    }

    // === Shared helpers for embedded-language modes ===

    /// Enter a `${` interpolation: push a fresh default frame with its own
    /// brace depth so the full expression grammar is available until the
    /// matching `}`.
    pub(crate) fn begin_interpolation(&mut self, start: u32) -> Token {
        debug_assert_eq!(self.cursor.current(), b'$');
        debug_assert_eq!(self.cursor.peek(), b'{');
        self.cursor.advance_n(2);
        self.modes.push(Mode::Default);
        self.interp_depths.push(0);
        self.make_token(TokenKind::InterpolationStart, start)
    }

    /// Recompute `in_string_template` after popping a template-like mode.
    pub(crate) fn refresh_template_flag(&mut self) {
        self.flags.in_string_template = self.modes.any(Mode::is_template_like);
    }
}

#[cfg(test)]
mod tests;
