//! Documentation line modes.
//!
//! A `#` in default mode starts a markdown documentation line that runs to
//! the end of the physical line. Inside it, backtick runs of one, two, or
//! three open code spans with matching terminators, and the line shape
//! `+ name - description` is tokenized so the parser can attach parameter
//! docs. The newline itself is trivia: it pops back to default mode
//! without a token.

use tala_ir::{Span, Token, TokenKind};

use crate::lex_error::{LexError, LexErrorKind};
use crate::lexer::{is_ident_continue, is_ident_start, Lexer};
use crate::mode::Mode;

/// Where we are within the current documentation line. Only the
/// `+ name - description` shape needs this; once a line deviates from it
/// the state parks in `Body` until the next line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DocLineState {
    /// Directly after `#`; a `+` here starts a parameter doc.
    LineStart,
    /// After the `+`; an identifier here is the parameter name.
    AfterPlus,
    /// After the name; a `-` here introduces the description.
    AfterName,
    /// Anywhere else on the line.
    Body,
}

impl Lexer<'_> {
    pub(crate) fn scan_doc(&mut self) -> Option<Token> {
        self.cursor.eat_horizontal_whitespace();
        let start = self.cursor.pos();

        match self.cursor.current() {
            b'\n' => {
                self.cursor.advance();
                self.modes.pop();
                None
            }
            b'\r' => {
                self.cursor.advance();
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
                self.modes.pop();
                None
            }
            0 if self.cursor.is_eof() => {
                self.modes.pop();
                None
            }
            b'`' => {
                let mut run = 0u32;
                while self.cursor.current() == b'`' && run < 3 {
                    self.cursor.advance();
                    run += 1;
                }
                let (kind, mode) = match run {
                    1 => (TokenKind::DocCodeSingleStart, Mode::DocCodeSingle),
                    2 => (TokenKind::DocCodeDoubleStart, Mode::DocCodeDouble),
                    _ => (TokenKind::DocCodeTripleStart, Mode::DocCodeTriple),
                };
                self.modes.push(mode);
                self.doc_line = DocLineState::Body;
                Some(self.make_token(kind, start))
            }
            b'+' if self.doc_line == DocLineState::LineStart => {
                self.cursor.advance();
                self.doc_line = DocLineState::AfterPlus;
                Some(self.make_token(TokenKind::DocPlus, start))
            }
            b if is_ident_start(b) && self.doc_line == DocLineState::AfterPlus => {
                self.cursor.eat_while(is_ident_continue);
                self.doc_line = DocLineState::AfterName;
                Some(self.make_token(TokenKind::DocParameterName, start))
            }
            b'-' if self.doc_line == DocLineState::AfterName => {
                self.cursor.advance();
                self.doc_line = DocLineState::Body;
                Some(self.make_token(TokenKind::DocMinus, start))
            }
            _ => {
                // Free text to the next backtick or end of line.
                self.cursor.skip_to_any3(b'`', b'\n', b'\r');
                self.doc_line = DocLineState::Body;
                Some(self.make_token(TokenKind::DocText, start))
            }
        }
    }

    /// Inside a code span opened by `width` backticks. Content runs to a
    /// backtick run of at least that width; a shorter run is literal text.
    /// The line ending terminates the span with a diagnostic.
    pub(crate) fn scan_doc_code(&mut self, width: u32) -> Option<Token> {
        let start = self.cursor.pos();
        loop {
            match self.cursor.skip_to_any3(b'`', b'\n', b'\r') {
                b'`' => {
                    let mark = self.cursor.mark();
                    let mut run = 0u32;
                    while self.cursor.current() == b'`' {
                        self.cursor.advance();
                        run += 1;
                    }
                    if run < width {
                        continue; // literal backticks inside the span
                    }
                    if mark > start {
                        // Emit pending content first; re-handle the
                        // terminator on the next call.
                        self.cursor.reset(mark);
                        return Some(self.make_token(TokenKind::DocCodeText, start));
                    }
                    // Consume exactly the terminating run; any extra
                    // backticks belong to the enclosing doc line.
                    self.cursor.reset(mark);
                    self.cursor.advance_n(width);
                    self.modes.pop();
                    let kind = match width {
                        1 => TokenKind::DocCodeSingleEnd,
                        2 => TokenKind::DocCodeDoubleEnd,
                        _ => TokenKind::DocCodeTripleEnd,
                    };
                    return Some(self.make_token(kind, mark));
                }
                // Line ending or EOF: the span never closed.
                _ => {
                    self.errors.push(LexError::new(
                        LexErrorKind::UnterminatedCodeSpan,
                        Span::new(start, self.cursor.pos()),
                    ));
                    self.modes.pop();
                    if self.cursor.pos() > start {
                        return Some(self.make_token(TokenKind::DocCodeText, start));
                    }
                    return None;
                }
            }
        }
    }
}
