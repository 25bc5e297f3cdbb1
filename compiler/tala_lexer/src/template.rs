//! String template mode.
//!
//! Entered from default mode on a backtick. Emits text runs, hands `${`
//! off to an interpolation frame, and pops on the closing backtick. Every
//! call produces exactly one token; the caller guarantees the cursor is
//! not at EOF on entry.

use tala_ir::{Token, TokenKind};

use crate::escape;
use crate::lexer::Lexer;

impl Lexer<'_> {
    pub(crate) fn scan_template(&mut self) -> Option<Token> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            b'`' => {
                self.cursor.advance();
                self.modes.pop();
                self.refresh_template_flag();
                return Some(self.make_token(TokenKind::TemplateEnd, start));
            }
            b'$' if self.cursor.peek() == b'{' => {
                return Some(self.begin_interpolation(start));
            }
            _ => {}
        }

        // Text run up to the next delimiter. A bare `$` is ordinary text.
        loop {
            match self.cursor.skip_to_template_delim() {
                b'$' => {
                    if self.cursor.peek() == b'{' {
                        break;
                    }
                    self.cursor.advance();
                }
                b'\\' => {
                    if let Some(err) = escape::scan_escape(&mut self.cursor) {
                        self.errors.push(err);
                    }
                }
                // Backtick or EOF ends the run; the next call handles it.
                _ => break,
            }
        }
        Some(self.make_token(TokenKind::TemplateText, start))
    }
}
