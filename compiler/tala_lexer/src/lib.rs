//! Mode-stack-driven lexer for Tala source.
//!
//! The scanner is pull-based: [`Lexer::next_token`] yields one non-trivia
//! token per call and `Eof` forever after the end of input. Embedded
//! languages — string templates, XML literals, documentation lines — each
//! get a mode on an explicit stack, and `${...}` interpolations re-enter
//! the full default mode with their own brace accounting, nesting to any
//! depth.
//!
//! Errors never stop the scan. Every diagnostic is paired with a
//! best-effort token so a parser downstream always sees a complete
//! stream; [`lex`] bundles both.
//!
//! ```
//! use tala_ir::{StringInterner, TokenKind};
//!
//! let interner = StringInterner::new();
//! let out = tala_lexer::lex("var x = `hi ${name}`;", &interner);
//! assert!(out.errors.is_empty());
//! assert_eq!(out.tokens[0].kind, TokenKind::Var);
//! ```

mod doc;
mod escape;
mod flags;
mod keywords;
mod lex_error;
mod lexer;
mod mode;
mod template;
mod xml;

pub use escape::unescape_string;
pub use flags::ContextFlags;
pub use lex_error::{LexError, LexErrorKind, LexSuggestion};
pub use lexer::Lexer;
pub use mode::{Mode, ModeStack};

use tala_ir::{StringInterner, TokenKind, TokenList};
use tala_lexer_core::SourceBuffer;

/// Everything one scan produces: the token stream (always ending in
/// `Eof`) and the diagnostics collected along the way.
#[derive(Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex a whole source unit in one call.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let buffer = SourceBuffer::new(source);
    let mut lexer = Lexer::new(&buffer, interner);

    // Typical Tala runs a bit under one token per eight source bytes.
    let mut tokens = TokenList::with_capacity(source.len() / 8 + 8);
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    LexOutput {
        tokens,
        errors: lexer.into_errors(),
    }
}
