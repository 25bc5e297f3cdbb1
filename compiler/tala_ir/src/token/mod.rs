//! Token types for the Tala lexer.
//!
//! A [`Token`] records what matched ([`TokenKind`]), the exact lexeme
//! (interned as a [`Name`]), and where it matched (byte span plus 1-based
//! line/column). Tokens are immutable once emitted; the parser owns them
//! thereafter.

mod kind;
mod list;

pub use kind::{TokenKind, TOKEN_KIND_COUNT};
pub use list::TokenList;

use std::fmt;

use crate::{Name, Span};

/// A lexed token.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text matched, interned.
    pub text: Name,
    pub span: Span,
    /// 1-based line of the token start.
    pub line: u32,
    /// 1-based column of the token start, counted in characters.
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: Name, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            text,
            span,
            line,
            column,
        }
    }

    /// Create a dummy token for tests and synthesized streams.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            text: Name::EMPTY,
            span: Span::DUMMY,
            line: 1,
            column: 1,
        }
    }

    /// Length of the matched lexeme in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.span.len()
    }

    /// Whether the matched lexeme is empty (only `Eof` and some
    /// best-effort `Error` tokens).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} @ {} ({}:{})",
            self.kind, self.span, self.line, self.column
        )
    }
}

// Size assertion to prevent accidental regressions: Token is allocated once
// per lexeme, keep it compact.
// TokenKind (1) + pad (3) + Name (4) + Span (8) + line (4) + column (4) = 24
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    crate::static_assert_size!(Token, 24);
    crate::static_assert_size!(TokenKind, 1);
}
