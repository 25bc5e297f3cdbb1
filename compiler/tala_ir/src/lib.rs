//! Tala IR - shared front-end types for the Tala compiler.
//!
//! This crate contains the data structures shared between the lexer and the
//! parser:
//! - [`Span`] for source locations
//! - [`Name`] and [`StringInterner`] for interned identifiers and lexemes
//! - [`Token`], [`TokenKind`] and [`TokenList`] for lexer output
//! - [`LineIndex`] for offset to line/column conversion
//!
//! Tokens carry interned lexemes rather than owned strings, so equality and
//! hashing are O(1) and a full token stream stays compact.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod line_index;
mod name;
mod span;
mod token;

pub use interner::{InternError, StringInterner};
pub use line_index::LineIndex;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList, TOKEN_KIND_COUNT};
