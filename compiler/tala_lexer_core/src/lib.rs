//! Low-level scanning primitives for the Tala lexer.
//!
//! Two building blocks:
//!
//! - [`SourceBuffer`]: owns a sentinel-terminated copy of the source. The
//!   `0x00` sentinel plus cache-line padding lets the scanner read ahead
//!   without bounds checks. Encoding issues (BOMs, interior NUL bytes) are
//!   detected once at construction.
//! - [`Cursor`]: a [`Copy`] view into the buffer with byte lookahead,
//!   `mark()`/`reset()` backtracking, and memchr-accelerated skip loops for
//!   the long text runs inside strings, templates, and XML literals.
//!
//! This crate knows nothing about tokens or modes; that lives in
//! `tala_lexer`.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
