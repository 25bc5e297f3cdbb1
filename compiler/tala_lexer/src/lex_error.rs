//! Lexical error diagnostics.
//!
//! Errors are plain data accumulated during the scan, surfaced alongside a
//! best-effort token stream. Nothing here unwinds: every kind except a
//! mode-stack underflow (an internal assertion, see
//! [`crate::ModeStack::pop`]) is recoverable and the scan continues.
//!
//! Each error answers four questions: WHERE (span), WHAT (kind), WHY
//! (optional context line), and HOW to fix it (optional suggestions).

use tala_ir::Span;

/// A recoverable lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
    /// Optional free-text line explaining why this is an error here.
    pub context: Option<String>,
    /// Optional concrete fixes, in order of preference.
    pub suggestions: Vec<LexSuggestion>,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character `{ch}`")]
    UnmatchedCharacter { ch: char },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated string template")]
    UnterminatedTemplate,
    #[error("unterminated xml literal")]
    UnterminatedXml,
    #[error("unterminated xml comment")]
    UnterminatedXmlComment,
    #[error("unterminated xml processing instruction")]
    UnterminatedXmlPi,
    #[error("unterminated xml cdata section")]
    UnterminatedCdata,
    #[error("unterminated code span in documentation")]
    UnterminatedCodeSpan,
    #[error("invalid escape sequence `\\{escape_char}`")]
    InvalidEscape { escape_char: char },
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("byte order mark")]
    ByteOrderMark,
    #[error("NUL byte in source")]
    InteriorNul,
}

/// A suggested fix attached to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexSuggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Replacement text for the error span, when the fix is mechanical.
    pub replacement: Option<String>,
}

impl LexSuggestion {
    /// A prose-only suggestion.
    pub fn text(message: impl Into<String>) -> Self {
        LexSuggestion {
            message: message.into(),
            replacement: None,
        }
    }

    /// A suggestion that replaces the error span with `replacement`.
    pub fn replace(message: impl Into<String>, replacement: impl Into<String>) -> Self {
        LexSuggestion {
            message: message.into(),
            replacement: Some(replacement.into()),
        }
    }
}

// Factory constructors are #[cold]: errors are off the hot path and the
// hint keeps their setup code out of the scanner's instruction stream.
impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError {
            span,
            kind,
            context: None,
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn unmatched_character(ch: char, span: Span) -> Self {
        LexError::new(LexErrorKind::UnmatchedCharacter { ch }, span)
    }

    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        LexError::new(LexErrorKind::UnterminatedString, span)
            .with_suggestion(LexSuggestion::text("add a closing `\"`"))
    }

    #[cold]
    pub fn unterminated_template(span: Span) -> Self {
        LexError::new(LexErrorKind::UnterminatedTemplate, span)
            .with_suggestion(LexSuggestion::text("add a closing backtick"))
    }

    #[cold]
    pub fn unterminated_xml(span: Span) -> Self {
        LexError::new(LexErrorKind::UnterminatedXml, span)
            .with_suggestion(LexSuggestion::text("add a closing backtick"))
    }

    #[cold]
    pub fn invalid_escape(escape_char: char, span: Span) -> Self {
        let err = LexError::new(LexErrorKind::InvalidEscape { escape_char }, span);
        match escape_char {
            // Likely intent: a literal backslash.
            ' ' | 'a' | 'c' | 'e' => {
                err.with_suggestion(LexSuggestion::replace("escape the backslash", "\\\\"))
            }
            _ => err,
        }
    }

    #[cold]
    pub fn invalid_unicode_escape(span: Span) -> Self {
        LexError::new(LexErrorKind::InvalidUnicodeEscape, span).with_context(
            "unicode escapes are `\\u{...}` with one to six hex digits, up to 10FFFF",
        )
    }

    /// Attach a context line.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: LexSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
