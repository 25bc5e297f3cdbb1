//! Lexical modes and the mode stack.
//!
//! Each mode owns its own rule set; the active rules are a pure function
//! of the mode on top of the stack. Modes are pushed and popped only by
//! the actions of matched rules: entering a template, XML literal, or
//! documentation construct pushes, and its closing delimiter pops.

use smallvec::{smallvec, SmallVec};

/// A lexical mode. The mode on top of the [`ModeStack`] selects which scan
/// routine runs next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary source code. Bottom of every stack; also pushed for each
    /// `${` interpolation so the full expression grammar is available
    /// inside the braces.
    Default,
    /// Backtick string template text.
    StringTemplate,
    /// XML literal character data (between tags).
    Xml,
    /// Inside `<` ... `>` of an XML tag.
    XmlTag,
    /// Inside a double-quoted XML attribute value.
    XmlDoubleQuoted,
    /// Inside a single-quoted XML attribute value.
    XmlSingleQuoted,
    /// Inside `<?` ... `?>`.
    XmlPi,
    /// Inside `<!--` ... `-->`.
    XmlComment,
    /// A `#` documentation line.
    Doc,
    /// Single-backtick code span in documentation.
    DocCodeSingle,
    /// Double-backtick code span in documentation.
    DocCodeDouble,
    /// Triple-backtick code span in documentation.
    DocCodeTriple,
}

impl Mode {
    /// Whether this mode is part of a template or XML literal. While any
    /// such mode is on the stack the `in_string_template` context flag
    /// stays set.
    pub fn is_template_like(self) -> bool {
        matches!(
            self,
            Mode::StringTemplate
                | Mode::Xml
                | Mode::XmlTag
                | Mode::XmlDoubleQuoted
                | Mode::XmlSingleQuoted
                | Mode::XmlPi
                | Mode::XmlComment
        )
    }
}

/// Array-backed stack of active modes.
///
/// Non-empty by construction: the base [`Mode::Default`] is pushed at
/// creation and never popped. Depth is bounded by the nesting depth of
/// source constructs, so the inline capacity covers all but pathological
/// input.
#[derive(Clone, Debug)]
pub struct ModeStack {
    stack: SmallVec<[Mode; 8]>,
}

impl ModeStack {
    /// Create a stack holding only the base default mode.
    pub fn new() -> Self {
        ModeStack {
            stack: smallvec![Mode::Default],
        }
    }

    /// The mode on top of the stack. Never fails; the base mode is always
    /// present.
    #[inline]
    pub fn current(&self) -> Mode {
        self.stack[self.stack.len() - 1]
    }

    /// Push a mode. Invoked only by rule actions.
    #[inline]
    pub fn push(&mut self, mode: Mode) {
        self.stack.push(mode);
    }

    /// Pop the top mode. Invoked only by rule actions.
    ///
    /// # Panics
    /// Panics on an attempt to pop the base mode. A correct rule table
    /// never does this, so reaching it indicates a bug in the rule set,
    /// not bad user input.
    #[inline]
    pub fn pop(&mut self) -> Mode {
        assert!(
            self.stack.len() > 1,
            "mode stack underflow: attempted to pop the base mode"
        );
        match self.stack.pop() {
            Some(mode) => mode,
            // Unreachable: length was checked above.
            None => Mode::Default,
        }
    }

    /// Pop everything above the base mode. Used for end-of-input recovery
    /// when the source ends inside a nested construct.
    pub fn unwind_to_base(&mut self) {
        self.stack.truncate(1);
    }

    /// Current stack depth (1 = only the base mode).
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether any mode on the stack satisfies `pred`.
    pub fn any(&self, pred: impl Fn(Mode) -> bool) -> bool {
        self.stack.iter().copied().any(pred)
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}
