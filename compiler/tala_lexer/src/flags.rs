//! Context flags gating ambiguous keyword rules.
//!
//! A handful of keywords are only keywords in a specific surrounding
//! construct, and that construct is not worth a full mode switch because
//! ordinary expression lexing continues inside it. These flags are
//! orthogonal guards: rule predicates read them, rule actions write them,
//! and nothing else touches them.

/// Scan-wide boolean state owned by one lexer instance.
///
/// # The `table`/`key` one-shot reset
///
/// `table` sets `in_table_type`; matching `key` as a keyword clears it
/// immediately. This is a single boolean, not a per-nesting-level stack,
/// so nested table types sharing the flag rely on left-to-right reset
/// ordering. Known fragility, kept deliberately: a `key` specifier in an
/// inner table type releases the gate for the outer one too.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextFlags {
    /// Set while any string template or XML literal mode is on the stack.
    pub in_string_template: bool,
    /// Set by `from`; cleared by `select` or `do`. Gates the query
    /// clause keywords (`where`, `let`, `order`, `by`, ...).
    pub in_query_expression: bool,
    /// Set by `table`; cleared by the next gated `key` or by a `>` family
    /// token closing the type argument list.
    pub in_table_type: bool,
}

impl ContextFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let flags = ContextFlags::new();
        assert!(!flags.in_string_template);
        assert!(!flags.in_query_expression);
        assert!(!flags.in_table_type);
    }
}
