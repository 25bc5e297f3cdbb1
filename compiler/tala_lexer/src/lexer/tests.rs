use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tala_ir::{StringInterner, TokenKind};
use tala_lexer_core::SourceBuffer;

use crate::lex_error::LexErrorKind;
use crate::{lex, Lexer};
use TokenKind::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    lex(source, &interner).tokens.kinds().collect()
}

fn lexemes(source: &str) -> Vec<(TokenKind, String)> {
    let interner = StringInterner::new();
    let out = lex(source, &interner);
    out.tokens
        .iter()
        .map(|t| (t.kind, interner.lookup(t.text).to_string()))
        .collect()
}

fn error_kinds(source: &str) -> Vec<LexErrorKind> {
    let interner = StringInterner::new();
    lex(source, &interner)
        .errors
        .into_iter()
        .map(|e| e.kind)
        .collect()
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![Eof]);
}

#[test]
fn eof_is_idempotent() {
    let interner = StringInterner::new();
    let buf = SourceBuffer::new("var");
    let mut lexer = Lexer::new(&buf, &interner);
    assert_eq!(lexer.next_token().kind, Var);
    assert_eq!(lexer.next_token().kind, Eof);
    assert_eq!(lexer.next_token().kind, Eof);
    assert_eq!(lexer.next_token().kind, Eof);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("public function greet(string name) returns string { return name; }"),
        vec![
            Public, Function, Identifier, LeftParen, StringType, Identifier, RightParen, Returns,
            StringType, LeftBrace, Return, Identifier, Semicolon, RightBrace, Eof,
        ]
    );
}

#[test]
fn keyword_prefix_extends_to_identifier() {
    // Maximal munch: a longer identifier beats a shorter keyword match.
    assert_eq!(kinds("clientX"), vec![Identifier, Eof]);
    assert_eq!(kinds("client"), vec![Client, Eof]);
    assert_eq!(kinds("client_x"), vec![Identifier, Eof]);
    assert_eq!(kinds("returnx return"), vec![Identifier, Return, Eof]);
}

#[test]
fn comments_are_trivia() {
    assert_eq!(kinds("var x // trailing\n// full line\ny"), vec![Var, Identifier, Identifier, Eof]);
    assert_eq!(kinds("// only a comment"), vec![Eof]);
}

#[test]
fn numbers() {
    assert_eq!(
        lexemes("42 0x2A 3.14 1e9 2.5e-3 0x 7."),
        vec![
            (IntLiteral, "42".to_string()),
            (HexIntLiteral, "0x2A".to_string()),
            (FloatLiteral, "3.14".to_string()),
            (FloatLiteral, "1e9".to_string()),
            (FloatLiteral, "2.5e-3".to_string()),
            (IntLiteral, "0".to_string()),
            (Identifier, "x".to_string()),
            (IntLiteral, "7".to_string()),
            (Dot, ".".to_string()),
            (Eof, String::new()),
        ]
    );
}

#[test]
fn range_operators_are_not_floats() {
    assert_eq!(
        kinds("1..<9 1...9"),
        vec![IntLiteral, HalfOpenRange, IntLiteral, IntLiteral, Ellipsis, IntLiteral, Eof]
    );
}

#[test]
fn comparison_and_shift_operators() {
    assert_eq!(
        kinds(">>>= >>> >>= >> >= > === == => = !== != ! <<= << <= <- <"),
        vec![
            UshrAssign, Ushr, ShrAssign, Shr, GtEqual, Gt, TripleEqual, EqualEqual, DoubleArrow,
            Assign, NotTripleEqual, NotEqual, Not, ShlAssign, Shl, LtEqual, LeftArrow, Lt, Eof,
        ]
    );
}

#[test]
fn remaining_operators_and_punctuation() {
    assert_eq!(
        kinds("+= -= *= /= &= |= ^= % & | ^ && || @ -> , ; : [ ] ( ) ?. ?: ?"),
        vec![
            PlusAssign, MinusAssign, StarAssign, SlashAssign, AmpAssign, PipeAssign, CaretAssign,
            Percent, Amp, Pipe, Caret, AndAnd, OrOr, At, RightArrow, Comma, Semicolon, Colon,
            LeftBracket, RightBracket, LeftParen, RightParen, QuestionDot, Elvis, Question, Eof,
        ]
    );
}

#[test]
fn string_literals() {
    assert_eq!(
        lexemes(r#""hi" "a\nb\"c""#),
        vec![
            (StringLiteral, r#""hi""#.to_string()),
            (StringLiteral, r#""a\nb\"c""#.to_string()),
            (Eof, String::new()),
        ]
    );
    assert_eq!(error_kinds(r#""hi""#), vec![]);
}

#[test]
fn unterminated_string_reports_once_with_best_effort_token() {
    let interner = StringInterner::new();
    let out = lex("\"abc", &interner);
    assert_eq!(
        out.tokens.kinds().collect::<Vec<_>>(),
        vec![StringLiteral, Eof]
    );
    assert_eq!(interner.lookup(out.tokens[0].text), "\"abc");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, LexErrorKind::UnterminatedString);
}

#[test]
fn unterminated_string_stops_at_newline() {
    assert_eq!(kinds("\"abc\nx"), vec![StringLiteral, Identifier, Eof]);
    assert_eq!(error_kinds("\"abc\nx"), vec![LexErrorKind::UnterminatedString]);
}

#[test]
fn invalid_escape_in_string_continues() {
    assert_eq!(kinds(r#""a\qb""#), vec![StringLiteral, Eof]);
    assert_eq!(
        error_kinds(r#""a\qb""#),
        vec![LexErrorKind::InvalidEscape { escape_char: 'q' }]
    );
}

#[test]
fn unmatched_character_skips_one_scalar() {
    let interner = StringInterner::new();
    let out = lex("var § x", &interner);
    assert_eq!(
        out.tokens.kinds().collect::<Vec<_>>(),
        vec![Var, Error, Identifier, Eof]
    );
    assert_eq!(
        out.errors[0].kind,
        LexErrorKind::UnmatchedCharacter { ch: '§' }
    );
    // The error token covers the whole two-byte character.
    assert_eq!(out.tokens[1].span.len(), 2);
}

#[test]
fn leading_bom_is_reported_and_skipped() {
    assert_eq!(kinds("\u{FEFF}var"), vec![Var, Eof]);
    assert_eq!(error_kinds("\u{FEFF}var"), vec![LexErrorKind::ByteOrderMark]);
}

#[test]
fn interior_nul_is_reported_once() {
    assert_eq!(kinds("a\0b"), vec![Identifier, Error, Identifier, Eof]);
    assert_eq!(error_kinds("a\0b"), vec![LexErrorKind::InteriorNul]);
}

// === String templates ===

#[test]
fn template_with_interpolation() {
    assert_eq!(
        lexemes("`literal ${1 + 1} more`"),
        vec![
            (TemplateStart, "`".to_string()),
            (TemplateText, "literal ".to_string()),
            (InterpolationStart, "${".to_string()),
            (IntLiteral, "1".to_string()),
            (Plus, "+".to_string()),
            (IntLiteral, "1".to_string()),
            (RightBrace, "}".to_string()),
            (TemplateText, " more".to_string()),
            (TemplateEnd, "`".to_string()),
            (Eof, String::new()),
        ]
    );
}

#[test]
fn interpolation_tracks_its_own_braces() {
    assert_eq!(
        kinds("`v${f({})}w`"),
        vec![
            TemplateStart, TemplateText, InterpolationStart, Identifier, LeftParen, LeftBrace,
            RightBrace, RightParen, RightBrace, TemplateText, TemplateEnd, Eof,
        ]
    );
}

#[test]
fn templates_nest_through_interpolation() {
    assert_eq!(
        kinds("`a${`b`}c`"),
        vec![
            TemplateStart, TemplateText, InterpolationStart, TemplateStart, TemplateText,
            TemplateEnd, RightBrace, TemplateText, TemplateEnd, Eof,
        ]
    );
}

#[test]
fn right_brace_at_base_is_plain_punctuation() {
    assert_eq!(kinds("} {"), vec![RightBrace, LeftBrace, Eof]);
}

#[test]
fn escaped_backtick_stays_in_template() {
    assert_eq!(
        lexemes("`a\\`b`"),
        vec![
            (TemplateStart, "`".to_string()),
            (TemplateText, "a\\`b".to_string()),
            (TemplateEnd, "`".to_string()),
            (Eof, String::new()),
        ]
    );
    assert_eq!(error_kinds("`a\\`b`"), vec![]);
}

#[test]
fn bare_dollar_is_template_text() {
    assert_eq!(
        kinds("`cost: $5`"),
        vec![TemplateStart, TemplateText, TemplateEnd, Eof]
    );
}

#[test]
fn unterminated_template() {
    assert_eq!(kinds("`abc"), vec![TemplateStart, TemplateText, Eof]);
    assert_eq!(error_kinds("`abc"), vec![LexErrorKind::UnterminatedTemplate]);
}

#[test]
fn unterminated_interpolation_reports_the_template() {
    assert_eq!(
        kinds("`a${"),
        vec![TemplateStart, TemplateText, InterpolationStart, Eof]
    );
    assert_eq!(error_kinds("`a${"), vec![LexErrorKind::UnterminatedTemplate]);
}

#[test]
fn unterminated_interpolation_with_open_brace_still_balances() {
    let interner = StringInterner::new();
    let buf = SourceBuffer::new("`${f({");
    let mut lexer = Lexer::new(&buf, &interner);
    let mut scanned = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == Eof {
            break;
        }
        scanned.push(token.kind);
    }
    assert_eq!(
        scanned,
        vec![TemplateStart, InterpolationStart, Identifier, LeftParen, LeftBrace]
    );
    assert_eq!(lexer.mode_depth(), 1);
    assert_eq!(lexer.errors().len(), 1);
    assert_eq!(lexer.errors()[0].kind, LexErrorKind::UnterminatedTemplate);
    // End-of-input recovery goes through the suggestion-bearing factory.
    assert_eq!(lexer.errors()[0].suggestions.len(), 1);
}

// === Context flags ===

#[test]
fn key_is_a_keyword_inside_a_table_type() {
    assert_eq!(
        kinds("table<Person key(id)> t;"),
        vec![
            TableType, Lt, Identifier, Key, LeftParen, Identifier, RightParen, Gt, Identifier,
            Semicolon, Eof,
        ]
    );
}

#[test]
fn key_is_an_identifier_outside_a_table_type() {
    assert_eq!(
        kinds("table<int> key(id)"),
        vec![TableType, Lt, IntType, Gt, Identifier, LeftParen, Identifier, RightParen, Eof]
    );
    assert_eq!(kinds("key"), vec![Identifier, Eof]);
}

#[test]
fn inner_key_releases_the_shared_table_gate() {
    // The flag is a single boolean shared by nested table types: once the
    // inner `key` fires, a later `key` for the outer type is demoted to an
    // identifier. Long-standing behavior that downstream code relies on.
    assert_eq!(
        kinds("table<table<int key(a)> key(b)>"),
        vec![
            TableType, Lt, TableType, Lt, IntType, Key, LeftParen, Identifier, RightParen, Gt,
            Identifier, LeftParen, Identifier, RightParen, Gt, Eof,
        ]
    );
}

#[test]
fn query_clause_keywords_are_scoped_to_the_query() {
    assert_eq!(
        kinds("from var x in xs where x > 0 select x"),
        vec![
            From, Var, Identifier, In, Identifier, Where, Identifier, Gt, IntLiteral, Select,
            Identifier, Eof,
        ]
    );
    // After `select` ends the pipeline the clause words demote again.
    assert_eq!(
        kinds("from xs select x where"),
        vec![From, Identifier, Select, Identifier, Identifier, Eof]
    );
    // `do` terminates a pipeline the same way.
    assert_eq!(
        kinds("from xs do where"),
        vec![From, Identifier, Do, Identifier, Eof]
    );
}

#[test]
fn query_clause_words_are_identifiers_without_from() {
    assert_eq!(
        kinds("where select let order by limit join equals outer"),
        vec![Identifier; 9]
            .into_iter()
            .chain(std::iter::once(Eof))
            .collect::<Vec<_>>()
    );
}

// === XML literals ===

#[test]
fn xml_keyword_versus_xml_literal() {
    assert_eq!(kinds("xml x"), vec![XmlType, Identifier, Eof]);
    assert_eq!(
        kinds("xml `a`"),
        vec![XmlTemplateStart, XmlText, XmlTemplateEnd, Eof]
    );
    // Horizontal whitespace between `xml` and the backtick is absorbed
    // into the opener.
    assert_eq!(
        kinds("xml   `a`"),
        vec![XmlTemplateStart, XmlText, XmlTemplateEnd, Eof]
    );
    // A newline between them is not: that is the type keyword.
    assert_eq!(
        kinds("xml\n`a`"),
        vec![XmlType, TemplateStart, TemplateText, TemplateEnd, Eof]
    );
}

#[test]
fn xml_element_with_attribute_and_interpolation() {
    assert_eq!(
        kinds("xml `<a href=\"x\">hi${v}</a>`"),
        vec![
            XmlTemplateStart, XmlTagOpen, XmlQName, XmlQName, XmlEquals, XmlDoubleQuote,
            XmlQuotedText, XmlDoubleQuote, XmlTagClose, XmlText, InterpolationStart, Identifier,
            RightBrace, XmlTagOpenSlash, XmlQName, XmlTagClose, XmlTemplateEnd, Eof,
        ]
    );
}

#[test]
fn xml_self_closing_tag_and_prefixed_name() {
    assert_eq!(
        lexemes("xml `<ns:item rate='4'/>`"),
        vec![
            (XmlTemplateStart, "xml `".to_string()),
            (XmlTagOpen, "<".to_string()),
            (XmlQName, "ns:item".to_string()),
            (XmlQName, "rate".to_string()),
            (XmlEquals, "=".to_string()),
            (XmlSingleQuote, "'".to_string()),
            (XmlQuotedText, "4".to_string()),
            (XmlSingleQuote, "'".to_string()),
            (XmlTagSlashClose, "/>".to_string()),
            (XmlTemplateEnd, "`".to_string()),
            (Eof, String::new()),
        ]
    );
}

#[test]
fn xml_comment_pi_and_cdata() {
    assert_eq!(
        kinds("xml `<!--c--><?pi?><![CDATA[d]]>`"),
        vec![
            XmlTemplateStart, XmlCommentStart, XmlCommentText, XmlCommentEnd, XmlPiStart,
            XmlPiText, XmlPiEnd, XmlCdata, XmlTemplateEnd, Eof,
        ]
    );
}

#[test]
fn xml_attribute_value_interpolation() {
    assert_eq!(
        kinds("xml `<a b=\"${x}\"/>`"),
        vec![
            XmlTemplateStart, XmlTagOpen, XmlQName, XmlQName, XmlEquals, XmlDoubleQuote,
            InterpolationStart, Identifier, RightBrace, XmlDoubleQuote, XmlTagSlashClose,
            XmlTemplateEnd, Eof,
        ]
    );
}

#[test]
fn unterminated_xml_literal() {
    assert_eq!(
        kinds("xml `<a"),
        vec![XmlTemplateStart, XmlTagOpen, XmlQName, Eof]
    );
    assert_eq!(error_kinds("xml `<a"), vec![LexErrorKind::UnterminatedXml]);
}

#[test]
fn unterminated_xml_comment() {
    assert_eq!(
        kinds("xml `<!--abc"),
        vec![XmlTemplateStart, XmlCommentStart, XmlCommentText, Eof]
    );
    // The innermost construct reports; the enclosing literal stays quiet.
    assert_eq!(
        error_kinds("xml `<!--abc"),
        vec![LexErrorKind::UnterminatedXmlComment]
    );
}

#[test]
fn unterminated_xml_processing_instruction() {
    assert_eq!(
        kinds("xml `<?pi"),
        vec![XmlTemplateStart, XmlPiStart, XmlPiText, Eof]
    );
    assert_eq!(error_kinds("xml `<?pi"), vec![LexErrorKind::UnterminatedXmlPi]);
}

#[test]
fn unterminated_cdata_section() {
    let interner = StringInterner::new();
    let out = lex("xml `<![CDATA[abc", &interner);
    assert_eq!(
        out.tokens.kinds().collect::<Vec<_>>(),
        vec![XmlTemplateStart, XmlCdata, Eof]
    );
    // Best-effort token covers the whole open section.
    assert_eq!(interner.lookup(out.tokens[1].text), "<![CDATA[abc");
    // The section itself reports, then the literal it left open does too.
    assert_eq!(
        out.errors.iter().map(|e| e.kind.clone()).collect::<Vec<_>>(),
        vec![LexErrorKind::UnterminatedCdata, LexErrorKind::UnterminatedXml]
    );
}

// === Documentation lines ===

#[test]
fn doc_line_with_code_span() {
    assert_eq!(
        kinds("# Hello `f()` done\nvar"),
        vec![
            DocStart, DocText, DocCodeSingleStart, DocCodeText, DocCodeSingleEnd, DocText, Var,
            Eof,
        ]
    );
}

#[test]
fn doc_line_ends_at_eof_without_error() {
    assert_eq!(kinds("# trailing"), vec![DocStart, DocText, Eof]);
    assert_eq!(error_kinds("# trailing"), vec![]);
}

#[test]
fn doc_parameter_line() {
    assert_eq!(
        lexemes("# + name - the name\n"),
        vec![
            (DocStart, "#".to_string()),
            (DocPlus, "+".to_string()),
            (DocParameterName, "name".to_string()),
            (DocMinus, "-".to_string()),
            (DocText, "the name".to_string()),
            (Eof, String::new()),
        ]
    );
}

#[test]
fn doc_plus_mid_line_is_text() {
    // `+` only introduces a parameter doc at the start of the line.
    assert_eq!(kinds("# a + b\n"), vec![DocStart, DocText, Eof]);
}

#[test]
fn doc_double_backtick_code_span() {
    assert_eq!(
        kinds("# ``a`` x"),
        vec![DocStart, DocCodeDoubleStart, DocCodeText, DocCodeDoubleEnd, DocText, Eof]
    );
}

#[test]
fn doc_single_span_holds_shorter_runs_only() {
    // A double-backtick span may contain single backticks as content.
    assert_eq!(
        lexemes("# ``a`b``\n"),
        vec![
            (DocStart, "#".to_string()),
            (DocCodeDoubleStart, "``".to_string()),
            (DocCodeText, "a`b".to_string()),
            (DocCodeDoubleEnd, "``".to_string()),
            (Eof, String::new()),
        ]
    );
}

#[test]
fn unterminated_doc_code_span() {
    assert_eq!(
        kinds("# `abc\nvar"),
        vec![DocStart, DocCodeSingleStart, DocCodeText, Var, Eof]
    );
    assert_eq!(
        error_kinds("# `abc\nvar"),
        vec![LexErrorKind::UnterminatedCodeSpan]
    );
}

// === Positions ===

#[test]
fn line_and_column_positions() {
    let interner = StringInterner::new();
    let out = lex("var x\n  foo", &interner);
    let foo = out.tokens[2];
    assert_eq!((foo.line, foo.column), (2, 3));
    assert_eq!(foo.span.to_range(), 8..11);
}

// === Whole-scan invariants ===

#[test]
fn mode_stack_returns_to_base() {
    let interner = StringInterner::new();
    let buf = SourceBuffer::new("xml `<a>${`t${1}`}</a>`");
    let mut lexer = Lexer::new(&buf, &interner);
    let mut max_depth = 0;
    loop {
        let token = lexer.next_token();
        if token.kind == Eof {
            break;
        }
        max_depth = max_depth.max(lexer.mode_depth());
    }
    assert!(max_depth > 2, "nesting never engaged (depth {max_depth})");
    assert_eq!(lexer.mode_depth(), 1);
    assert_eq!(lexer.next_token().kind, Eof);
}

#[test]
fn string_template_flag_follows_the_mode_stack() {
    let interner = StringInterner::new();
    let buf = SourceBuffer::new("`a${1}b` x");
    let mut lexer = Lexer::new(&buf, &interner);
    assert!(!lexer.context_flags().in_string_template);

    let mut saw_set = false;
    loop {
        let token = lexer.next_token();
        match token.kind {
            Eof => break,
            TemplateEnd => assert!(!lexer.context_flags().in_string_template),
            _ => saw_set |= lexer.context_flags().in_string_template,
        }
    }
    assert!(saw_set);
    assert!(!lexer.context_flags().in_string_template);
}

#[test]
fn fresh_instances_produce_identical_streams() {
    let source = "function f() { return `n=${n} ${`inner`}`; } # doc `c`\n";
    let first = {
        let interner = StringInterner::new();
        lex(source, &interner).tokens
    };
    let second = {
        let interner = StringInterner::new();
        lex(source, &interner).tokens
    };
    assert_eq!(first, second);
}

mod proptest_lexer {
    use super::*;

    proptest! {
        // The scan always terminates, never panics, and leaves the mode
        // stack balanced, on completely arbitrary input.
        #[test]
        fn lexing_never_panics_and_balances(source in any::<String>()) {
            let interner = StringInterner::new();
            let buf = SourceBuffer::new(&source);
            let mut lexer = Lexer::new(&buf, &interner);
            let mut count = 0usize;
            loop {
                let token = lexer.next_token();
                if token.kind == TokenKind::Eof {
                    break;
                }
                count += 1;
                // Every non-Eof token consumes at least one byte.
                prop_assert!(count <= source.len(), "no forward progress");
            }
            prop_assert_eq!(lexer.mode_depth(), 1);
            prop_assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }

        // Token spans are ordered, disjoint, and in bounds; the stream
        // always ends with Eof.
        #[test]
        fn token_spans_are_ordered_and_in_bounds(source in any::<String>()) {
            let interner = StringInterner::new();
            let out = lex(&source, &interner);
            let mut prev_end = 0u32;
            for token in out.tokens.iter() {
                prop_assert!(token.span.start >= prev_end);
                prop_assert!(token.span.start <= token.span.end);
                prop_assert!(token.span.end as usize <= source.len());
                prev_end = token.span.end;
            }
            let last = out.tokens[out.tokens.len() - 1];
            prop_assert_eq!(last.kind, TokenKind::Eof);
        }

        // Lexing is a pure function of the source text.
        #[test]
        fn fresh_instances_agree(source in any::<String>()) {
            let first = {
                let interner = StringInterner::new();
                lex(&source, &interner)
            };
            let second = {
                let interner = StringInterner::new();
                lex(&source, &interner)
            };
            prop_assert_eq!(first.tokens, second.tokens);
            prop_assert_eq!(first.errors.len(), second.errors.len());
        }
    }
}
