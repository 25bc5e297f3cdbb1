//! Keyword classification.
//!
//! Called after the identifier rule has consumed a maximal
//! `[A-Za-z_][A-Za-z0-9_]*` run, which is what makes keyword matching obey
//! maximal munch: `clientX` never reaches these tables as `client`. A
//! same-length tie between a keyword spelling and the identifier rule is
//! resolved here in favor of the keyword, mirroring keyword-before-
//! identifier declaration order.
//!
//! Lookup is bucketed by length and then by first byte, so non-keyword
//! identifiers fall out after at most two comparisons plus one string
//! equality check.

use tala_ir::TokenKind;

use crate::ContextFlags;

/// Classify a reserved keyword. Returns `None` for anything that is not
/// unconditionally a keyword.
pub(crate) fn reserved(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    match bytes.len() {
        2 => match bytes[0] {
            b'a' => (text == "as").then_some(TokenKind::As),
            b'd' => (text == "do").then_some(TokenKind::Do),
            b'i' => match bytes[1] {
                b'f' => Some(TokenKind::If),
                b'n' => Some(TokenKind::In),
                b's' => Some(TokenKind::Is),
                _ => None,
            },
            b'o' => (text == "on").then_some(TokenKind::On),
            _ => None,
        },
        3 => match bytes[0] {
            b'a' => (text == "any").then_some(TokenKind::AnyType),
            b'i' => (text == "int").then_some(TokenKind::IntType),
            b'm' => (text == "map").then_some(TokenKind::MapType),
            b'n' => (text == "new").then_some(TokenKind::New),
            b'v' => (text == "var").then_some(TokenKind::Var),
            b'x' => (text == "xml").then_some(TokenKind::XmlType),
            _ => None,
        },
        4 => match bytes[0] {
            b'b' => (text == "byte").then_some(TokenKind::ByteType),
            b'e' => match text {
                "else" => Some(TokenKind::Else),
                "enum" => Some(TokenKind::Enum),
                _ => None,
            },
            b'f' => (text == "from").then_some(TokenKind::From),
            b'i' => (text == "init").then_some(TokenKind::Init),
            b'j' => (text == "json").then_some(TokenKind::JsonType),
            b'l' => (text == "lock").then_some(TokenKind::Lock),
            b'n' => (text == "null").then_some(TokenKind::Null),
            b't' => match text {
                "trap" => Some(TokenKind::Trap),
                "true" => Some(TokenKind::True),
                "type" => Some(TokenKind::Type),
                _ => None,
            },
            b'w' => (text == "wait").then_some(TokenKind::Wait),
            _ => None,
        },
        5 => match bytes[0] {
            b'b' => (text == "break").then_some(TokenKind::Break),
            b'c' => match text {
                "check" => Some(TokenKind::Check),
                "const" => Some(TokenKind::Const),
                _ => None,
            },
            b'e' => (text == "error").then_some(TokenKind::ErrorType),
            b'f' => match text {
                "false" => Some(TokenKind::False),
                "field" => Some(TokenKind::Field),
                "final" => Some(TokenKind::Final),
                "float" => Some(TokenKind::FloatType),
                "flush" => Some(TokenKind::Flush),
                _ => None,
            },
            b'm' => (text == "match").then_some(TokenKind::Match),
            b'n' => (text == "never").then_some(TokenKind::NeverType),
            b'p' => (text == "panic").then_some(TokenKind::Panic),
            b'r' => (text == "retry").then_some(TokenKind::Retry),
            b's' => (text == "start").then_some(TokenKind::Start),
            b't' => (text == "table").then_some(TokenKind::TableType),
            b'w' => (text == "while").then_some(TokenKind::While),
            b'x' => (text == "xmlns").then_some(TokenKind::Xmlns),
            _ => None,
        },
        6 => match bytes[0] {
            b'c' => match text {
                "client" => Some(TokenKind::Client),
                "commit" => Some(TokenKind::Commit),
                _ => None,
            },
            b'f' => (text == "future").then_some(TokenKind::FutureType),
            b'h' => (text == "handle").then_some(TokenKind::HandleType),
            b'i' => (text == "import").then_some(TokenKind::Import),
            b'o' => (text == "object").then_some(TokenKind::Object),
            b'p' => (text == "public").then_some(TokenKind::Public),
            b'r' => match text {
                "record" => Some(TokenKind::Record),
                "remote" => Some(TokenKind::Remote),
                "return" => Some(TokenKind::Return),
                _ => None,
            },
            b's' => match text {
                "source" => Some(TokenKind::Source),
                "stream" => Some(TokenKind::StreamType),
                "string" => Some(TokenKind::StringType),
                _ => None,
            },
            b't' => (text == "typeof").then_some(TokenKind::Typeof),
            b'w' => (text == "worker").then_some(TokenKind::Worker),
            _ => None,
        },
        7 => match bytes[0] {
            b'a' => (text == "anydata").then_some(TokenKind::AnydataType),
            b'b' => (text == "boolean").then_some(TokenKind::BooleanType),
            b'd' => match text {
                "decimal" => Some(TokenKind::DecimalType),
                "default" => Some(TokenKind::Default),
                _ => None,
            },
            b'f' => (text == "foreach").then_some(TokenKind::Foreach),
            b'p' => (text == "private").then_some(TokenKind::Private),
            b'r' => (text == "returns").then_some(TokenKind::Returns),
            b's' => (text == "service").then_some(TokenKind::Service),
            b'v' => (text == "version").then_some(TokenKind::Version),
            _ => None,
        },
        8 => match bytes[0] {
            b'a' => (text == "abstract").then_some(TokenKind::Abstract),
            b'c' => (text == "continue").then_some(TokenKind::Continue),
            b'd' => (text == "distinct").then_some(TokenKind::Distinct),
            b'e' => (text == "external").then_some(TokenKind::External),
            b'f' => (text == "function").then_some(TokenKind::Function),
            b'l' => (text == "listener").then_some(TokenKind::Listener),
            b'r' => match text {
                "readonly" => Some(TokenKind::Readonly),
                "resource" => Some(TokenKind::Resource),
                "rollback" => Some(TokenKind::Rollback),
                _ => None,
            },
            b't' => (text == "typedesc").then_some(TokenKind::TypedescType),
            _ => None,
        },
        10 => match bytes[0] {
            b'a' => (text == "annotation").then_some(TokenKind::Annotation),
            b'c' => (text == "checkpanic").then_some(TokenKind::CheckPanic),
            _ => None,
        },
        11 => (text == "transaction").then_some(TokenKind::Transaction),
        _ => None,
    }
}

/// Classify a contextual keyword under the current flags. These rules
/// carry semantic predicates: when the gating flag is clear the rule is
/// skipped entirely and the text stays an identifier.
pub(crate) fn contextual(text: &str, flags: &ContextFlags) -> Option<TokenKind> {
    if flags.in_table_type && text == "key" {
        return Some(TokenKind::Key);
    }
    if !flags.in_query_expression {
        return None;
    }
    match text.len() {
        2 => (text == "by").then_some(TokenKind::By),
        3 => (text == "let").then_some(TokenKind::Let),
        4 => (text == "join").then_some(TokenKind::Join),
        5 => match text {
            "limit" => Some(TokenKind::Limit),
            "order" => Some(TokenKind::Order),
            "outer" => Some(TokenKind::Outer),
            "where" => Some(TokenKind::Where),
            _ => None,
        },
        6 => match text {
            "equals" => Some(TokenKind::Equals),
            "select" => Some(TokenKind::Select),
            _ => None,
        },
        _ => None,
    }
}
