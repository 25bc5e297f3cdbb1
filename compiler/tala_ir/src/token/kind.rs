//! Token kind catalogue.
//!
//! Fixed, versioned enumeration the parser's grammar rules are compiled
//! against. Adding, removing, or reordering variants is a breaking change
//! for the parser and must be coordinated.
//!
//! Variants are grouped as: reserved keywords, contextual keywords,
//! operators and punctuation, literals, string-template fragments, XML
//! fragments, documentation fragments, and the `Error`/`Eof` sentinels.

use std::fmt;

/// The kind of a lexed token.
///
/// All variants are payload-free; the matched lexeme lives in
/// [`crate::Token::text`] as an interned [`crate::Name`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // === Reserved keywords: declarations ===
    Import,     // import
    As,         // as
    Public,     // public
    Private,    // private
    Final,      // final
    Abstract,   // abstract
    External,   // external
    Service,    // service
    Resource,   // resource
    Function,   // function
    Object,     // object
    Record,     // record
    Annotation, // annotation
    Worker,     // worker
    Listener,   // listener
    Remote,     // remote
    Client,     // client
    Xmlns,      // xmlns
    Returns,    // returns
    Version,    // version
    Const,      // const
    Enum,       // enum
    Type,       // type
    Typeof,     // typeof
    Source,     // source
    On,         // on
    Field,      // field
    Distinct,   // distinct
    Readonly,   // readonly

    // === Reserved keywords: built-in type names ===
    IntType,      // int
    ByteType,     // byte
    FloatType,    // float
    DecimalType,  // decimal
    BooleanType,  // boolean
    StringType,   // string
    ErrorType,    // error
    MapType,      // map
    JsonType,     // json
    XmlType,      // xml
    TableType,    // table
    StreamType,   // stream
    AnyType,      // any
    AnydataType,  // anydata
    HandleType,   // handle
    NeverType,    // never
    FutureType,   // future
    TypedescType, // typedesc

    // === Reserved keywords: statements and expressions ===
    Var,         // var
    New,         // new
    Init,        // init
    If,          // if
    Else,        // else
    Match,       // match
    Foreach,     // foreach
    While,       // while
    In,          // in
    Continue,    // continue
    Break,       // break
    Return,      // return
    Transaction, // transaction
    Retry,       // retry
    Commit,      // commit
    Rollback,    // rollback
    Lock,        // lock
    Start,       // start
    Check,       // check
    CheckPanic,  // checkpanic
    Panic,       // panic
    Trap,        // trap
    Is,          // is
    Wait,        // wait
    Flush,       // flush
    Default,     // default
    Do,          // do (also terminates a query pipeline)
    From,        // from (opens a query expression)
    True,        // true
    False,       // false
    Null,        // null

    // === Contextual keywords (gated by context flags) ===
    Key,    // key (only inside a table type)
    Select, // select (only inside a query expression; terminates it)
    Where,  // where
    Let,    // let
    Order,  // order
    By,     // by
    Limit,  // limit
    Join,   // join
    Equals, // equals
    Outer,  // outer

    // === Punctuation ===
    Semicolon,    // ;
    Colon,        // :
    Dot,          // .
    Comma,        // ,
    LeftBrace,    // {
    RightBrace,   // }
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]

    // === Operators ===
    Assign,        // =
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /
    Percent,       // %
    PlusAssign,    // +=
    MinusAssign,   // -=
    StarAssign,    // *=
    SlashAssign,   // /=
    AmpAssign,     // &=
    PipeAssign,    // |=
    CaretAssign,   // ^=
    ShlAssign,     // <<=
    ShrAssign,     // >>=
    UshrAssign,    // >>>=
    EqualEqual,    // ==
    NotEqual,      // !=
    TripleEqual,   // ===
    NotTripleEqual, // !==
    Lt,            // <
    Gt,            // >
    LtEqual,       // <=
    GtEqual,       // >=
    Shl,           // <<
    Shr,           // >>
    Ushr,          // >>>
    AndAnd,        // &&
    OrOr,          // ||
    Not,           // !
    Amp,           // &
    Pipe,          // |
    Caret,         // ^
    Question,      // ?
    QuestionDot,   // ?.
    Elvis,         // ?:
    Ellipsis,      // ...
    HalfOpenRange, // ..<
    RightArrow,    // ->
    LeftArrow,     // <-
    DoubleArrow,   // =>
    At,            // @

    // === Literals and identifiers ===
    Identifier,    // foo
    IntLiteral,    // 42
    HexIntLiteral, // 0x2A
    FloatLiteral,  // 3.14, 1e9
    StringLiteral, // "text"

    // === String template fragments ===
    TemplateStart,      // `
    TemplateText,       // literal text inside a template
    TemplateEnd,        // closing `
    InterpolationStart, // ${

    // === XML literal fragments ===
    XmlTemplateStart, // xml `
    XmlTemplateEnd,   // closing ` of an xml literal
    XmlTagOpen,       // <
    XmlTagOpenSlash,  // </
    XmlTagClose,      // >
    XmlTagSlashClose, // />
    XmlQName,         // tag or attribute name, possibly ns-qualified
    XmlEquals,        // = inside a tag
    XmlDoubleQuote,   // " delimiting an attribute value
    XmlSingleQuote,   // ' delimiting an attribute value
    XmlQuotedText,    // text inside a quoted attribute value
    XmlText,          // character data between tags
    XmlCommentStart,  // <!--
    XmlCommentText,   // text inside an XML comment
    XmlCommentEnd,    // -->
    XmlPiStart,       // <?
    XmlPiText,        // text inside a processing instruction
    XmlPiEnd,         // ?>
    XmlCdata,         // <![CDATA[ ... ]]>

    // === Documentation fragments ===
    DocStart,            // # at the start of a documentation line
    DocText,             // free documentation text
    DocPlus,             // + introducing a parameter doc
    DocParameterName,    // the parameter name after +
    DocMinus,            // - separating name from description
    DocCodeSingleStart,  // `
    DocCodeSingleEnd,    // `
    DocCodeDoubleStart,  // ``
    DocCodeDoubleEnd,    // ``
    DocCodeTripleStart,  // ```
    DocCodeTripleEnd,    // ```
    DocCodeText,         // text inside a backticked code span

    // === Sentinels ===
    Error, // unmatched input, best-effort recovery token
    Eof,   // end of input
}

/// Number of [`TokenKind`] variants. Part of the versioned catalogue.
pub const TOKEN_KIND_COUNT: usize = TokenKind::Eof as usize + 1;

impl TokenKind {
    /// Discriminant as a dense u8 tag, for parallel tag arrays and
    /// jump-table dispatch.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Whether this kind is a reserved keyword (always a keyword,
    /// regardless of context).
    #[inline]
    pub fn is_reserved_keyword(self) -> bool {
        (TokenKind::Import as u8..=TokenKind::Null as u8).contains(&(self as u8))
    }

    /// Whether this kind is a contextual keyword (only recognized when its
    /// gating context flag is set; an identifier elsewhere).
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        (TokenKind::Key as u8..=TokenKind::Outer as u8).contains(&(self as u8))
    }

    /// Whether this kind is a literal or identifier.
    #[inline]
    pub fn is_literal(self) -> bool {
        (TokenKind::Identifier as u8..=TokenKind::StringLiteral as u8).contains(&(self as u8))
    }

    /// Human-readable name for diagnostics: the keyword/operator spelling
    /// for fixed tokens, a description otherwise.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Import => "import",
            As => "as",
            Public => "public",
            Private => "private",
            Final => "final",
            Abstract => "abstract",
            External => "external",
            Service => "service",
            Resource => "resource",
            Function => "function",
            Object => "object",
            Record => "record",
            Annotation => "annotation",
            Worker => "worker",
            Listener => "listener",
            Remote => "remote",
            Client => "client",
            Xmlns => "xmlns",
            Returns => "returns",
            Version => "version",
            Const => "const",
            Enum => "enum",
            Type => "type",
            Typeof => "typeof",
            Source => "source",
            On => "on",
            Field => "field",
            Distinct => "distinct",
            Readonly => "readonly",
            IntType => "int",
            ByteType => "byte",
            FloatType => "float",
            DecimalType => "decimal",
            BooleanType => "boolean",
            StringType => "string",
            ErrorType => "error",
            MapType => "map",
            JsonType => "json",
            XmlType => "xml",
            TableType => "table",
            StreamType => "stream",
            AnyType => "any",
            AnydataType => "anydata",
            HandleType => "handle",
            NeverType => "never",
            FutureType => "future",
            TypedescType => "typedesc",
            Var => "var",
            New => "new",
            Init => "init",
            If => "if",
            Else => "else",
            Match => "match",
            Foreach => "foreach",
            While => "while",
            In => "in",
            Continue => "continue",
            Break => "break",
            Return => "return",
            Transaction => "transaction",
            Retry => "retry",
            Commit => "commit",
            Rollback => "rollback",
            Lock => "lock",
            Start => "start",
            Check => "check",
            CheckPanic => "checkpanic",
            Panic => "panic",
            Trap => "trap",
            Is => "is",
            Wait => "wait",
            Flush => "flush",
            Default => "default",
            Do => "do",
            From => "from",
            True => "true",
            False => "false",
            Null => "null",
            Key => "key",
            Select => "select",
            Where => "where",
            Let => "let",
            Order => "order",
            By => "by",
            Limit => "limit",
            Join => "join",
            Equals => "equals",
            Outer => "outer",
            Semicolon => ";",
            Colon => ":",
            Dot => ".",
            Comma => ",",
            LeftBrace => "{",
            RightBrace => "}",
            LeftParen => "(",
            RightParen => ")",
            LeftBracket => "[",
            RightBracket => "]",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            PlusAssign => "+=",
            MinusAssign => "-=",
            StarAssign => "*=",
            SlashAssign => "/=",
            AmpAssign => "&=",
            PipeAssign => "|=",
            CaretAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            UshrAssign => ">>>=",
            EqualEqual => "==",
            NotEqual => "!=",
            TripleEqual => "===",
            NotTripleEqual => "!==",
            Lt => "<",
            Gt => ">",
            LtEqual => "<=",
            GtEqual => ">=",
            Shl => "<<",
            Shr => ">>",
            Ushr => ">>>",
            AndAnd => "&&",
            OrOr => "||",
            Not => "!",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Question => "?",
            QuestionDot => "?.",
            Elvis => "?:",
            Ellipsis => "...",
            HalfOpenRange => "..<",
            RightArrow => "->",
            LeftArrow => "<-",
            DoubleArrow => "=>",
            At => "@",
            Identifier => "identifier",
            IntLiteral => "integer literal",
            HexIntLiteral => "hex integer literal",
            FloatLiteral => "float literal",
            StringLiteral => "string literal",
            TemplateStart => "template start",
            TemplateText => "template text",
            TemplateEnd => "template end",
            InterpolationStart => "${",
            XmlTemplateStart => "xml literal start",
            XmlTemplateEnd => "xml literal end",
            XmlTagOpen => "<",
            XmlTagOpenSlash => "</",
            XmlTagClose => ">",
            XmlTagSlashClose => "/>",
            XmlQName => "xml name",
            XmlEquals => "=",
            XmlDoubleQuote => "\"",
            XmlSingleQuote => "'",
            XmlQuotedText => "xml attribute text",
            XmlText => "xml text",
            XmlCommentStart => "<!--",
            XmlCommentText => "xml comment text",
            XmlCommentEnd => "-->",
            XmlPiStart => "<?",
            XmlPiText => "xml processing instruction text",
            XmlPiEnd => "?>",
            XmlCdata => "xml cdata section",
            DocStart => "documentation start",
            DocText => "documentation text",
            DocPlus => "+",
            DocParameterName => "documentation parameter name",
            DocMinus => "-",
            DocCodeSingleStart => "`",
            DocCodeSingleEnd => "`",
            DocCodeDoubleStart => "``",
            DocCodeDoubleEnd => "``",
            DocCodeTripleStart => "```",
            DocCodeTripleEnd => "```",
            DocCodeText => "documentation code text",
            Error => "invalid token",
            Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
