//! Token kinds produced by the scanner.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // =========================================================================
    // Literals
    // =========================================================================
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    /// A whole template literal, `${...}` placeholders included.
    TemplateLiteral,

    // =========================================================================
    // Punctuation
    // =========================================================================
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    EqualsGreaterThanToken,
    QuestionToken,
    ColonToken,
    BarToken,
    AmpersandToken,
    MinusToken,
    PlusToken,
    AsteriskToken,
    AtToken,
    /// Any operator the type grammar never looks at (`%`, `||`, `===`, `/`, ...).
    OtherPunctuation,

    // =========================================================================
    // Identifiers
    // =========================================================================
    Identifier,
    PrivateIdentifier,

    // =========================================================================
    // Keywords
    // =========================================================================
    AbstractKeyword,
    AnyKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ClassKeyword,
    ConstKeyword,
    DeclareKeyword,
    DefaultKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FromKeyword,
    FunctionKeyword,
    ImplementsKeyword,
    ImportKeyword,
    InKeyword,
    InferKeyword,
    InterfaceKeyword,
    IsKeyword,
    KeyOfKeyword,
    LetKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    NewKeyword,
    NullKeyword,
    NumberKeyword,
    ObjectKeyword,
    OutKeyword,
    ReadonlyKeyword,
    StringKeyword,
    SymbolKeyword,
    ThisKeyword,
    TrueKeyword,
    TypeKeyword,
    TypeOfKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    VarKeyword,
    VoidKeyword,
}

impl SyntaxKind {
    /// Map identifier text to its keyword kind, if it is one.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "abstract" => SyntaxKind::AbstractKeyword,
            "any" => SyntaxKind::AnyKeyword,
            "as" => SyntaxKind::AsKeyword,
            "asserts" => SyntaxKind::AssertsKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "bigint" => SyntaxKind::BigIntKeyword,
            "boolean" => SyntaxKind::BooleanKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "declare" => SyntaxKind::DeclareKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "from" => SyntaxKind::FromKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "infer" => SyntaxKind::InferKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "is" => SyntaxKind::IsKeyword,
            "keyof" => SyntaxKind::KeyOfKeyword,
            "let" => SyntaxKind::LetKeyword,
            "module" => SyntaxKind::ModuleKeyword,
            "namespace" => SyntaxKind::NamespaceKeyword,
            "never" => SyntaxKind::NeverKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "number" => SyntaxKind::NumberKeyword,
            "object" => SyntaxKind::ObjectKeyword,
            "out" => SyntaxKind::OutKeyword,
            "readonly" => SyntaxKind::ReadonlyKeyword,
            "string" => SyntaxKind::StringKeyword,
            "symbol" => SyntaxKind::SymbolKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "undefined" => SyntaxKind::UndefinedKeyword,
            "unique" => SyntaxKind::UniqueKeyword,
            "unknown" => SyntaxKind::UnknownKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            _ => return None,
        };
        Some(kind)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AbstractKeyword as u16)
    }

    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::TemplateLiteral
        )
    }

    /// Keywords that can begin a statement even when they are contextual.
    pub fn is_declaration_start(self) -> bool {
        matches!(
            self,
            SyntaxKind::TypeKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::NamespaceKeyword
                | SyntaxKind::ModuleKeyword
        )
    }

    /// Human-readable token text for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Unknown => "unknown token",
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::NumericLiteral => "numeric literal",
            SyntaxKind::BigIntLiteral => "bigint literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::TemplateLiteral => "template literal",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::BarToken => "|",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AtToken => "@",
            SyntaxKind::OtherPunctuation => "operator",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::PrivateIdentifier => "private identifier",
            _ => "keyword",
        }
    }
}
