//! Syntax tree for the declaration subset of TypeScript.
//!
//! Every type-syntax category the guard compiler dispatches on is one variant
//! of the closed `TypeNode` enum. Literal text is kept verbatim so that it can
//! be re-emitted unchanged.

use std::sync::Arc;

use serde::Serialize;
use tsg_common::Span;

// =============================================================================
// Source file and statements
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    pub statements: Vec<Statement>,
}

impl SourceFile {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Verbatim source text covered by `span`.
    pub fn text_of(&self, span: Span) -> &str {
        span.text(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    TypeAlias(TypeAliasDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Class(ClassDeclaration),
    Import(ImportDeclaration),
    /// Any statement outside the declaration subset; skipped by the parser.
    Other(Span),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::TypeAlias(decl) => decl.span,
            Statement::Interface(decl) => decl.span,
            Statement::Enum(decl) => decl.span,
            Statement::Class(decl) => decl.span,
            Statement::Import(decl) => decl.span,
            Statement::Other(span) => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub export: bool,
    pub default: bool,
    pub declare: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub text: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Identifier {
            text: text.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParameter {
    pub name: Identifier,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAliasDeclaration {
    pub modifiers: Modifiers,
    pub name: Identifier,
    pub type_parameters: Vec<TypeParameter>,
    pub type_node: TypeNode,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDeclaration {
    pub modifiers: Modifiers,
    pub name: Identifier,
    pub type_parameters: Vec<TypeParameter>,
    /// `extends A, B<T>` clauses, as type references.
    pub heritage: Vec<TypeReferenceNode>,
    pub members: Vec<TypeMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    pub name: PropertyName,
    /// Verbatim initializer expression text, if any.
    pub initializer: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDeclaration {
    pub modifiers: Modifiers,
    pub is_const: bool,
    pub name: Identifier,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub modifiers: Modifiers,
    pub is_abstract: bool,
    /// `None` for `export default class { ... }`.
    pub name: Option<Identifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpecifier {
    /// Name exported by the module when renamed (`a` in `a as b`).
    pub property_name: Option<Identifier>,
    /// Local binding name.
    pub name: Identifier,
    pub is_type_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration {
    pub is_type_only: bool,
    pub default_binding: Option<Identifier>,
    pub namespace_binding: Option<Identifier>,
    pub named_bindings: Vec<ImportSpecifier>,
    /// Module specifier without quotes; empty for malformed imports.
    pub module_specifier: String,
    pub span: Span,
}

impl ImportDeclaration {
    /// Local names introduced by default and named bindings.
    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.default_binding
            .iter()
            .map(|id| id.text.as_str())
            .chain(self.named_bindings.iter().map(|spec| spec.name.text.as_str()))
    }
}

// =============================================================================
// Type members
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum PropertyName {
    Identifier(Identifier),
    /// `"dash-value"` or `["dash-value"]`; `text` keeps the quotes.
    StringLiteral { text: String, value: String, span: Span },
    /// `0` or `[0]`.
    NumericLiteral { text: String, span: Span },
    /// `[expr]` for any other expression, e.g. `[Symbol.iterator]`.
    Computed { expression: String, span: Span },
    /// `#name`; never valid on a type member.
    PrivateIdentifier(Identifier),
}

impl PropertyName {
    pub fn span(&self) -> Span {
        match self {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => id.span,
            PropertyName::StringLiteral { span, .. }
            | PropertyName::NumericLiteral { span, .. }
            | PropertyName::Computed { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySignature {
    pub name: PropertyName,
    pub question_token: bool,
    pub readonly: bool,
    pub type_annotation: Option<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSignature {
    pub name: PropertyName,
    pub question_token: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSignature {
    pub readonly: bool,
    pub parameter_name: Identifier,
    pub parameter_type: TypeNode,
    pub type_annotation: Option<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeMember {
    Property(PropertySignature),
    Method(MethodSignature),
    Index(IndexSignature),
    CallSignature(Span),
    ConstructSignature(Span),
}

impl TypeMember {
    pub fn span(&self) -> Span {
        match self {
            TypeMember::Property(prop) => prop.span,
            TypeMember::Method(method) => method.span,
            TypeMember::Index(index) => index.span,
            TypeMember::CallSignature(span) | TypeMember::ConstructSignature(span) => *span,
        }
    }
}

// =============================================================================
// Type nodes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeywordKind {
    Any,
    Unknown,
    Never,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
}

impl KeywordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordKind::Any => "any",
            KeywordKind::Unknown => "unknown",
            KeywordKind::Never => "never",
            KeywordKind::String => "string",
            KeywordKind::Number => "number",
            KeywordKind::Boolean => "boolean",
            KeywordKind::BigInt => "bigint",
            KeywordKind::Symbol => "symbol",
            KeywordKind::Object => "object",
            KeywordKind::Void => "void",
            KeywordKind::Undefined => "undefined",
            KeywordKind::Null => "null",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    String,
    Numeric,
    BigInt,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeOperatorKind {
    Readonly,
    KeyOf,
    Unique,
}

/// A possibly qualified name: `Foo`, `ns.Foo`, `Enum.Member`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityName {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl EntityName {
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                text.push('.');
            }
            text.push_str(&segment.text);
        }
        text
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }

    /// Leftmost segment (`ns` in `ns.Foo`).
    pub fn first(&self) -> &str {
        self.segments.first().map(|s| s.text.as_str()).unwrap_or("")
    }

    /// Rightmost segment (`Foo` in `ns.Foo`).
    pub fn last(&self) -> &str {
        self.segments.last().map(|s| s.text.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordTypeNode {
    pub keyword: KeywordKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralTypeNode {
    pub literal: LiteralKind,
    /// Verbatim source text, including quotes and a leading `-`.
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteralTypeNode {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeTypeNode {
    pub types: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayTypeNode {
    pub element_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleElement {
    pub name: Option<Identifier>,
    pub type_node: TypeNode,
    /// `T?` or `name?: T`
    pub optional: bool,
    /// `...T[]` or `...name: T[]`
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TupleTypeNode {
    pub elements: Vec<TupleElement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedTypeNode {
    pub type_node: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeOperatorNode {
    pub operator: TypeOperatorKind,
    pub type_node: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeLiteralNode {
    pub members: Vec<TypeMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeReferenceNode {
    pub type_name: EntityName,
    pub type_arguments: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeQueryNode {
    pub expr_name: EntityName,
    pub type_arguments: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionTypeNode {
    pub is_constructor: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedAccessTypeNode {
    pub object_type: Box<TypeNode>,
    pub index_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalTypeNode {
    pub check_type: Box<TypeNode>,
    pub extends_type: Box<TypeNode>,
    pub true_type: Box<TypeNode>,
    pub false_type: Box<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedTypeNode {
    pub type_parameter: Identifier,
    pub constraint: Box<TypeNode>,
    pub type_node: Option<Box<TypeNode>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferTypeNode {
    pub name: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportTypeNode {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeNode {
    Keyword(KeywordTypeNode),
    Literal(LiteralTypeNode),
    TemplateLiteral(TemplateLiteralTypeNode),
    Union(CompositeTypeNode),
    Intersection(CompositeTypeNode),
    Array(ArrayTypeNode),
    Tuple(TupleTypeNode),
    Parenthesized(WrappedTypeNode),
    TypeOperator(TypeOperatorNode),
    TypeLiteral(TypeLiteralNode),
    TypeReference(TypeReferenceNode),
    TypeQuery(TypeQueryNode),
    Function(FunctionTypeNode),
    IndexedAccess(IndexedAccessTypeNode),
    Conditional(ConditionalTypeNode),
    Mapped(MappedTypeNode),
    Infer(InferTypeNode),
    This(Span),
    ImportType(ImportTypeNode),
}

impl TypeNode {
    pub fn span(&self) -> Span {
        match self {
            TypeNode::Keyword(node) => node.span,
            TypeNode::Literal(node) => node.span,
            TypeNode::TemplateLiteral(node) => node.span,
            TypeNode::Union(node) | TypeNode::Intersection(node) => node.span,
            TypeNode::Array(node) => node.span,
            TypeNode::Tuple(node) => node.span,
            TypeNode::Parenthesized(node) => node.span,
            TypeNode::TypeOperator(node) => node.span,
            TypeNode::TypeLiteral(node) => node.span,
            TypeNode::TypeReference(node) => node.span,
            TypeNode::TypeQuery(node) => node.span,
            TypeNode::Function(node) => node.span,
            TypeNode::IndexedAccess(node) => node.span,
            TypeNode::Conditional(node) => node.span,
            TypeNode::Mapped(node) => node.span,
            TypeNode::Infer(node) => node.span,
            TypeNode::This(span) => *span,
            TypeNode::ImportType(node) => node.span,
        }
    }

    /// TypeScript's name for the syntax kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeNode::Keyword(_) => "KeywordType",
            TypeNode::Literal(_) => "LiteralType",
            TypeNode::TemplateLiteral(_) => "TemplateLiteralType",
            TypeNode::Union(_) => "UnionType",
            TypeNode::Intersection(_) => "IntersectionType",
            TypeNode::Array(_) => "ArrayType",
            TypeNode::Tuple(_) => "TupleType",
            TypeNode::Parenthesized(_) => "ParenthesizedType",
            TypeNode::TypeOperator(op) => match op.operator {
                TypeOperatorKind::Readonly => "ReadonlyTypeOperator",
                TypeOperatorKind::KeyOf => "KeyOfTypeOperator",
                TypeOperatorKind::Unique => "UniqueTypeOperator",
            },
            TypeNode::TypeLiteral(_) => "TypeLiteral",
            TypeNode::TypeReference(_) => "TypeReference",
            TypeNode::TypeQuery(_) => "TypeQuery",
            TypeNode::Function(f) if f.is_constructor => "ConstructorType",
            TypeNode::Function(_) => "FunctionType",
            TypeNode::IndexedAccess(_) => "IndexedAccessType",
            TypeNode::Conditional(_) => "ConditionalType",
            TypeNode::Mapped(_) => "MappedType",
            TypeNode::Infer(_) => "InferType",
            TypeNode::This(_) => "ThisType",
            TypeNode::ImportType(_) => "ImportType",
        }
    }
}
