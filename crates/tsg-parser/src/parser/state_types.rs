//! Parser state - type parsing methods

use tsg_scanner::SyntaxKind;

use super::state::{CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, ParseResult, ParserState};
use crate::parser::node::{
    ArrayTypeNode, CompositeTypeNode, ConditionalTypeNode, EntityName, FunctionTypeNode,
    Identifier, ImportTypeNode, IndexSignature, IndexedAccessTypeNode, InferTypeNode,
    KeywordKind, KeywordTypeNode, LiteralKind, LiteralTypeNode, MappedTypeNode,
    MethodSignature, PropertyName, PropertySignature, TemplateLiteralTypeNode, TupleElement,
    TupleTypeNode, TypeLiteralNode, TypeMember, TypeNode, TypeOperatorKind, TypeOperatorNode,
    TypeParameter, TypeQueryNode, TypeReferenceNode, WrappedTypeNode,
};

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeNode> {
        self.enter_recursion()?;
        let result = if self.is_start_of_function_or_constructor_type() {
            self.parse_function_or_constructor_type()
        } else {
            self.parse_conditional_type()
        };
        self.exit_recursion();
        result
    }

    /// `Check extends Extends ? True : False`, or just the check type.
    pub(crate) fn parse_conditional_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        let check_type = self.parse_union_type()?;
        if self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
            || !self.is_token(SyntaxKind::ExtendsKeyword)
            || self.has_preceding_line_break()
        {
            return Ok(check_type);
        }

        self.next_token();
        let extends_type = self.do_in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, true, |p| {
            p.parse_type()
        })?;
        self.parse_expected(SyntaxKind::QuestionToken)?;
        let true_type = self.do_in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, false, |p| {
            p.parse_type()
        })?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let false_type = self.do_in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, false, |p| {
            p.parse_type()
        })?;

        Ok(TypeNode::Conditional(ConditionalTypeNode {
            check_type: Box::new(check_type),
            extends_type: Box::new(extends_type),
            true_type: Box::new(true_type),
            false_type: Box::new(false_type),
            span: self.span_from(start),
        }))
    }

    pub(crate) fn parse_union_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        let has_leading = self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_union_constituent(has_leading)?;
        if !self.is_token(SyntaxKind::BarToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_union_constituent(true)?);
        }
        Ok(TypeNode::Union(CompositeTypeNode {
            types,
            span: self.span_from(start),
        }))
    }

    fn parse_union_constituent(&mut self, after_operator: bool) -> ParseResult<TypeNode> {
        if after_operator && self.is_start_of_function_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        self.parse_intersection_type()
    }

    pub(crate) fn parse_intersection_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        let has_leading = self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_intersection_constituent(has_leading)?;
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_intersection_constituent(true)?);
        }
        Ok(TypeNode::Intersection(CompositeTypeNode {
            types,
            span: self.span_from(start),
        }))
    }

    fn parse_intersection_constituent(&mut self, after_operator: bool) -> ParseResult<TypeNode> {
        if after_operator && self.is_start_of_function_or_constructor_type() {
            return self.parse_function_or_constructor_type();
        }
        self.parse_type_operator_or_higher()
    }

    /// `keyof T`, `unique symbol`, `readonly T[]`, `infer U`
    fn parse_type_operator_or_higher(&mut self) -> ParseResult<TypeNode> {
        let operator = match self.token() {
            SyntaxKind::KeyOfKeyword => TypeOperatorKind::KeyOf,
            SyntaxKind::UniqueKeyword => TypeOperatorKind::Unique,
            SyntaxKind::ReadonlyKeyword => TypeOperatorKind::Readonly,
            SyntaxKind::InferKeyword => return self.parse_infer_type(),
            _ => {
                return self.do_in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, false, |p| {
                    p.parse_primary_type()
                });
            }
        };
        let start = self.token_pos();
        self.next_token();
        self.enter_recursion()?;
        let inner = self.parse_type_operator_or_higher();
        self.exit_recursion();
        Ok(TypeNode::TypeOperator(TypeOperatorNode {
            operator,
            type_node: Box::new(inner?),
            span: self.span_from(start),
        }))
    }

    /// `infer U` or `infer U extends C`; the constraint is parsed and dropped.
    pub(crate) fn parse_infer_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::InferKeyword)?;
        let name = self.parse_identifier()?;
        if self.is_token(SyntaxKind::ExtendsKeyword) {
            let disallow = self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES);
            // `infer U extends X ? A : B` is a conditional on U, not a constraint.
            self.try_parse(|p| {
                p.next_token();
                let constraint = p
                    .do_in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, true, |p| p.parse_type())
                    .ok()?;
                (disallow || !p.is_token(SyntaxKind::QuestionToken)).then_some(constraint)
            });
        }
        Ok(TypeNode::Infer(InferTypeNode {
            name,
            span: self.span_from(start),
        }))
    }

    /// A non-operator type followed by any `[]` / `[K]` suffixes on the same line.
    pub(crate) fn parse_primary_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        let mut type_node = self.parse_primary_type_base()?;
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                type_node = TypeNode::Array(ArrayTypeNode {
                    element_type: Box::new(type_node),
                    span: self.span_from(start),
                });
            } else {
                let index_type = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                type_node = TypeNode::IndexedAccess(IndexedAccessTypeNode {
                    object_type: Box::new(type_node),
                    index_type: Box::new(index_type),
                    span: self.span_from(start),
                });
            }
        }
        Ok(type_node)
    }

    fn parse_primary_type_base(&mut self) -> ParseResult<TypeNode> {
        let keyword = match self.token() {
            SyntaxKind::AnyKeyword => Some(KeywordKind::Any),
            SyntaxKind::UnknownKeyword => Some(KeywordKind::Unknown),
            SyntaxKind::NeverKeyword => Some(KeywordKind::Never),
            SyntaxKind::StringKeyword => Some(KeywordKind::String),
            SyntaxKind::NumberKeyword => Some(KeywordKind::Number),
            SyntaxKind::BooleanKeyword => Some(KeywordKind::Boolean),
            SyntaxKind::BigIntKeyword => Some(KeywordKind::BigInt),
            SyntaxKind::SymbolKeyword => Some(KeywordKind::Symbol),
            SyntaxKind::ObjectKeyword => Some(KeywordKind::Object),
            SyntaxKind::UndefinedKeyword => Some(KeywordKind::Undefined),
            SyntaxKind::VoidKeyword => Some(KeywordKind::Void),
            SyntaxKind::NullKeyword => Some(KeywordKind::Null),
            _ => None,
        };
        if let Some(keyword) = keyword {
            // `string.Foo` would be a qualified name; keep it a reference.
            if !self.look_ahead_is(|p| p.is_token(SyntaxKind::DotToken)) {
                let span = self.token_span();
                self.next_token();
                return Ok(TypeNode::Keyword(KeywordTypeNode { keyword, span }));
            }
        }

        match self.token() {
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_literal_type(),
            SyntaxKind::MinusToken => self.parse_prefix_unary_literal_type(),
            SyntaxKind::TemplateLiteral => {
                let node = TemplateLiteralTypeNode {
                    text: self.token_text().to_string(),
                    span: self.token_span(),
                };
                self.next_token();
                Ok(TypeNode::TemplateLiteral(node))
            }
            SyntaxKind::ThisKeyword => {
                let span = self.token_span();
                self.next_token();
                Ok(TypeNode::This(span))
            }
            SyntaxKind::TypeOfKeyword => {
                if self.look_ahead_is(|p| p.is_token(SyntaxKind::ImportKeyword)) {
                    self.parse_import_type()
                } else {
                    self.parse_typeof_type()
                }
            }
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::OpenBraceToken => self.parse_object_or_mapped_type(),
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                let start = self.token_pos();
                self.next_token();
                let inner = self.parse_type()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(TypeNode::Parenthesized(WrappedTypeNode {
                    type_node: Box::new(inner),
                    span: self.span_from(start),
                }))
            }
            _ if self.is_identifier_or_keyword() => {
                self.parse_type_reference().map(TypeNode::TypeReference)
            }
            _ => Err(self.error_at_current("Type expected.")),
        }
    }

    // =========================================================================
    // Literals
    // =========================================================================

    pub(crate) fn parse_literal_type(&mut self) -> ParseResult<TypeNode> {
        let literal = match self.token() {
            SyntaxKind::StringLiteral => LiteralKind::String,
            SyntaxKind::NumericLiteral => LiteralKind::Numeric,
            SyntaxKind::BigIntLiteral => LiteralKind::BigInt,
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => LiteralKind::Boolean,
            _ => return Err(self.error_at_current("Literal expected.")),
        };
        let node = LiteralTypeNode {
            literal,
            text: self.token_text().to_string(),
            span: self.token_span(),
        };
        self.next_token();
        Ok(TypeNode::Literal(node))
    }

    /// `-1`, `-0x10`, `-5n`
    pub(crate) fn parse_prefix_unary_literal_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::MinusToken)?;
        let literal = match self.token() {
            SyntaxKind::NumericLiteral => LiteralKind::Numeric,
            SyntaxKind::BigIntLiteral => LiteralKind::BigInt,
            _ => return Err(self.error_at_current("Numeric literal expected.")),
        };
        let text = format!("-{}", self.token_text());
        self.next_token();
        Ok(TypeNode::Literal(LiteralTypeNode {
            literal,
            text,
            span: self.span_from(start),
        }))
    }

    // =========================================================================
    // References and queries
    // =========================================================================

    /// `Name`, `ns.Name`, `Name<A, B>`
    pub(crate) fn parse_type_reference(&mut self) -> ParseResult<TypeReferenceNode> {
        let start = self.token_pos();
        let type_name = self.parse_entity_name()?;
        let type_arguments = self.parse_type_arguments_on_same_line()?;
        Ok(TypeReferenceNode {
            type_name,
            type_arguments,
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_entity_name(&mut self) -> ParseResult<EntityName> {
        let start = self.token_pos();
        let mut segments = vec![self.parse_identifier_name()?];
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            segments.push(self.parse_identifier_name()?);
        }
        Ok(EntityName {
            segments,
            span: self.span_from(start),
        })
    }

    fn parse_type_arguments_on_same_line(&mut self) -> ParseResult<Vec<TypeNode>> {
        if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            Ok(Vec::new())
        }
    }

    /// `<A, B>`
    pub(crate) fn parse_type_arguments(&mut self) -> ParseResult<Vec<TypeNode>> {
        self.parse_expected(SyntaxKind::LessThanToken)?;
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken)?;
        Ok(arguments)
    }

    /// `typeof value`, `typeof ns.value<T>`
    pub(crate) fn parse_typeof_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword)?;
        let expr_name = self.parse_entity_name()?;
        let type_arguments = self.parse_type_arguments_on_same_line()?;
        Ok(TypeNode::TypeQuery(TypeQueryNode {
            expr_name,
            type_arguments,
            span: self.span_from(start),
        }))
    }

    /// `import("mod").Name<T>` / `typeof import("mod")`, kept as text.
    pub(crate) fn parse_import_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::TypeOfKeyword);
        self.parse_expected(SyntaxKind::ImportKeyword)?;
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return Err(self.error_expected("("));
        }
        self.skip_balanced()?;
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier_name()?;
        }
        self.parse_type_arguments_on_same_line()?;
        let span = self.span_from(start);
        Ok(TypeNode::ImportType(ImportTypeNode {
            text: span.text(self.scanner.source_text()).to_string(),
            span,
        }))
    }

    // =========================================================================
    // Function and constructor types
    // =========================================================================

    fn is_start_of_function_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => {
                self.look_ahead_is(|p| p.is_token(SyntaxKind::NewKeyword))
            }
            SyntaxKind::OpenParenToken => self.look_ahead(|p| p.is_unambiguously_start_of_function_type()),
            _ => false,
        }
    }

    /// Called with the cursor on `(`.
    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if self.is_token(SyntaxKind::CloseParenToken) || self.is_token(SyntaxKind::DotDotDotToken) {
            return true;
        }
        if !self.skip_parameter_start() {
            return false;
        }
        match self.token() {
            SyntaxKind::ColonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::EqualsToken => true,
            SyntaxKind::CloseParenToken => {
                self.next_token();
                self.is_token(SyntaxKind::EqualsGreaterThanToken)
            }
            _ => false,
        }
    }

    /// Skip a parameter name or binding pattern.
    fn skip_parameter_start(&mut self) -> bool {
        if self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            return true;
        }
        if self.is_token(SyntaxKind::OpenBracketToken) || self.is_token(SyntaxKind::OpenBraceToken) {
            return self.skip_balanced().is_ok();
        }
        false
    }

    /// `(a: A) => R`, `<T>(a: T) => R`, `new (...) => R`, `abstract new () => R`.
    /// Parameters and return type are validated but not kept.
    fn parse_function_or_constructor_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_optional(SyntaxKind::AbstractKeyword);
        let is_constructor = self.parse_optional(SyntaxKind::NewKeyword);
        self.parse_type_parameters()?;
        self.skip_parameter_list()?;
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;
        self.parse_return_type()?;
        Ok(TypeNode::Function(FunctionTypeNode {
            is_constructor,
            span: self.span_from(start),
        }))
    }

    fn skip_parameter_list(&mut self) -> ParseResult<()> {
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return Err(self.error_expected("("));
        }
        self.skip_balanced()
    }

    /// A return type, allowing `x is T`, `asserts x`, and `asserts x is T`.
    pub(crate) fn parse_return_type(&mut self) -> ParseResult<()> {
        if self.is_asserts_type_predicate_start() {
            self.next_token();
            self.next_token();
            if self.parse_optional(SyntaxKind::IsKeyword) {
                self.parse_type()?;
            }
            return Ok(());
        }
        let is_predicate = (self.is_identifier() || self.is_token(SyntaxKind::ThisKeyword))
            && self.look_ahead_is(|p| {
                p.is_token(SyntaxKind::IsKeyword) && !p.has_preceding_line_break()
            });
        if is_predicate {
            self.next_token();
            self.next_token();
        }
        self.parse_type()?;
        Ok(())
    }

    fn is_asserts_type_predicate_start(&mut self) -> bool {
        self.is_token(SyntaxKind::AssertsKeyword)
            && self.look_ahead_is(|p| {
                (p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword))
                    && !p.has_preceding_line_break()
            })
    }

    // =========================================================================
    // Type parameters
    // =========================================================================

    /// `<in out T extends C = D, ...>`, or nothing.
    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<Vec<TypeParameter>> {
        let mut parameters = Vec::new();
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return Ok(parameters);
        }
        loop {
            while matches!(
                self.token(),
                SyntaxKind::InKeyword | SyntaxKind::OutKeyword | SyntaxKind::ConstKeyword
            ) && self.look_ahead_is(|p| p.is_identifier())
            {
                self.next_token();
            }
            let name = self.parse_identifier()?;
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_type()?)
            } else {
                None
            };
            parameters.push(TypeParameter {
                name,
                constraint,
                default,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) || self.is_token(SyntaxKind::GreaterThanToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken)?;
        Ok(parameters)
    }

    // =========================================================================
    // Tuples
    // =========================================================================

    pub(crate) fn parse_tuple_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            elements.push(self.parse_tuple_element_type()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(TypeNode::Tuple(TupleTypeNode {
            elements,
            span: self.span_from(start),
        }))
    }

    /// `T`, `T?`, `...T`, `name: T`, `name?: T`, `...name: T`
    pub(crate) fn parse_tuple_element_type(&mut self) -> ParseResult<TupleElement> {
        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
        if self.look_ahead_is_named_tuple_member() {
            return self.parse_named_tuple_member(rest);
        }
        let type_node = self.parse_type()?;
        let optional = !rest && self.parse_optional(SyntaxKind::QuestionToken);
        Ok(TupleElement {
            name: None,
            type_node,
            optional,
            rest,
        })
    }

    fn look_ahead_is_named_tuple_member(&mut self) -> bool {
        self.is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                if p.parse_optional(SyntaxKind::QuestionToken) {
                    return p.is_token(SyntaxKind::ColonToken);
                }
                p.is_token(SyntaxKind::ColonToken)
            })
    }

    pub(crate) fn parse_named_tuple_member(&mut self, rest: bool) -> ParseResult<TupleElement> {
        let name = self.parse_identifier_name()?;
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        self.parse_expected(SyntaxKind::ColonToken)?;
        let type_node = self.parse_type()?;
        Ok(TupleElement {
            name: Some(name),
            type_node,
            optional,
            rest,
        })
    }

    // =========================================================================
    // Object and mapped types
    // =========================================================================

    pub(crate) fn parse_object_or_mapped_type(&mut self) -> ParseResult<TypeNode> {
        if self.look_ahead_is_mapped_type() {
            return self.parse_mapped_type();
        }
        let start = self.token_pos();
        let members = self.parse_object_type_members()?;
        Ok(TypeNode::TypeLiteral(TypeLiteralNode {
            members,
            span: self.span_from(start),
        }))
    }

    /// `{ readonly [K in ...` / `{ +readonly [K in ...` / `{ [K in ...`
    pub(crate) fn look_ahead_is_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::PlusToken) || p.is_token(SyntaxKind::MinusToken) {
                p.next_token();
                if !p.is_token(SyntaxKind::ReadonlyKeyword) {
                    return false;
                }
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            if !p.parse_optional(SyntaxKind::OpenBracketToken) || !p.is_identifier() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::InKeyword)
        })
    }

    fn parse_mapped_type(&mut self) -> ParseResult<TypeNode> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            self.next_token();
        }
        self.parse_optional(SyntaxKind::ReadonlyKeyword);
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let type_parameter = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::InKeyword)?;
        let constraint = self.parse_type()?;
        if self.parse_optional(SyntaxKind::AsKeyword) {
            self.parse_type()?;
        }
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        if self.is_token(SyntaxKind::PlusToken) || self.is_token(SyntaxKind::MinusToken) {
            self.next_token();
            self.parse_expected(SyntaxKind::QuestionToken)?;
        } else {
            self.parse_optional(SyntaxKind::QuestionToken);
        }
        let type_node = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };
        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            self.parse_optional(SyntaxKind::CommaToken);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(TypeNode::Mapped(MappedTypeNode {
            type_parameter,
            constraint: Box::new(constraint),
            type_node,
            span: self.span_from(start),
        }))
    }

    /// `{ member; member, ... }` shared by type literals and interfaces.
    pub(crate) fn parse_object_type_members(&mut self) -> ParseResult<Vec<TypeMember>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.error_expected("}"));
            }
            if let Some(member) = self.parse_type_member()? {
                members.push(member);
            }
            self.parse_type_member_separator()?;
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(members)
    }

    fn parse_type_member_separator(&mut self) -> ParseResult<()> {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.parse_optional(SyntaxKind::CommaToken) {
            return Ok(());
        }
        if self.is_token(SyntaxKind::CloseBraceToken) || self.has_preceding_line_break() {
            return Ok(());
        }
        Err(self.error_expected(";"))
    }

    /// One member of an object type. Setters yield `None`.
    fn parse_type_member(&mut self) -> ParseResult<Option<TypeMember>> {
        let start = self.token_pos();

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            self.skip_signature()?;
            return Ok(Some(TypeMember::CallSignature(self.span_from(start))));
        }
        if self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead_is(|p| {
                p.is_token(SyntaxKind::OpenParenToken) || p.is_token(SyntaxKind::LessThanToken)
            })
        {
            self.next_token();
            self.skip_signature()?;
            return Ok(Some(TypeMember::ConstructSignature(self.span_from(start))));
        }

        let readonly =
            self.is_token(SyntaxKind::ReadonlyKeyword) && self.look_ahead_is_property_name_after_keyword();
        if readonly {
            self.next_token();
        }

        if self.is_token(SyntaxKind::OpenBracketToken) && self.look_ahead_is_index_signature() {
            return self.parse_index_signature(start, readonly).map(|sig| Some(TypeMember::Index(sig)));
        }

        if self.is_token(SyntaxKind::Identifier)
            && matches!(self.token_text(), "get" | "set")
            && self.look_ahead_is_property_name_after_keyword()
        {
            let is_getter = self.token_text() == "get";
            self.next_token();
            let name = self.parse_property_name()?;
            self.parse_type_parameters()?;
            self.skip_parameter_list()?;
            let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
                Some(self.parse_type()?)
            } else {
                None
            };
            if !is_getter {
                return Ok(None);
            }
            return Ok(Some(TypeMember::Property(PropertySignature {
                name,
                question_token: false,
                readonly: true,
                type_annotation,
                span: self.span_from(start),
            })));
        }

        let name = self.parse_property_name()?;
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            self.skip_signature()?;
            return Ok(Some(TypeMember::Method(MethodSignature {
                name,
                question_token,
                span: self.span_from(start),
            })));
        }

        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(Some(TypeMember::Property(PropertySignature {
            name,
            question_token,
            readonly,
            type_annotation,
            span: self.span_from(start),
        })))
    }

    /// `<T>(params): R` of a call, construct, or method signature.
    fn skip_signature(&mut self) -> ParseResult<()> {
        self.parse_type_parameters()?;
        self.skip_parameter_list()?;
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_return_type()?;
        }
        Ok(())
    }

    /// After `readonly`/`get`/`set`: does a property name follow on the same line?
    pub(crate) fn look_ahead_is_property_name_after_keyword(&mut self) -> bool {
        self.look_ahead_is(|p| {
            !p.has_preceding_line_break()
                && (p.is_identifier_or_keyword()
                    || matches!(
                        p.token(),
                        SyntaxKind::StringLiteral
                            | SyntaxKind::NumericLiteral
                            | SyntaxKind::OpenBracketToken
                            | SyntaxKind::PrivateIdentifier
                    ))
        })
    }

    /// `[key: K]: T` rather than a computed property name `[expr]`.
    fn look_ahead_is_index_signature(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken) || p.is_token(SyntaxKind::CommaToken)
        })
    }

    fn parse_index_signature(&mut self, start: u32, readonly: bool) -> ParseResult<IndexSignature> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let parameter_name = self.parse_identifier_name()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let parameter_type = self.parse_type()?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(IndexSignature {
            readonly,
            parameter_name,
            parameter_type,
            type_annotation,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Property names
    // =========================================================================

    pub(crate) fn parse_property_name(&mut self) -> ParseResult<PropertyName> {
        let span = self.token_span();
        let name = match self.token() {
            SyntaxKind::StringLiteral => PropertyName::StringLiteral {
                text: self.token_text().to_string(),
                value: self.scanner.token_value(),
                span,
            },
            SyntaxKind::NumericLiteral => PropertyName::NumericLiteral {
                text: self.token_text().to_string(),
                span,
            },
            SyntaxKind::PrivateIdentifier => {
                PropertyName::PrivateIdentifier(Identifier::new(self.token_text(), span))
            }
            SyntaxKind::OpenBracketToken => return self.parse_computed_property_name(),
            _ if self.is_identifier_or_keyword() => {
                PropertyName::Identifier(Identifier::new(self.scanner.token_value(), span))
            }
            _ => return Err(self.error_at_current("Property or signature expected.")),
        };
        self.next_token();
        Ok(name)
    }

    /// `["literal"]`, `[0]`, or `[expr]`.
    fn parse_computed_property_name(&mut self) -> ParseResult<PropertyName> {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;

        let is_single_literal = matches!(
            self.token(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
        ) && self.look_ahead_is(|p| p.is_token(SyntaxKind::CloseBracketToken));
        if is_single_literal {
            let literal = self.token();
            let text = self.token_text().to_string();
            let value = self.scanner.token_value();
            self.next_token();
            self.parse_expected(SyntaxKind::CloseBracketToken)?;
            let span = self.span_from(start);
            return Ok(match literal {
                SyntaxKind::StringLiteral => PropertyName::StringLiteral { text, value, span },
                _ => PropertyName::NumericLiteral { text, span },
            });
        }

        let expression_start = self.token_pos();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            match self.token() {
                SyntaxKind::EndOfFileToken => return Err(self.error_expected("]")),
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced()?,
                _ => {
                    self.next_token();
                }
            }
        }
        if self.token_pos() == expression_start {
            return Err(self.error_at_current("Expression expected."));
        }
        let expression = self
            .span_from(expression_start)
            .text(self.scanner.source_text())
            .to_string();
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(PropertyName::Computed {
            expression,
            span: self.span_from(start),
        })
    }
}
