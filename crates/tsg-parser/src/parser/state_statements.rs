//! Parser state - statement and declaration parsing methods
//!
//! Only declarations a guard can be generated for are parsed in full. Every
//! other statement is skipped as `Statement::Other`, tracking bracket depth so
//! function bodies and namespaces are stepped over whole.

use tracing::trace;
use tsg_common::{Diagnostic, Span};
use tsg_scanner::SyntaxKind;

use super::state::{ParseResult, ParserState};
use crate::parser::node::{
    ClassDeclaration, EnumDeclaration, EnumMember, Identifier, ImportDeclaration,
    ImportSpecifier, InterfaceDeclaration, Modifiers, SourceFile, Statement,
    TypeAliasDeclaration, TypeReferenceNode,
};

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse a source file
    pub fn parse_source_file(&mut self) -> SourceFile {
        // Skip shebang (#!) if present at start of file
        self.scanner.scan_shebang_trivia();
        self.next_token();

        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let start_pos = self.token_pos();
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(diagnostic) => {
                    trace!(pos = start_pos, message = %diagnostic.message_text, "statement recovery");
                    self.parse_diagnostics.push(diagnostic);
                    self.recover_to_statement_boundary(start_pos);
                }
            }
        }

        // Merge scanner-level diagnostics (unterminated literals and comments).
        for diag in self.scanner.get_scanner_diagnostics() {
            let start = self.u32_from_usize(diag.pos);
            let end = self.u32_from_usize(diag.pos + diag.length);
            self.parse_diagnostics
                .push(Diagnostic::error(Span::new(start, end), diag.message));
        }
        self.parse_diagnostics.sort_by_key(|d| d.span.start);

        SourceFile {
            file_name: self.file_name.clone(),
            text: self.scanner.source_text_arc(),
            statements,
        }
    }

    /// Skip past a statement that failed to parse: up to a `;`, or a
    /// declaration keyword on a new line. Always consumes at least one token.
    fn recover_to_statement_boundary(&mut self, start_pos: u32) {
        if self.token_pos() == start_pos {
            self.next_token();
        }
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                return;
            }
            if self.has_preceding_line_break() && self.token().is_declaration_start() {
                return;
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let start = self.token_pos();
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_decorator()?;
        }
        let modifiers = self.parse_modifiers();

        match self.token() {
            SyntaxKind::TypeKeyword if self.look_ahead_is_type_alias_declaration() => self
                .parse_type_alias_declaration(start, modifiers)
                .map(Statement::TypeAlias),
            SyntaxKind::InterfaceKeyword if self.look_ahead_is(|p| p.is_identifier()) => self
                .parse_interface_declaration(start, modifiers)
                .map(Statement::Interface),
            SyntaxKind::EnumKeyword => self
                .parse_enum_declaration(start, modifiers)
                .map(Statement::Enum),
            SyntaxKind::ConstKeyword if self.look_ahead_is(|p| p.is_token(SyntaxKind::EnumKeyword)) => {
                self.next_token();
                self.parse_enum_declaration(start, modifiers).map(|mut decl| {
                    decl.is_const = true;
                    Statement::Enum(decl)
                })
            }
            SyntaxKind::ClassKeyword => self
                .parse_class_declaration(start, modifiers)
                .map(Statement::Class),
            SyntaxKind::AbstractKeyword if self.look_ahead_is_abstract_class() => {
                self.next_token();
                self.parse_class_declaration(start, modifiers).map(|mut decl| {
                    decl.is_abstract = true;
                    Statement::Class(decl)
                })
            }
            SyntaxKind::ImportKeyword
                if modifiers == Modifiers::default() && !self.look_ahead_is_import_call() =>
            {
                self.parse_import_declaration(start)
            }
            _ => self.skip_statement(start).map(Statement::Other),
        }
    }

    /// `export`, `export default`, and `declare` prefixes.
    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            match self.token() {
                SyntaxKind::ExportKeyword => modifiers.export = true,
                SyntaxKind::DefaultKeyword if modifiers.export => modifiers.default = true,
                SyntaxKind::DeclareKeyword
                    if self.look_ahead_is(|p| {
                        p.is_identifier_or_keyword() && !p.has_preceding_line_break()
                    }) =>
                {
                    modifiers.declare = true
                }
                _ => return modifiers,
            }
            self.next_token();
        }
    }

    /// `@expr`, `@a.b`, `@a(...)`
    fn skip_decorator(&mut self) -> ParseResult<()> {
        self.parse_expected(SyntaxKind::AtToken)?;
        self.parse_identifier_name()?;
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier_name()?;
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced()?;
        }
        Ok(())
    }

    /// Skip a statement outside the declaration subset.
    ///
    /// Ends after a `;`, after a closing `}` that brings the depth back to the
    /// statement's own level when the next token starts a new line, or before a
    /// declaration keyword on a new line.
    fn skip_statement(&mut self, start: u32) -> ParseResult<Span> {
        let mut consumed = false;
        loop {
            if consumed && self.has_preceding_line_break() && self.token().is_declaration_start() {
                break;
            }
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    break;
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced()?,
                kind @ (SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken) => {
                    return Err(self.error_at_current(format!("Unexpected '{}'.", kind.describe())));
                }
                _ => {
                    self.next_token();
                }
            }
            consumed = true;
        }
        Ok(self.span_from(start))
    }

    // =========================================================================
    // Look-ahead rules
    // =========================================================================

    /// `type Name ...` (not `type = ...` or `export type { ... }`)
    fn look_ahead_is_type_alias_declaration(&mut self) -> bool {
        self.look_ahead_is(|p| p.is_identifier() && !p.has_preceding_line_break())
    }

    fn look_ahead_is_abstract_class(&mut self) -> bool {
        self.look_ahead_is(|p| p.is_token(SyntaxKind::ClassKeyword) && !p.has_preceding_line_break())
    }

    /// `import(...)` and `import.meta` are expressions, not declarations.
    fn look_ahead_is_import_call(&mut self) -> bool {
        self.look_ahead_is(|p| {
            p.is_token(SyntaxKind::OpenParenToken) || p.is_token(SyntaxKind::DotToken)
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// `type Name<T> = Type;`
    fn parse_type_alias_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<TypeAliasDeclaration> {
        self.parse_expected(SyntaxKind::TypeKeyword)?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        self.parse_expected(SyntaxKind::EqualsToken)?;
        let type_node = self.parse_type()?;
        self.parse_semicolon();
        Ok(TypeAliasDeclaration {
            modifiers,
            name,
            type_parameters,
            type_node,
            span: self.span_from(start),
        })
    }

    /// `interface Name<T> extends A, B<T> { members }`
    fn parse_interface_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<InterfaceDeclaration> {
        self.parse_expected(SyntaxKind::InterfaceKeyword)?;
        let name = self.parse_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        let heritage = self.parse_interface_heritage()?;
        let members = self.parse_object_type_members()?;
        Ok(InterfaceDeclaration {
            modifiers,
            name,
            type_parameters,
            heritage,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_interface_heritage(&mut self) -> ParseResult<Vec<TypeReferenceNode>> {
        let mut heritage = Vec::new();
        if !self.parse_optional(SyntaxKind::ExtendsKeyword) {
            return Ok(heritage);
        }
        loop {
            heritage.push(self.parse_type_reference()?);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        Ok(heritage)
    }

    /// `enum Name { A, B = 1, "c" = "x" }`
    fn parse_enum_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<EnumDeclaration> {
        self.parse_expected(SyntaxKind::EnumKeyword)?;
        let name = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let member_start = self.token_pos();
            let member_name = self.parse_property_name()?;
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_initializer_text()?)
            } else {
                None
            };
            members.push(EnumMember {
                name: member_name,
                initializer,
                span: self.span_from(member_start),
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(EnumDeclaration {
            modifiers,
            is_const: false,
            name,
            members,
            span: self.span_from(start),
        })
    }

    /// Verbatim text of an expression ending at a `,` or `}` at the same depth.
    fn parse_initializer_text(&mut self) -> ParseResult<String> {
        let start = self.token_pos();
        loop {
            match self.token() {
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken => break,
                SyntaxKind::EndOfFileToken => return Err(self.error_expected("}")),
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => self.skip_balanced()?,
                _ => {
                    self.next_token();
                }
            }
        }
        if self.token_pos() == start {
            return Err(self.error_at_current("Expression expected."));
        }
        Ok(self.span_from(start).text(self.scanner.source_text()).to_string())
    }

    /// `class Name<T> extends Base implements I { ... }`; only the name is kept.
    fn parse_class_declaration(
        &mut self,
        start: u32,
        modifiers: Modifiers,
    ) -> ParseResult<ClassDeclaration> {
        self.parse_expected(SyntaxKind::ClassKeyword)?;
        let name = if self.is_identifier()
            && !self.is_token(SyntaxKind::ExtendsKeyword)
            && !self.is_token(SyntaxKind::ImplementsKeyword)
        {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        loop {
            match self.token() {
                SyntaxKind::OpenBraceToken => {
                    self.skip_balanced()?;
                    break;
                }
                SyntaxKind::LessThanToken => self.skip_angle_brackets()?,
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => self.skip_balanced()?,
                SyntaxKind::EndOfFileToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken => return Err(self.error_expected("{")),
                _ => {
                    self.next_token();
                }
            }
        }
        Ok(ClassDeclaration {
            modifiers,
            is_abstract: false,
            name,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// `import type? Default, { a as b, type c } from "mod";`,
    /// `import * as ns from "mod";` or `import "mod";`.
    ///
    /// `import x = require(...)` is skipped as `Statement::Other`.
    fn parse_import_declaration(&mut self, start: u32) -> ParseResult<Statement> {
        self.parse_expected(SyntaxKind::ImportKeyword)?;

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead_is(|p| {
                p.is_token(SyntaxKind::OpenBraceToken)
                    || p.is_token(SyntaxKind::AsteriskToken)
                    || (p.is_identifier() && p.token_text() != "from")
            });
        if is_type_only {
            self.next_token();
        }

        let mut decl = ImportDeclaration {
            is_type_only,
            default_binding: None,
            namespace_binding: None,
            named_bindings: Vec::new(),
            module_specifier: String::new(),
            span: Span::at(start),
        };

        if self.is_token(SyntaxKind::StringLiteral) {
            decl.module_specifier = self.scanner.token_value();
            self.next_token();
            self.skip_import_attributes()?;
            self.parse_semicolon();
            decl.span = self.span_from(start);
            return Ok(Statement::Import(decl));
        }

        if self.is_identifier() {
            decl.default_binding = Some(self.parse_identifier()?);
            if self.is_token(SyntaxKind::EqualsToken) {
                return self.skip_statement(start).map(Statement::Other);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                return self.finish_import(start, decl);
            }
        }

        if self.parse_optional(SyntaxKind::AsteriskToken) {
            self.parse_expected(SyntaxKind::AsKeyword)?;
            decl.namespace_binding = Some(self.parse_identifier()?);
        } else if self.is_token(SyntaxKind::OpenBraceToken) {
            decl.named_bindings = self.parse_import_specifiers()?;
        } else {
            return Err(self.error_expected("{"));
        }
        self.finish_import(start, decl)
    }

    fn finish_import(&mut self, start: u32, mut decl: ImportDeclaration) -> ParseResult<Statement> {
        self.parse_expected(SyntaxKind::FromKeyword)?;
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.error_expected("string literal"));
        }
        decl.module_specifier = self.scanner.token_value();
        self.next_token();
        self.skip_import_attributes()?;
        self.parse_semicolon();
        decl.span = self.span_from(start);
        Ok(Statement::Import(decl))
    }

    fn parse_import_specifiers(&mut self) -> ParseResult<Vec<ImportSpecifier>> {
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
                && self.look_ahead_is(|p| {
                    (p.is_identifier_or_keyword() || p.is_token(SyntaxKind::StringLiteral))
                        && !p.is_token(SyntaxKind::AsKeyword)
                });
            if is_type_only {
                self.next_token();
            }
            let first = self.parse_import_specifier_name()?;
            let specifier = if self.parse_optional(SyntaxKind::AsKeyword) {
                ImportSpecifier {
                    property_name: Some(first),
                    name: self.parse_identifier_name()?,
                    is_type_only,
                }
            } else {
                ImportSpecifier {
                    property_name: None,
                    name: first,
                    is_type_only,
                }
            };
            specifiers.push(specifier);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(specifiers)
    }

    /// Identifier, keyword, or string (`import { "a-b" as ab }`).
    fn parse_import_specifier_name(&mut self) -> ParseResult<Identifier> {
        if self.is_token(SyntaxKind::StringLiteral) {
            let identifier = Identifier::new(self.scanner.token_value(), self.token_span());
            self.next_token();
            return Ok(identifier);
        }
        self.parse_identifier_name()
    }

    /// `with { type: "json" }` / `assert { ... }`
    fn skip_import_attributes(&mut self) -> ParseResult<()> {
        let is_attributes = self.is_token(SyntaxKind::Identifier)
            && matches!(self.token_text(), "with" | "assert")
            && !self.has_preceding_line_break()
            && self.look_ahead_is(|p| p.is_token(SyntaxKind::OpenBraceToken));
        if is_attributes {
            self.next_token();
            self.skip_balanced()?;
        }
        Ok(())
    }
}
