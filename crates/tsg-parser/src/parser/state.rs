//! Parser state - token cursor, look-ahead, and shared helpers

use tsg_common::diagnostics::format_message;
use tsg_common::limits::MAX_PARSER_RECURSION_DEPTH;
use tsg_common::{Diagnostic, Span};
use tsg_scanner::{ScannerState, SyntaxKind};

use crate::parser::node::Identifier;

pub(crate) type ParseResult<T> = Result<T, Diagnostic>;

/// When set, `T extends U ? X : Y` is not parsed (inside an `extends` clause
/// of a conditional type, or an `infer X extends C` constraint).
pub(crate) const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 1 << 0;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) current_token: SyntaxKind,
    pub(crate) file_name: String,
    pub(crate) context_flags: u32,
    pub(crate) parse_diagnostics: Vec<Diagnostic>,
    pub(crate) recursion_depth: u32,
    /// End offset of the last consumed token, for node spans.
    pub(crate) last_token_end: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> Self {
        ParserState {
            scanner: ScannerState::new(source_text),
            current_token: SyntaxKind::Unknown,
            file_name,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
            last_token_end: 0,
        }
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.parse_diagnostics)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_token_end = self.u32_from_usize(self.scanner.token_end());
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.u32_from_usize(self.scanner.token_pos())
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.u32_from_usize(self.scanner.token_end())
    }

    pub(crate) fn token_span(&self) -> Span {
        Span::new(self.token_pos(), self.token_end())
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_token_end.max(start))
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn u32_from_usize(&self, value: usize) -> u32 {
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// Consume the token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with "'x' expected."
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> ParseResult<Span> {
        if self.is_token(kind) {
            let span = self.token_span();
            self.next_token();
            Ok(span)
        } else {
            Err(self.error_expected(kind.describe()))
        }
    }

    /// Consume an optional `;` (automatic semicolon insertion is permissive here).
    pub(crate) fn parse_semicolon(&mut self) {
        self.parse_optional(SyntaxKind::SemicolonToken);
    }

    /// Run `f` and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let last_end = self.last_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.last_token_end = last_end;
        result
    }

    /// Run `f`; rewind the scanner if it returns `None`.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let last_end = self.last_token_end;
        let result = f(self);
        if result.is_none() {
            self.scanner.restore_state(snapshot);
            self.current_token = current;
            self.last_token_end = last_end;
        }
        result
    }

    /// Advance one token and report whether it satisfies `pred`.
    pub(crate) fn look_ahead_is(&mut self, pred: impl FnOnce(&Self) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            pred(p)
        })
    }

    /// Run `f` with `flag` set (or cleared) in the context flags.
    pub(crate) fn do_in_context<T>(
        &mut self,
        flag: u32,
        enabled: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        if enabled {
            self.context_flags |= flag;
        } else {
            self.context_flags &= !flag;
        }
        let result = f(self);
        self.context_flags = saved;
        result
    }

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error_at_current(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::error(self.token_span(), message)
    }

    pub(crate) fn error_expected(&self, what: &str) -> Diagnostic {
        let found = if self.is_token(SyntaxKind::EndOfFileToken) {
            "end of file".to_string()
        } else {
            self.scanner.token_text().to_string()
        };
        self.error_at_current(format_message("'{0}' expected, found '{1}'.", &[what, &found]))
    }

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_PARSER_RECURSION_DEPTH {
            return Err(self.error_at_current("Type nesting is too deep."));
        }
        Ok(())
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Identifier or a contextual keyword usable as a binding/type name.
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::ClassKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ExtendsKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::InKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::VoidKeyword => false,
            kind => kind.is_keyword(),
        }
    }

    #[inline]
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.token().is_identifier_or_keyword()
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        if !self.is_identifier() {
            return Err(self.error_expected("identifier"));
        }
        Ok(self.consume_identifier())
    }

    /// Any identifier, reserved words included (property names, qualified name segments).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        if !self.is_identifier_or_keyword() {
            return Err(self.error_expected("identifier"));
        }
        Ok(self.consume_identifier())
    }

    fn consume_identifier(&mut self) -> Identifier {
        let identifier = Identifier::new(self.scanner.token_value(), self.token_span());
        self.next_token();
        identifier
    }

    /// Text of the current token (identifier text for contextual checks).
    pub(crate) fn token_text(&self) -> &str {
        self.scanner.token_text()
    }

    // =========================================================================
    // Balanced skipping
    // =========================================================================

    /// Skip an opening bracket token and everything up to its matching closer.
    pub(crate) fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut stack = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::OpenBraceToken => stack.push(SyntaxKind::CloseBraceToken),
                SyntaxKind::OpenParenToken => stack.push(SyntaxKind::CloseParenToken),
                SyntaxKind::OpenBracketToken => stack.push(SyntaxKind::CloseBracketToken),
                kind @ (SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken) => {
                    if stack.last() == Some(&kind) {
                        stack.pop();
                    } else {
                        return Err(self.error_at_current(format_message(
                            "Unexpected '{0}'.",
                            &[kind.describe()],
                        )));
                    }
                }
                SyntaxKind::EndOfFileToken => {
                    let closer = stack.last().map_or("}", |k| k.describe());
                    return Err(self.error_expected(closer));
                }
                _ => {}
            }
            self.next_token();
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    /// Skip `<...>` type parameter/argument lists whose contents are not needed.
    pub(crate) fn skip_angle_brackets(&mut self) -> ParseResult<()> {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => depth = depth.saturating_sub(1),
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken => {
                    self.skip_balanced()?;
                    if depth == 0 {
                        return Ok(());
                    }
                    continue;
                }
                SyntaxKind::EndOfFileToken => return Err(self.error_expected(">")),
                _ => {}
            }
            self.next_token();
            if depth == 0 {
                return Ok(());
            }
        }
    }
}
