//! Scanner state machine.
//!
//! The scanner produces one token per `scan()` call and tracks whether a line
//! break preceded the token (needed for ASI-style statement boundaries and for
//! `T\n[...]` not being an array type). Look-ahead is done by saving and
//! restoring a `ScannerSnapshot`.

use std::sync::Arc;

use crate::SyntaxKind;

/// A lexical problem found while scanning (unterminated literal or comment).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
}

/// Everything needed to rewind the scanner to an earlier token.
#[derive(Copy, Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    preceding_line_break: bool,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    preceding_line_break: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            preceding_line_break: false,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start offset of the current token.
    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    /// End offset of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Raw source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    /// Cooked value of the current token: identifier text, or the contents of
    /// a string literal with simple escapes resolved.
    pub fn token_value(&self) -> String {
        match self.token {
            SyntaxKind::StringLiteral => unescape_string(self.token_text()),
            _ => self.token_text().to_string(),
        }
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            preceding_line_break: self.preceding_line_break,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Skip a `#!` line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            self.pos = self.line_end_from(0);
        }
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.skip_trivia();
        self.token_start = self.pos;

        let bytes = self.text.as_bytes();
        if self.pos >= bytes.len() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = bytes[self.pos];
        self.token = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'<' => self.single(SyntaxKind::LessThanToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b'@' => self.single(SyntaxKind::AtToken),
            b'+' => self.single(SyntaxKind::PlusToken),
            b'-' => self.single(SyntaxKind::MinusToken),
            b'*' => self.single(SyntaxKind::AsteriskToken),
            b'.' => {
                if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) {
                    self.scan_number()
                } else if self.text[self.pos..].starts_with("...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'=' => match self.peek_byte(1) {
                Some(b'>') => {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                }
                Some(b'=') => self.scan_operator_run(b'='),
                _ => self.single(SyntaxKind::EqualsToken),
            },
            b'|' => match self.peek_byte(1) {
                Some(b'|') | Some(b'=') => self.scan_operator_run(b'|'),
                _ => self.single(SyntaxKind::BarToken),
            },
            b'&' => match self.peek_byte(1) {
                Some(b'&') | Some(b'=') => self.scan_operator_run(b'&'),
                _ => self.single(SyntaxKind::AmpersandToken),
            },
            b'\'' | b'"' => self.scan_string(ch),
            b'`' => self.scan_template(),
            b'#' => {
                self.pos += 1;
                if self.pos < bytes.len() && is_identifier_start(self.current_char()) {
                    self.scan_identifier_rest();
                    SyntaxKind::PrivateIdentifier
                } else {
                    SyntaxKind::Unknown
                }
            }
            b'0'..=b'9' => self.scan_number(),
            _ => {
                let c = self.current_char();
                if is_identifier_start(c) {
                    self.scan_identifier_rest();
                    SyntaxKind::from_keyword(self.token_text()).unwrap_or(SyntaxKind::Identifier)
                } else if c.is_ascii_punctuation() {
                    self.scan_operator_run(ch)
                } else {
                    self.pos += c.len_utf8();
                    SyntaxKind::Unknown
                }
            }
        };
        self.token
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn current_char(&self) -> char {
        self.text[self.pos..].chars().next().unwrap_or('\0')
    }

    fn line_end_from(&self, from: usize) -> usize {
        memchr::memchr(b'\n', &self.text.as_bytes()[from..])
            .map(|i| from + i)
            .unwrap_or(self.text.len())
    }

    fn skip_trivia(&mut self) {
        let len = self.text.len();
        while self.pos < len {
            let bytes = self.text.as_bytes();
            match bytes[self.pos] {
                b'\n' => {
                    self.preceding_line_break = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    self.pos = self.line_end_from(self.pos);
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    let body_start = self.pos + 2;
                    match memchr::memmem::find(&bytes[body_start..], b"*/") {
                        Some(offset) => {
                            let close = body_start + offset;
                            if memchr::memchr(b'\n', &bytes[body_start..close]).is_some() {
                                self.preceding_line_break = true;
                            }
                            self.pos = close + 2;
                        }
                        None => {
                            self.diagnostics.push(ScannerDiagnostic {
                                pos: self.pos,
                                length: len - self.pos,
                                message: "'*/' expected.",
                            });
                            self.pos = len;
                        }
                    }
                }
                b if b < 0x80 => return,
                _ => {
                    let c = self.current_char();
                    if c.is_whitespace() || c == '\u{feff}' {
                        if c == '\u{2028}' || c == '\u{2029}' {
                            self.preceding_line_break = true;
                        }
                        self.pos += c.len_utf8();
                    } else {
                        return;
                    }
                }
            }
        }
    }

    fn scan_identifier_rest(&mut self) {
        let len = self.text.len();
        while self.pos < len {
            let c = self.current_char();
            if is_identifier_part(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn scan_operator_run(&mut self, first: u8) -> SyntaxKind {
        self.pos += 1;
        while self.peek_byte(0).is_some_and(|b| {
            matches!(b, b'=' | b'|' | b'&' | b'!' | b'%' | b'^' | b'~' | b'/') && (b == first || b == b'=')
        }) {
            self.pos += 1;
        }
        SyntaxKind::OtherPunctuation
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.text.as_bytes();
        let len = bytes.len();

        if bytes[self.pos] == b'0'
            && matches!(
                bytes.get(self.pos + 1),
                Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
            )
        {
            self.pos += 2;
            while self.pos < len && (bytes[self.pos].is_ascii_hexdigit() || bytes[self.pos] == b'_') {
                self.pos += 1;
            }
        } else {
            while self.pos < len && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'_') {
                self.pos += 1;
            }
            if self.pos < len && bytes[self.pos] == b'.' {
                self.pos += 1;
                while self.pos < len && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'_') {
                    self.pos += 1;
                }
            }
            if self.pos < len && matches!(bytes[self.pos], b'e' | b'E') {
                let mut exp = self.pos + 1;
                if exp < len && matches!(bytes[exp], b'+' | b'-') {
                    exp += 1;
                }
                if exp < len && bytes[exp].is_ascii_digit() {
                    self.pos = exp;
                    while self.pos < len && bytes[self.pos].is_ascii_digit() {
                        self.pos += 1;
                    }
                }
            }
        }

        if self.pos < len && bytes[self.pos] == b'n' {
            self.pos += 1;
            return SyntaxKind::BigIntLiteral;
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        while self.pos < len {
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\n' | b'\r' => break,
                b if b == quote => {
                    self.pos += 1;
                    return SyntaxKind::StringLiteral;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(len);
        self.diagnostics.push(ScannerDiagnostic {
            pos: start,
            length: self.pos - start,
            message: "Unterminated string literal.",
        });
        SyntaxKind::StringLiteral
    }

    /// Scan a template literal as one token, skipping over `${...}` placeholders
    /// (which may themselves contain strings and nested templates).
    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        if !self.skip_template_body() {
            self.diagnostics.push(ScannerDiagnostic {
                pos: start,
                length: self.pos - start,
                message: "Unterminated template literal.",
            });
        }
        SyntaxKind::TemplateLiteral
    }

    /// Expects `self.pos` on the opening backtick. Returns `false` when the
    /// template runs to end of file.
    fn skip_template_body(&mut self) -> bool {
        let len = self.text.len();
        self.pos += 1;
        while self.pos < len {
            let bytes = self.text.as_bytes();
            match bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    return true;
                }
                b'$' if bytes.get(self.pos + 1) == Some(&b'{') => {
                    self.pos += 2;
                    if !self.skip_template_placeholder() {
                        return false;
                    }
                }
                _ => self.pos += 1,
            }
        }
        self.pos = len;
        false
    }

    fn skip_template_placeholder(&mut self) -> bool {
        let len = self.text.len();
        let mut depth = 0usize;
        while self.pos < len {
            let bytes = self.text.as_bytes();
            match bytes[self.pos] {
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    self.pos += 1;
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                }
                q @ (b'\'' | b'"') => {
                    let snapshot = self.diagnostics.len();
                    self.scan_string(q);
                    self.diagnostics.truncate(snapshot);
                }
                b'`' => {
                    if !self.skip_template_body() {
                        return false;
                    }
                }
                _ => self.pos += 1,
            }
        }
        false
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}

/// Strip quotes from a string literal and resolve the common escapes.
fn unescape_string(raw: &str) -> String {
    let inner = raw
        .get(1..raw.len().saturating_sub(1).max(1))
        .unwrap_or("");
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
