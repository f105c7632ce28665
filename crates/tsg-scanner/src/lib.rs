//! TypeScript scanner/tokenizer for the tsg type-guard generator.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with save/restore for look-ahead

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState};

#[cfg(test)]
mod tests;
