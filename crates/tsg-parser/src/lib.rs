//! TypeScript declaration parser for the tsg type-guard generator.
//!
//! This crate provides:
//! - `node` - the type syntax tree (`TypeNode`, `TypeMember`, `Statement`, ...)
//! - `ParserState` - a recursive-descent parser over `tsg_scanner::ScannerState`
//! - `parse_source_file` - parse a whole file, failing with `ParseError`
//!
//! Only the declaration-level subset of TypeScript is modelled: type aliases,
//! interfaces, enums, class names and imports. Every other statement is
//! skipped over as a balanced token run and kept as `Statement::Other`.

pub mod parser;

pub use parser::node::*;
pub use parser::{ParseError, ParserState, parse_source_file};
