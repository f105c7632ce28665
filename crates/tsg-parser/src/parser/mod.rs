//! Parser module: syntax tree, parser state, and the file-level entry point.

pub mod node;
mod state;
mod state_statements;
mod state_types;


pub use state::ParserState;

use thiserror::Error;
use tsg_common::{Diagnostic, LineMap, Position};

use node::SourceFile;

/// The source file could not be parsed.
///
/// Carries every syntax error found; the message shows the first one.
#[derive(Debug, Clone, Error)]
#[error("{file_name}:{position}: {message}")]
pub struct ParseError {
    pub file_name: String,
    pub position: Position,
    pub message: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    fn from_diagnostics(file_name: &str, text: &str, diagnostics: Vec<Diagnostic>) -> Option<Self> {
        let first = diagnostics.first()?;
        let line_map = LineMap::build(text);
        Some(ParseError {
            file_name: file_name.to_string(),
            position: line_map.position(first.span.start),
            message: first.message_text.clone(),
            diagnostics,
        })
    }
}

/// Parse `source_text` into a `SourceFile`, failing on any syntax error.
pub fn parse_source_file(
    file_name: impl Into<String>,
    source_text: impl Into<String>,
) -> Result<SourceFile, ParseError> {
    let mut parser = ParserState::new(file_name.into(), source_text.into());
    let source_file = parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    match ParseError::from_diagnostics(&source_file.file_name, source_file.text(), diagnostics) {
        Some(error) => Err(error),
        None => Ok(source_file),
    }
}
