//! The assembled result of one generator run.

use indexmap::IndexSet;
use serde::Serialize;
use tsg_common::{Diagnostic, Span};

/// One `is<Name>` function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGuard {
    /// Declared type name.
    pub name: String,
    pub function_name: String,
    /// The `export function ...` text, without the warning block.
    pub code: String,
    /// Comments gathered from the guard's condition tree.
    pub diagnostics: Vec<String>,
    /// Span of the declaration the guard was generated from.
    pub span: Span,
}

impl GeneratedGuard {
    /// The function preceded by a `/* Warning: ... */` block when it has diagnostics.
    pub fn render(&self) -> String {
        if self.diagnostics.is_empty() {
            return self.code.clone();
        }
        let mut text = String::from("/* Warning:\n");
        for diagnostic in &self.diagnostics {
            text.push_str(" * - ");
            text.push_str(diagnostic);
            text.push('\n');
        }
        text.push_str(" */\n");
        text.push_str(&self.code);
        text
    }
}

/// Everything one source file produced, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardOutput {
    pub file_name: String,
    /// Blocks placed before the original source (imports).
    pub prologue: Vec<String>,
    /// The original source text; `None` when it is left out of the output.
    pub source: Option<String>,
    /// Inlined helper functions placed before the guards.
    pub helpers: Vec<String>,
    pub guards: Vec<GeneratedGuard>,
    pub epilogue: Vec<String>,
    /// Union of every guard's diagnostics, first appearance first.
    pub diagnostics: Vec<String>,
}

impl GuardOutput {
    pub(crate) fn new(file_name: String, source: String) -> Self {
        GuardOutput {
            file_name,
            prologue: Vec::new(),
            source: Some(source),
            helpers: Vec::new(),
            guards: Vec::new(),
            epilogue: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn push_guard(&mut self, guard: GeneratedGuard) {
        let mut seen: IndexSet<String> = self.diagnostics.drain(..).collect();
        seen.extend(guard.diagnostics.iter().cloned());
        self.diagnostics = seen.into_iter().collect();
        self.guards.push(guard);
    }

    /// Drop the original source from the rendered text.
    pub fn without_source(mut self) -> Self {
        self.source = None;
        self
    }

    /// The final file text: sections separated by a blank line, ending in a newline.
    pub fn render(&self) -> String {
        let guards = self.guards.iter().map(GeneratedGuard::render);
        let sections: Vec<String> = self
            .prologue
            .iter()
            .cloned()
            .chain(self.source.iter().cloned())
            .chain(self.helpers.iter().cloned())
            .chain(guards)
            .chain(self.epilogue.iter().cloned())
            .map(|section| section.trim_end().to_string())
            .filter(|section| !section.is_empty())
            .collect();
        let mut text = sections.join("\n\n");
        text.push('\n');
        text
    }

    /// Guard diagnostics as warnings located at their declarations.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.guards
            .iter()
            .flat_map(|guard| {
                guard
                    .diagnostics
                    .iter()
                    .map(|message| Diagnostic::warning(guard.span, message.clone()))
            })
            .collect()
    }
}
