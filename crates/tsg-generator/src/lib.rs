//! Runtime type-guard generator.
//!
//! Compiles TypeScript type aliases, interfaces and enums into
//! `export function is<Name>(value: unknown): value is <Name>` predicates.
//!
//! Pipeline for one source file:
//! 1. `generator` - collect declarations and register every name
//! 2. `compiler` / `members` / `references` - each type node becomes a `Condition`
//! 3. `condition` - simplify and render the condition tree
//! 4. `extras` - add the runtime helpers the guards call
//! 5. `output` - assemble everything into a `GuardOutput`
//!
//! Formatting is left to the caller through the `Formatter` trait.

pub mod compiler;
pub mod condition;
pub mod context;
pub mod extras;
pub mod format;
pub mod generator;
mod members;
pub mod output;
mod references;

pub use compiler::compile_type_node;
pub use condition::Condition;
pub use context::{Flags, GeneratorContext, HasOwnCheck, PlainObjectCheck, ValuePath};
pub use format::{CommandFormatter, FormatError, Formatter, render_formatted};
pub use generator::{GenerateError, generate_type_guards, generate_type_guards_from_source};
pub use output::{GeneratedGuard, GuardOutput};
