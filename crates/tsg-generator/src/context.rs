//! Per-compilation state threaded through the compiler.
//!
//! - `Flags` - caller configuration (object gate and existence check style)
//! - `Registry` - names known in the current source file, helper needs
//! - `Hooks` - ordered, keyed text slots around the generated guards
//! - `ValuePath` - the expression a sub-condition is evaluated against

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

// =============================================================================
// Flags
// =============================================================================

/// How "is a (plain) object" is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlainObjectCheck {
    /// `value !== null && typeof value === "object"`
    #[default]
    Simple,
    /// `isPlainObject(value)` with the helper inlined into the output.
    Insert,
    /// `isPlainObject` imported from `lodash`.
    Lodash,
    /// `isPlainObject` imported from `es-toolkit`.
    EsToolkit,
}

impl PlainObjectCheck {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlainObjectCheck::Simple => "simple",
            PlainObjectCheck::Insert => "insert",
            PlainObjectCheck::Lodash => "lodash",
            PlainObjectCheck::EsToolkit => "es-toolkit",
        }
    }
}

/// How property existence is checked before a property is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HasOwnCheck {
    /// `"name" in value`
    #[default]
    In,
    /// `hasOwn(value, "name")` with the helper inlined into the output.
    HasOwn,
}

impl HasOwnCheck {
    pub const fn as_str(self) -> &'static str {
        match self {
            HasOwnCheck::In => "in",
            HasOwnCheck::HasOwn => "hasOwn",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub plain_object_check: PlainObjectCheck,
    pub has_own_check: HasOwnCheck,
}

// =============================================================================
// Registry
// =============================================================================

/// Names discovered in the source file, plus the helpers the compiled guards
/// ended up needing.
#[derive(Debug, Default)]
pub struct Registry {
    /// Locally declared classes (`instanceof` targets).
    pub classes: FxHashSet<String>,
    /// Locally declared enums (`Enum.Member` references).
    pub enums: FxHashSet<String>,
    /// Local names bound by import declarations.
    pub imports: FxHashSet<String>,
    /// Type names a guard is generated for in this file.
    pub generated_guards: FxHashSet<String>,
    pub needs_plain_object: bool,
    pub needs_has_own: bool,
}

impl Registry {
    /// The guard function to call for `type_name`, if one is generated here
    /// or `is<Name>` was imported.
    pub fn guard_for(&self, type_name: &str) -> Option<String> {
        let function_name = guard_function_name(type_name);
        (self.generated_guards.contains(type_name) || self.imports.contains(&function_name))
            .then_some(function_name)
    }
}

/// `User` -> `isUser`
pub fn guard_function_name(type_name: &str) -> String {
    format!("is{type_name}")
}

// =============================================================================
// Hooks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSlot {
    /// Before the original source (imports).
    BeforeAll,
    /// After the source, before the guards (inlined helpers).
    BeforeGenerated,
    /// After the guards.
    AfterGenerated,
}

/// Keyed text blocks; setting an existing key replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    before_all: IndexMap<String, String>,
    before_generated: IndexMap<String, String>,
    after_generated: IndexMap<String, String>,
}

impl Hooks {
    pub fn set(&mut self, slot: HookSlot, key: impl Into<String>, text: impl Into<String>) {
        self.slot_mut(slot).insert(key.into(), text.into());
    }

    pub fn get(&self, slot: HookSlot, key: &str) -> Option<&str> {
        self.slot(slot).get(key).map(String::as_str)
    }

    /// Blocks of `slot` in insertion order.
    pub fn blocks(&self, slot: HookSlot) -> impl Iterator<Item = &str> {
        self.slot(slot).values().map(String::as_str)
    }

    fn slot(&self, slot: HookSlot) -> &IndexMap<String, String> {
        match slot {
            HookSlot::BeforeAll => &self.before_all,
            HookSlot::BeforeGenerated => &self.before_generated,
            HookSlot::AfterGenerated => &self.after_generated,
        }
    }

    fn slot_mut(&mut self, slot: HookSlot) -> &mut IndexMap<String, String> {
        match slot {
            HookSlot::BeforeAll => &mut self.before_all,
            HookSlot::BeforeGenerated => &mut self.before_generated,
            HookSlot::AfterGenerated => &mut self.after_generated,
        }
    }
}

// =============================================================================
// Value paths
// =============================================================================

/// A JavaScript expression naming the value under test, e.g. `value.a.b[0]`.
///
/// Paths are never edited in place; each accessor returns a child path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValuePath(String);

impl ValuePath {
    /// The guard parameter, `value`.
    pub fn root() -> Self {
        ValuePath("value".to_string())
    }

    /// A callback binding such as `el`, `key` or `value`.
    pub fn binding(name: &str) -> Self {
        ValuePath(name.to_string())
    }

    /// `path.name`
    pub fn member(&self, name: &str) -> Self {
        ValuePath(format!("{}.{name}", self.0))
    }

    /// `path[index]`
    pub fn element(&self, index: usize) -> Self {
        ValuePath(format!("{}[{index}]", self.0))
    }

    /// `path[expression]`
    pub fn computed(&self, expression: &str) -> Self {
        ValuePath(format!("{}[{expression}]", self.0))
    }

    /// `path.method(args)`, e.g. `value.slice(1)`
    pub fn call(&self, method: &str, args: &str) -> Self {
        ValuePath(format!("{}.{method}({args})", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Generator context
// =============================================================================

/// The key used by an existence check: a quoted string or a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    /// Already quoted, e.g. `"name"`.
    Quoted(String),
    /// Numeric literal text, e.g. `0`.
    Numeric(String),
}

impl PropertyKey {
    pub fn string(value: &str) -> Self {
        PropertyKey::Quoted(quote_string(value))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Quoted(text) | PropertyKey::Numeric(text) => text,
        }
    }
}

/// Double-quoted JavaScript string literal for `value`.
pub fn quote_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// `path !== null && typeof path === "object"`, kept as two leaves so that
/// repeated gates collapse after flattening.
pub fn non_null_object(path: &ValuePath) -> Condition {
    Condition::and(vec![
        Condition::leaf(format!("{path} !== null")),
        Condition::type_of(path, "object"),
    ])
}

pub struct GeneratorContext {
    pub flags: Flags,
    pub registry: Registry,
    pub hooks: Hooks,
    /// Erased type parameters of the declaration being compiled.
    pub(crate) type_parameters: FxHashSet<String>,
    pub(crate) depth: u32,
}

impl GeneratorContext {
    pub fn new(flags: Flags) -> Self {
        GeneratorContext {
            flags,
            registry: Registry::default(),
            hooks: Hooks::default(),
            type_parameters: FxHashSet::default(),
            depth: 0,
        }
    }

    /// The "is object" gate for `path`; records a helper need unless `simple`.
    pub fn object_gate(&mut self, path: &ValuePath) -> Condition {
        match self.flags.plain_object_check {
            PlainObjectCheck::Simple => non_null_object(path),
            PlainObjectCheck::Insert | PlainObjectCheck::Lodash | PlainObjectCheck::EsToolkit => {
                self.registry.needs_plain_object = true;
                Condition::leaf(format!("isPlainObject({path})"))
            }
        }
    }

    /// Existence check text for `key` on `path`; records a helper need for `hasOwn`.
    pub fn existence_check(&mut self, path: &ValuePath, key: &PropertyKey) -> String {
        match self.flags.has_own_check {
            HasOwnCheck::In => format!("{} in {path}", key.as_str()),
            HasOwnCheck::HasOwn => {
                self.registry.needs_has_own = true;
                format!("hasOwn({path}, {})", key.as_str())
            }
        }
    }

    pub(crate) fn is_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.contains(name)
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;
