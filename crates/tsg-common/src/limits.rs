//! Centralized limits and thresholds.
//!
//! Both the parser and the guard compiler are recursive over type syntax.
//! These bounds keep pathological inputs from overflowing the stack.

/// Maximum depth for parser recursion.
///
/// The parser tracks its recursion depth while parsing nested types and
/// reports a syntax error when this limit is exceeded.
///
/// # TypeScript example
///
/// ```typescript
/// // Deeply nested generic type arguments:
/// type T = Promise<Promise<Promise<Promise<Promise</* ... 128 levels ... */>>>>>;
///
/// // Deeply nested object literals:
/// type Deep = { a: { b: { c: { /* ... */ } } } };
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 128;

/// Maximum depth for guard compilation.
///
/// When a type node is nested deeper than this, the compiler stops descending
/// and emits a permissive `true` condition with a diagnostic comment.
pub const MAX_GUARD_COMPILE_DEPTH: u32 = 128;
