//! Common types and utilities for the tsg type-guard generator.
//!
//! This crate provides foundational types used across all tsg crates:
//! - Source spans (`Span`)
//! - Position/Range types for line/column source locations (`LineMap`, `Position`)
//! - Diagnostics surfaced by the parser and the generator (`Diagnostic`)
//! - Recursion limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics shared by parser and generator
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};
