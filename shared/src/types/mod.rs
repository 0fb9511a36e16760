//! Type definitions shared across the client crates

pub mod language;

pub use language::Language;
