//! # Cppgraph - C++ Syntax-to-Graph Frontend
//!
//! Translates tree-sitter concrete syntax trees for C++ into a richly typed
//! program graph for downstream static analysis (dataflow, call resolution,
//! security checks).
//!
//! Cppgraph provides:
//! - A translation driver turning one source unit into a [`TranslationUnit`]
//! - Kind-dispatched declaration/statement/expression builders with a uniform
//!   graceful-degradation policy for unrecognized syntax
//! - A lexical scope manager with correct visibility and shadowing semantics
//! - An interning type registry producing canonical, value-comparable type
//!   handles, including inline record definitions and qualifier folding

pub mod config;
pub mod diagnostics;
pub mod frontend;
pub mod graph;
pub mod location;
pub mod scope;
pub mod types;

// Re-exports for convenient access
pub use config::TranslationConfig;
pub use diagnostics::{BuilderCategory, Diagnostic};
pub use frontend::Frontend;
pub use graph::{DeclId, ExprId, ProgramGraph, StmtId, TranslationUnit};
pub use location::Region;
pub use scope::{ScopeId, ScopeManager};
pub use types::{TypeId, TypeRegistry};

/// Result type alias for Cppgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Cppgraph operations
///
/// Only unit-fatal conditions surface here. Unrecognized syntax inside a
/// unit is reported through [`Diagnostic`]s on the resulting
/// [`TranslationUnit`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parser produced no syntax tree for {0}")]
    Parse(String),

    #[error("unexpected root node kind `{kind}`, expected `translation_unit`")]
    UnexpectedRoot { kind: String },

    #[error("grammar error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
