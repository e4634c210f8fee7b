//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while turning a source file into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to load Java grammar: {message}")]
    GrammarLoad { message: String },

    #[error("Tree-sitter produced no tree for {path}")]
    TreeSitter { path: PathBuf },

    #[error("Syntax errors in {path}: {error_count} invalid node(s)")]
    Syntax { path: PathBuf, error_count: u32 },

    #[error("Source {path} nests {depth} levels deep (limit {limit})")]
    TooDeep {
        path: PathBuf,
        depth: usize,
        limit: usize,
    },
}

impl ParseError {
    /// True when the source could not be located at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => error_code::SOURCE_NOT_FOUND,
            _ => error_code::PARSE_ERROR,
        }
    }
}
