//! Error types for longpath.
//!
//! All fallible operations return `Result<T, EvoError>` instead of panicking.
//! Recoverable situations (a mutation without a cut point, a selection
//! probability at the boundary, a migration that rounds to zero genomes) are
//! handled in place and never surface here.

use thiserror::Error;

use crate::graph::VertexId;

/// Result type alias for longpath operations.
pub type EvoResult<T> = Result<T, EvoError>;

/// Unified error type for all longpath operations.
#[derive(Debug, Error)]
pub enum EvoError {
    // ===== Graph Errors =====
    /// A graph must contain at least one vertex.
    #[error("Graph error: graph has no vertices")]
    EmptyGraph,

    /// The same vertex id was declared twice.
    #[error("Graph error: vertex {0} declared more than once")]
    DuplicateVertex(VertexId),

    /// A path or codec operation referenced an id the graph does not contain.
    #[error("Graph error: vertex {0} does not exist")]
    UnknownVertex(VertexId),

    /// Malformed graph or path text.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    // ===== Evolution Errors =====
    /// A generation step produced (or was handed) no genomes at all.
    #[error("Population extinct at generation {generation}")]
    PopulationExtinct {
        /// Generation index at which the population vanished.
        generation: usize,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvoError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error for the given 1-based line.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Whether the error comes from the graph input rather than the search.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyGraph
                | Self::DuplicateVertex(_)
                | Self::UnknownVertex(_)
                | Self::Parse { .. }
        )
    }
}
