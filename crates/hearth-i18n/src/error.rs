//! Error types for translation resolution

use hearth_common::RegistryError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving translation bundles
#[derive(Debug, Error)]
pub enum TranslationError {
    /// A referenced domain has no installed integration
    #[error(transparent)]
    IntegrationNotFound(#[from] RegistryError),

    /// A translation file could not be read
    #[error("Failed to read translation file {path}")]
    Load {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A translation file is not valid JSON, or its top level is not a mapping
    #[error("Malformed translation file {path}: {source}")]
    Parse {
        /// Path of the malformed file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Aggregation was requested for a component that was never cached
    ///
    /// This is a caller ordering bug, not a recoverable condition: the cache
    /// fill must complete before resources are aggregated.
    #[error("Translation cache has no entry for component {component}")]
    CacheMiss {
        /// The component id that was missing from the cache
        component: String,
    },
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
