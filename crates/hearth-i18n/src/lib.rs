//! # Hearth I18n
//!
//! Translation bundle loading, caching and aggregation for Hearth
//! integrations.
//!
//! Each integration may ship per-language JSON files under a
//! `.translations/` directory in its root. This crate locates those files,
//! loads them once into a process-wide append-only cache, folds platform
//! sub-resources into their owning domain, and serves a flat dot-keyed
//! bundle per language with English filling any gaps.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod cache;
pub mod component;
pub mod error;
pub mod loader;
pub mod path;
pub mod service;
pub mod tree;

pub use aggregate::{build_resources, DomainResources};
pub use cache::{CacheManager, LanguagePartition, TranslationCache};
pub use component::ComponentId;
pub use error::{Result, TranslationError};
pub use loader::{load_translation_files, DocumentLoader, JsonDocumentLoader};
pub use path::{component_translation_path, TranslationPath, TRANSLATIONS_DIR};
pub use service::{TranslationService, FALLBACK_LANGUAGE};
pub use tree::{flatten, merge_shallow, FlatResources, TranslationMap, TranslationTree};
