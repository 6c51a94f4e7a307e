//! Integration descriptors and the registry seam
//!
//! The host application owns the actual registry of installed integrations;
//! subsystems consume it through the traits defined here.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the integration registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No integration is installed for the requested domain
    #[error("Integration not found: {domain}")]
    NotFound {
        /// The domain that could not be resolved
        domain: String,
    },
}

/// Descriptor for a single installed integration
///
/// `file_path` is the integration's on-disk root. For a packaged integration
/// this is a directory named after the domain (e.g. `components/hue`); for a
/// single-file integration it is the module file itself (e.g.
/// `custom_components/my_component.py`-style layouts), which carries no
/// translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    name: String,
    file_path: PathBuf,
}

impl Integration {
    /// Create a new integration descriptor
    pub fn new(name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
        }
    }

    /// Human-readable display name of the integration
    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-disk root of the integration
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Final path component of the integration root
    ///
    /// For packaged integrations this equals the domain; a mismatch means
    /// the integration is a single file and cannot ship translations.
    pub fn root_dir_name(&self) -> Option<&str> {
        self.file_path.file_name().and_then(|name| name.to_str())
    }
}

/// Resolves a domain name to its installed integration
#[async_trait]
pub trait IntegrationRegistry: Send + Sync {
    /// Look up the integration for `domain`
    ///
    /// Fails with [`RegistryError::NotFound`] when no such integration is
    /// installed.
    async fn get_integration(&self, domain: &str) -> Result<Integration, RegistryError>;
}

/// Enumerates the components the host currently knows about
#[async_trait]
pub trait ComponentIndex: Send + Sync {
    /// Component ids that are currently loaded into the host
    ///
    /// Entries are either plain domains (`hue`) or `domain.platform` pairs.
    fn loaded_components(&self) -> HashSet<String>;

    /// Domains that advertise a config flow, loaded or not
    async fn config_flow_domains(&self) -> HashSet<String>;
}
