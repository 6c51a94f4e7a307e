//! Translation file loading

use crate::component::ComponentId;
use crate::error::{Result, TranslationError};
use crate::tree::TranslationMap;
use async_trait::async_trait;
use futures::future;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and parses a single translation document
///
/// The default implementation reads JSON from disk; tests substitute
/// in-memory or counting implementations.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load the document at `path`
    ///
    /// The top level must be a mapping; anything else is a parse error.
    async fn load(&self, path: &Path) -> Result<TranslationMap>;
}

/// [`DocumentLoader`] that reads JSON files from the file system
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDocumentLoader;

#[async_trait]
impl DocumentLoader for JsonDocumentLoader {
    async fn load(&self, path: &Path) -> Result<TranslationMap> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| TranslationError::Load {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| TranslationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a batch of translation files, all or nothing
///
/// Files are loaded concurrently; the first failure aborts the batch and no
/// partial result is returned.
pub async fn load_translation_files<L>(
    loader: &L,
    files: &HashMap<ComponentId, PathBuf>,
) -> Result<HashMap<ComponentId, TranslationMap>>
where
    L: DocumentLoader + ?Sized,
{
    let loads = files.iter().map(|(component, path)| async move {
        let tree = loader.load(path).await?;
        debug!(component = %component, path = %path.display(), "Loaded translation file");
        Ok::<_, TranslationError>((component.clone(), tree))
    });

    let loaded = future::try_join_all(loads).await?;
    Ok(loaded.into_iter().collect())
}
