//! Top-level translation service

use crate::aggregate::DomainResources;
use crate::cache::{CacheManager, TranslationCache};
use crate::component::ComponentId;
use crate::error::Result;
use crate::loader::{DocumentLoader, JsonDocumentLoader};
use crate::tree::{flatten, FlatResources, TranslationMap, TranslationTree};
use hearth_common::{ComponentIndex, IntegrationRegistry};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Language whose catalog fills gaps in every other language
pub const FALLBACK_LANGUAGE: &str = "en";

/// Key under which every flattened entry is nested
const COMPONENT_KEY: &str = "component";

/// Resolves flattened translation bundles for the host's components
///
/// Owns the process-wide translation cache and the mutex that serializes
/// fills. Construct one per host context and share it by handle; concurrent
/// `get_translations` calls for the same missing components then trigger at
/// most one load per file.
pub struct TranslationService {
    index: Arc<dyn ComponentIndex>,
    manager: CacheManager,
    cache: Mutex<TranslationCache>,
}

impl TranslationService {
    /// Create a service that reads translation files from disk
    pub fn new(registry: Arc<dyn IntegrationRegistry>, index: Arc<dyn ComponentIndex>) -> Self {
        Self::with_loader(registry, index, Arc::new(JsonDocumentLoader))
    }

    /// Create a service with a custom document loader
    pub fn with_loader(
        registry: Arc<dyn IntegrationRegistry>,
        index: Arc<dyn ComponentIndex>,
        loader: Arc<dyn DocumentLoader>,
    ) -> Self {
        Self {
            index,
            manager: CacheManager::new(registry, loader),
            cache: Mutex::new(TranslationCache::new()),
        }
    }

    /// Return all backend translations for `language`, flattened
    ///
    /// If `integration` is given, only that component is resolved. Otherwise
    /// the currently loaded components are used, extended with config-flow
    /// domains when `config_flow` is set. When `language` is not English the
    /// English catalog is fetched alongside it and merged beneath the
    /// primary result, so English-only keys survive as gap fillers.
    #[instrument(skip(self))]
    pub async fn get_translations(
        &self,
        language: &str,
        category: Option<&str>,
        integration: Option<&str>,
        config_flow: bool,
    ) -> Result<FlatResources> {
        let components = self.select_components(integration, config_flow).await;
        let fallback = (language != FALLBACK_LANGUAGE).then_some(FALLBACK_LANGUAGE);

        // One lock around the whole dual fetch, shared across every
        // language: overlapping requests never fill the same entry twice.
        let mut cache = self.cache.lock().await;
        let (primary, fallback_resources) = self
            .manager
            .fetch_resources(&mut cache, language, fallback, &components)
            .await?;
        drop(cache);

        let primary = finalize(primary, category);
        debug!(language, keys = primary.len(), "Resolved translations");

        match fallback_resources {
            Some(fallback_resources) => {
                let mut merged = finalize(fallback_resources, category);
                merged.extend(primary);
                Ok(merged)
            }
            None => Ok(primary),
        }
    }

    async fn select_components(
        &self,
        integration: Option<&str>,
        config_flow: bool,
    ) -> HashSet<ComponentId> {
        if let Some(integration) = integration {
            return std::iter::once(ComponentId::new(integration)).collect();
        }

        let mut components: HashSet<ComponentId> = self
            .index
            .loaded_components()
            .into_iter()
            .map(ComponentId::new)
            .collect();

        if config_flow {
            components.extend(
                self.index
                    .config_flow_domains()
                    .await
                    .into_iter()
                    .map(ComponentId::new),
            );
        }

        components
    }
}

/// Narrow to the requested category, wrap under `component` and flatten
fn finalize(resources: DomainResources, category: Option<&str>) -> FlatResources {
    let resources = match category {
        Some(category) => narrow_category(resources, category),
        None => resources,
    };

    let domains: TranslationMap = resources
        .into_iter()
        .map(|(domain, tree)| (domain, TranslationTree::Node(tree)))
        .collect();

    let mut wrapped = TranslationMap::new();
    wrapped.insert(COMPONENT_KEY.to_string(), TranslationTree::Node(domains));
    flatten(&wrapped)
}

/// Keep only `category` in every domain tree
///
/// A domain lacking the category yields an empty object rather than an
/// error.
fn narrow_category(resources: DomainResources, category: &str) -> DomainResources {
    resources
        .into_iter()
        .map(|(domain, mut tree)| {
            let value = tree
                .remove(category)
                .unwrap_or_else(TranslationTree::empty);
            let narrowed: TranslationMap =
                std::iter::once((category.to_string(), value)).collect();
            (domain, narrowed)
        })
        .collect()
}
