//! Translation cache and the fill pipeline

use crate::aggregate::{build_resources, DomainResources};
use crate::component::ComponentId;
use crate::error::Result;
use crate::loader::{load_translation_files, DocumentLoader};
use crate::path::{component_translation_path, TranslationPath};
use crate::tree::{TranslationMap, TranslationTree};
use futures::future;
use hearth_common::{Integration, IntegrationRegistry};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Cached translations for one language
pub type LanguagePartition = HashMap<ComponentId, TranslationMap>;

/// Process-wide translation cache
///
/// Partitioned by language, then keyed by component. Entries are only ever
/// added: a component with no translation file is recorded as an empty tree
/// and never retried. The owner is responsible for serializing fills; see
/// [`crate::service::TranslationService`].
#[derive(Debug, Default)]
pub struct TranslationCache {
    languages: HashMap<String, LanguagePartition>,
}

impl TranslationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The partition for `language`, if any component was ever cached for it
    pub fn partition(&self, language: &str) -> Option<&LanguagePartition> {
        self.languages.get(language)
    }

    /// Whether `component` is cached for `language`
    pub fn contains(&self, language: &str, component: &ComponentId) -> bool {
        self.languages
            .get(language)
            .is_some_and(|partition| partition.contains_key(component))
    }

    fn partition_mut(&mut self, language: &str) -> &mut LanguagePartition {
        self.languages.entry(language.to_string()).or_default()
    }
}

/// Everything needed to bring one language partition up to date
struct FillPlan {
    not_applicable: Vec<ComponentId>,
    files: HashMap<ComponentId, PathBuf>,
    integrations: HashMap<String, Integration>,
}

/// Fills the translation cache and aggregates per-domain resources
///
/// Missing components are resolved against the integration registry with a
/// concurrent fan-out, their translation files are batch-loaded, and the
/// results are merged into the cache before aggregation.
pub struct CacheManager {
    registry: Arc<dyn IntegrationRegistry>,
    loader: Arc<dyn DocumentLoader>,
}

impl CacheManager {
    /// Create a manager over the given registry and document loader
    pub fn new(registry: Arc<dyn IntegrationRegistry>, loader: Arc<dyn DocumentLoader>) -> Self {
        Self { registry, loader }
    }

    /// Ensure `components` are cached for `language`, then aggregate
    ///
    /// When `fallback` names a second language its partition is filled in the
    /// same pass: integration resolution and file loading for both languages
    /// run concurrently and are joined fail-fast. Components without a
    /// translation file are recorded as empty trees before any file I/O, so
    /// those markers survive a failing batch load.
    #[instrument(skip(self, cache, components), fields(components = components.len()))]
    pub async fn fetch_resources(
        &self,
        cache: &mut TranslationCache,
        language: &str,
        fallback: Option<&str>,
        components: &HashSet<ComponentId>,
    ) -> Result<(DomainResources, Option<DomainResources>)> {
        let (primary_plan, fallback_plan) = match fallback {
            Some(fallback) => {
                let (primary, secondary) = future::try_join(
                    self.plan_fill(cache.partition(language), language, components),
                    self.plan_fill(cache.partition(fallback), fallback, components),
                )
                .await?;
                (primary, Some(secondary))
            }
            None => (
                self.plan_fill(cache.partition(language), language, components)
                    .await?,
                None,
            ),
        };

        commit_not_applicable(cache.partition_mut(language), &primary_plan);
        if let (Some(fallback), Some(plan)) = (fallback, fallback_plan.as_ref()) {
            commit_not_applicable(cache.partition_mut(fallback), plan);
        }

        let (primary_loaded, fallback_loaded) = match fallback_plan.as_ref() {
            Some(plan) => {
                let (primary, secondary) = future::try_join(
                    self.load_planned(&primary_plan),
                    self.load_planned(plan),
                )
                .await?;
                (primary, Some(secondary))
            }
            None => (self.load_planned(&primary_plan).await?, None),
        };

        let partition = cache.partition_mut(language);
        partition.extend(primary_loaded);
        let primary = build_resources(partition, components)?;

        let secondary = match (fallback, fallback_loaded) {
            (Some(fallback), Some(loaded)) => {
                let partition = cache.partition_mut(fallback);
                partition.extend(loaded);
                Some(build_resources(partition, components)?)
            }
            _ => None,
        };

        Ok((primary, secondary))
    }

    /// Resolve integrations for every missing component and decide which
    /// translation files need loading. Does not touch the cache.
    async fn plan_fill(
        &self,
        partition: Option<&LanguagePartition>,
        language: &str,
        components: &HashSet<ComponentId>,
    ) -> Result<FillPlan> {
        let missing: Vec<&ComponentId> = components
            .iter()
            .filter(|component| {
                partition.map_or(true, |partition| !partition.contains_key(*component))
            })
            .collect();

        let missing_domains: HashSet<&str> = missing
            .iter()
            .map(|component| component.integration_domain())
            .collect();

        debug!(
            language,
            missing = missing.len(),
            domains = missing_domains.len(),
            "Planning cache fill"
        );

        let resolutions = missing_domains.iter().map(|domain| {
            let domain = (*domain).to_string();
            async move {
                let integration = self.registry.get_integration(&domain).await?;
                Ok::<_, crate::error::TranslationError>((domain, integration))
            }
        });
        let integrations: HashMap<String, Integration> =
            future::try_join_all(resolutions).await?.into_iter().collect();

        let mut plan = FillPlan {
            not_applicable: Vec::new(),
            files: HashMap::new(),
            integrations,
        };

        for component in missing {
            let integration = plan
                .integrations
                .get(component.integration_domain())
                .expect("every missing domain was resolved above");

            match component_translation_path(component, language, integration) {
                TranslationPath::NotApplicable => plan.not_applicable.push(component.clone()),
                TranslationPath::Found(path) => {
                    plan.files.insert(component.clone(), path);
                }
            }
        }

        Ok(plan)
    }

    /// Load the plan's file batch and backfill missing titles
    async fn load_planned(&self, plan: &FillPlan) -> Result<HashMap<ComponentId, TranslationMap>> {
        if plan.files.is_empty() {
            return Ok(HashMap::new());
        }

        let mut loaded = load_translation_files(self.loader.as_ref(), &plan.files).await?;

        // Domain-level bundles without a title get the integration's display
        // name instead.
        for (component, tree) in &mut loaded {
            if component.as_str().contains('.') {
                continue;
            }
            if !tree.contains_key("title") {
                if let Some(integration) = plan.integrations.get(component.integration_domain()) {
                    tree.insert(
                        "title".to_string(),
                        TranslationTree::Leaf(integration.name().to_string()),
                    );
                }
            }
        }

        Ok(loaded)
    }
}

fn commit_not_applicable(partition: &mut LanguagePartition, plan: &FillPlan) {
    for component in &plan.not_applicable {
        partition
            .entry(component.clone())
            .or_insert_with(TranslationMap::new);
    }
}
