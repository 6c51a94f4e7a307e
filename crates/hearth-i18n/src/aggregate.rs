//! Per-domain resource aggregation

use crate::component::ComponentId;
use crate::error::{Result, TranslationError};
use crate::tree::{merge_shallow, TranslationMap};
use std::collections::{HashMap, HashSet};

/// Aggregated translations, keyed by domain
pub type DomainResources = HashMap<String, TranslationMap>;

/// Build the per-domain resources response for the given components
///
/// Every requested component must already be present in `partition`; a
/// missing entry means the cache fill was skipped and is reported as
/// [`TranslationError::CacheMiss`].
pub fn build_resources(
    partition: &HashMap<ComponentId, TranslationMap>,
    components: &HashSet<ComponentId>,
) -> Result<DomainResources> {
    let mut resources = DomainResources::new();

    for component in components {
        let tree = partition
            .get(component)
            .ok_or_else(|| TranslationError::CacheMiss {
                component: component.to_string(),
            })?;

        // Clients cannot tell which platform an entity belongs to, so all
        // translations for a domain are returned together.
        let domain = resources
            .entry(component.resource_domain().to_string())
            .or_default();
        merge_shallow(domain, tree);
    }

    Ok(resources)
}
