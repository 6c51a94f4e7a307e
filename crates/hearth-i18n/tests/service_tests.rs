//! Integration tests for the translation service

use async_trait::async_trait;
use hearth_common::{ComponentIndex, Integration, IntegrationRegistry, RegistryError};
use hearth_i18n::{DocumentLoader, JsonDocumentLoader, TranslationMap, TranslationService};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Registry backed by a fixed map of installed integrations
struct InMemoryRegistry {
    integrations: HashMap<String, Integration>,
}

#[async_trait]
impl IntegrationRegistry for InMemoryRegistry {
    async fn get_integration(&self, domain: &str) -> Result<Integration, RegistryError> {
        self.integrations
            .get(domain)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                domain: domain.to_string(),
            })
    }
}

/// Component index with fixed loaded components and config-flow domains
struct StaticIndex {
    loaded: HashSet<String>,
    config_flows: HashSet<String>,
}

#[async_trait]
impl ComponentIndex for StaticIndex {
    fn loaded_components(&self) -> HashSet<String> {
        self.loaded.clone()
    }

    async fn config_flow_domains(&self) -> HashSet<String> {
        self.config_flows.clone()
    }
}

/// Wraps the real JSON loader and counts every load call
struct CountingLoader {
    inner: JsonDocumentLoader,
    calls: AtomicUsize,
}

impl CountingLoader {
    fn new() -> Self {
        Self {
            inner: JsonDocumentLoader,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentLoader for CountingLoader {
    async fn load(&self, path: &Path) -> hearth_i18n::Result<TranslationMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load(path).await
    }
}

/// A components tree with a packaged hue integration (domain plus a light
/// platform), a packaged zwave integration and a single-file integration.
fn create_components_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let hue = temp_dir.path().join("hue/.translations");
    fs::create_dir_all(&hue).unwrap();
    fs::write(
        hue.join("en.json"),
        r#"{
            "title": "Philips Hue",
            "state": {"on": "On", "off": "Off"},
            "config": {"intro": "Pair your bridge"}
        }"#,
    )
    .unwrap();
    fs::write(
        hue.join("nl.json"),
        r#"{"state": {"on": "Aan"}}"#,
    )
    .unwrap();
    fs::write(
        hue.join("light.en.json"),
        r#"{"name": "Light"}"#,
    )
    .unwrap();
    fs::write(hue.join("light.nl.json"), r#"{"name": "Lamp"}"#).unwrap();

    let zwave = temp_dir.path().join("zwave/.translations");
    fs::create_dir_all(&zwave).unwrap();
    fs::write(zwave.join("en.json"), r#"{"title": "Z-Wave"}"#).unwrap();

    fs::create_dir_all(temp_dir.path().join("custom")).unwrap();
    fs::write(temp_dir.path().join("custom/my_component.py"), "").unwrap();

    temp_dir
}

fn registry_for(tree: &TempDir) -> Arc<InMemoryRegistry> {
    let mut integrations = HashMap::new();
    integrations.insert(
        "hue".to_string(),
        Integration::new("Philips Hue", tree.path().join("hue")),
    );
    integrations.insert(
        "zwave".to_string(),
        Integration::new("Z-Wave", tree.path().join("zwave")),
    );
    integrations.insert(
        "my_component".to_string(),
        Integration::new("My Component", tree.path().join("custom/my_component.py")),
    );
    Arc::new(InMemoryRegistry { integrations })
}

fn index_for(loaded: &[&str], config_flows: &[&str]) -> Arc<StaticIndex> {
    Arc::new(StaticIndex {
        loaded: loaded.iter().map(ToString::to_string).collect(),
        config_flows: config_flows.iter().map(ToString::to_string).collect(),
    })
}

fn service(
    tree: &TempDir,
    loaded: &[&str],
    config_flows: &[&str],
) -> (Arc<TranslationService>, Arc<CountingLoader>) {
    hearth_common::init_test_logging();
    let loader = Arc::new(CountingLoader::new());
    let service = TranslationService::with_loader(
        registry_for(tree),
        index_for(loaded, config_flows),
        loader.clone(),
    );
    (Arc::new(service), loader)
}

#[tokio::test]
async fn english_bundle_is_flat_and_component_prefixed() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue"], &[]);

    let bundle = service.get_translations("en", None, None, false).await.unwrap();

    assert_eq!(
        bundle.get("component.hue.state.on").map(String::as_str),
        Some("On")
    );
    assert_eq!(
        bundle.get("component.hue.title").map(String::as_str),
        Some("Philips Hue")
    );
    assert!(bundle.keys().all(|key| key.starts_with("component.")));
}

#[tokio::test]
async fn platform_strings_are_served_under_the_owning_domain() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue", "light.hue"], &[]);

    let bundle = service.get_translations("en", None, None, false).await.unwrap();

    // The light platform's entries are grouped under "light", the domain
    // before the first dot of the component id.
    assert_eq!(
        bundle.get("component.light.name").map(String::as_str),
        Some("Light")
    );
}

#[tokio::test]
async fn english_fills_gaps_in_other_languages() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue"], &[]);

    let bundle = service.get_translations("nl", None, None, false).await.unwrap();

    // Dutch value wins where present.
    assert_eq!(
        bundle.get("component.hue.state.on").map(String::as_str),
        Some("Aan")
    );
    // English-only keys survive.
    assert_eq!(
        bundle.get("component.hue.state.off").map(String::as_str),
        Some("Off")
    );
    assert_eq!(
        bundle.get("component.hue.config.intro").map(String::as_str),
        Some("Pair your bridge")
    );
}

#[tokio::test]
async fn english_requests_skip_the_fallback_fetch() {
    let tree = create_components_tree();
    let (service, loader) = service(&tree, &["hue"], &[]);

    service.get_translations("en", None, None, false).await.unwrap();

    // Only the English file was loaded.
    assert_eq!(loader.call_count(), 1);
}

#[tokio::test]
async fn category_narrows_both_primary_and_fallback() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue"], &[]);

    let bundle = service
        .get_translations("nl", Some("state"), None, false)
        .await
        .unwrap();

    assert_eq!(
        bundle.get("component.hue.state.off").map(String::as_str),
        Some("Off")
    );
    assert!(!bundle.contains_key("component.hue.config.intro"));
    assert!(!bundle.contains_key("component.hue.title"));
}

#[tokio::test]
async fn explicit_integration_limits_the_bundle() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue", "zwave"], &[]);

    let bundle = service
        .get_translations("en", None, Some("zwave"), false)
        .await
        .unwrap();

    assert_eq!(
        bundle.get("component.zwave.title").map(String::as_str),
        Some("Z-Wave")
    );
    assert!(!bundle.keys().any(|key| key.starts_with("component.hue.")));
}

#[tokio::test]
async fn config_flow_domains_extend_the_loaded_set() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue"], &["zwave"]);

    let without = service.get_translations("en", None, None, false).await.unwrap();
    assert!(!without.contains_key("component.zwave.title"));

    let with = service.get_translations("en", None, None, true).await.unwrap();
    assert_eq!(
        with.get("component.zwave.title").map(String::as_str),
        Some("Z-Wave")
    );
}

#[tokio::test]
async fn single_file_integration_yields_an_empty_bundle() {
    let tree = create_components_tree();
    let (service, loader) = service(&tree, &["my_component"], &[]);

    let bundle = service.get_translations("en", None, None, false).await.unwrap();

    assert!(bundle.is_empty());
    assert_eq!(loader.call_count(), 0);
}

#[tokio::test]
async fn repeated_calls_load_each_file_once() {
    let tree = create_components_tree();
    let (service, loader) = service(&tree, &["hue", "light.hue"], &[]);

    let first = service.get_translations("nl", None, None, false).await.unwrap();
    let loads_after_first = loader.call_count();
    let second = service.get_translations("nl", None, None, false).await.unwrap();

    assert_eq!(first, second);
    // nl + en for both the domain and the platform file.
    assert_eq!(loads_after_first, 4);
    assert_eq!(loader.call_count(), loads_after_first);
}

#[tokio::test]
async fn overlapping_requests_do_not_duplicate_loads() {
    let tree = create_components_tree();
    let (service, loader) = service(&tree, &["hue", "light.hue"], &[]);

    let (first, second) = tokio::join!(
        service.get_translations("nl", None, None, false),
        service.get_translations("nl", None, None, false),
    );

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(loader.call_count(), 4);
}

#[tokio::test]
async fn unknown_integration_fails_the_whole_request() {
    let tree = create_components_tree();
    let (service, _) = service(&tree, &["hue", "nonexistent"], &[]);

    let result = service.get_translations("en", None, None, false).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn malformed_file_fails_the_whole_request() {
    let tree = create_components_tree();
    fs::write(tree.path().join("hue/.translations/en.json"), "{ not json").unwrap();
    let (service, _) = service(&tree, &["hue", "zwave"], &[]);

    let result = service.get_translations("en", None, None, false).await;

    assert!(result.is_err());
    // The failed batch merged nothing, so a later request for an
    // unaffected component still succeeds.
    let zwave_only = service
        .get_translations("en", None, Some("zwave"), false)
        .await
        .unwrap();
    assert_eq!(
        zwave_only.get("component.zwave.title").map(String::as_str),
        Some("Z-Wave")
    );
}
