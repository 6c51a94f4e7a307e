//! Translation file path resolution

use crate::component::ComponentId;
use hearth_common::Integration;
use std::path::PathBuf;

/// Directory inside an integration root that holds its translation files
pub const TRANSLATIONS_DIR: &str = ".translations";

/// Result of resolving a component to a translation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationPath {
    /// The file that would hold this component's translations
    Found(PathBuf),
    /// The component cannot ship translations
    NotApplicable,
}

/// Return the translation file location for a component
///
/// For a domain: `<root>/.translations/nl.json`. For a platform pair:
/// `<root>/.translations/light.nl.json`. An integration whose root is a
/// single file rather than a directory named after the domain has no
/// translations.
pub fn component_translation_path(
    component: &ComponentId,
    language: &str,
    integration: &Integration,
) -> TranslationPath {
    if let Some(platform) = component.platform() {
        let filename = format!("{platform}.{language}.json");
        return TranslationPath::Found(
            integration.file_path().join(TRANSLATIONS_DIR).join(filename),
        );
    }

    if integration.root_dir_name() != Some(component.integration_domain()) {
        return TranslationPath::NotApplicable;
    }

    TranslationPath::Found(
        integration
            .file_path()
            .join(TRANSLATIONS_DIR)
            .join(format!("{language}.json")),
    )
}
