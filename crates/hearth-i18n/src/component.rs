//! Component identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a translatable component
///
/// Either a plain domain (`hue`) or a dotted pair naming a platform
/// sub-resource (`light.hue` — the light-platform strings shipped by the
/// hue integration). Note the asymmetry inherited from the wire format:
/// registry
/// lookup and path resolution key on the *last* segment, while aggregation
/// groups by the text before the *first* dot. The two disagree for ids with
/// more than one dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a component id from its string form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain used to look up the owning integration: the last segment
    pub fn integration_domain(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Domain used when grouping aggregated resources: before the first dot
    pub fn resource_domain(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// For an exactly-two-segment id, the leading platform segment
    pub fn platform(&self) -> Option<&str> {
        let mut parts = self.0.split('.');
        let first = parts.next()?;
        parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(first)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
