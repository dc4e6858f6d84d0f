//! Resolves API levels to shared SDK descriptors

use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::sdk::error::SelectionError;
use crate::sdk::release::{RELEASES, release_for_level};
use crate::sdk::types::{ApiLevel, Sdk};

/// Trait for looking up the descriptor of a supported SDK
///
/// Repeated lookups of the same level, from one thread or many, must return
/// value-equal descriptors that are safe to share.
#[cfg_attr(test, automock)]
pub trait SdkProvider: Send + Sync {
    /// Resolve `level` to its descriptor
    ///
    /// Fails with [`SelectionError::UnresolvableVersion`] when the level is
    /// not one this provider can build.
    fn resolve(&self, level: ApiLevel) -> Result<Arc<Sdk>, SelectionError>;
}

/// Provider backed by a fixed set of pre-built descriptors
#[derive(Debug, Clone)]
pub struct DefaultSdkProvider {
    sdks: BTreeMap<ApiLevel, Arc<Sdk>>,
}

impl DefaultSdkProvider {
    pub fn new(levels: impl IntoIterator<Item = ApiLevel>) -> Self {
        let sdks = levels
            .into_iter()
            .map(|level| {
                let release = release_for_level(level);
                let sdk = Sdk {
                    api_level: level,
                    codename: release.map(|r| r.codename),
                    version_name: release.map(|r| r.version_name),
                };
                (level, Arc::new(sdk))
            })
            .collect();

        Self { sdks }
    }

    /// Provider for every level in the release table
    pub fn known() -> Self {
        Self::new(RELEASES.iter().map(|release| release.api_level))
    }

    /// Levels this provider can resolve, ascending
    pub fn levels(&self) -> impl Iterator<Item = ApiLevel> + '_ {
        self.sdks.keys().copied()
    }
}

impl Default for DefaultSdkProvider {
    fn default() -> Self {
        Self::known()
    }
}

impl SdkProvider for DefaultSdkProvider {
    fn resolve(&self, level: ApiLevel) -> Result<Arc<Sdk>, SelectionError> {
        self.sdks
            .get(&level)
            .cloned()
            .ok_or_else(|| SelectionError::UnresolvableVersion {
                level,
                supported: self.levels().collect(),
            })
    }
}
