//! Catalog of SDK levels the host can build, optionally narrowed to an
//! administratively enabled subset

use std::collections::BTreeSet;
use std::ops::Bound;

use tracing::warn;

use crate::sdk::types::ApiLevel;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SdkCatalog {
    supported: BTreeSet<ApiLevel>,
    /// `None` means every supported level is enabled
    enabled: Option<BTreeSet<ApiLevel>>,
}

impl SdkCatalog {
    pub fn new(supported: impl IntoIterator<Item = ApiLevel>) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            enabled: None,
        }
    }

    /// Restrict selection to `enabled`
    ///
    /// Enabled levels that are not supported are kept but can never be
    /// selected.
    pub fn with_enabled(mut self, enabled: impl IntoIterator<Item = ApiLevel>) -> Self {
        let enabled: BTreeSet<ApiLevel> = enabled.into_iter().collect();
        for level in enabled.difference(&self.supported) {
            warn!("Enabled SDK {} is not supported and will be ignored", level);
        }
        self.enabled = Some(enabled);
        self
    }

    pub fn supported(&self) -> &BTreeSet<ApiLevel> {
        &self.supported
    }

    pub fn enabled(&self) -> Option<&BTreeSet<ApiLevel>> {
        self.enabled.as_ref()
    }

    pub fn is_supported(&self, level: ApiLevel) -> bool {
        self.supported.contains(&level)
    }

    /// Whether `level` is supported and not excluded by the enabled subset
    pub fn is_enabled(&self, level: ApiLevel) -> bool {
        self.is_supported(level)
            && self
                .enabled
                .as_ref()
                .is_none_or(|enabled| enabled.contains(&level))
    }

    /// Supported and enabled levels within `[min, max]`, ascending
    ///
    /// `max` of `None` leaves the window unbounded above. An inverted window
    /// yields nothing.
    pub fn candidates(
        &self,
        min: ApiLevel,
        max: Option<ApiLevel>,
    ) -> impl DoubleEndedIterator<Item = ApiLevel> + '_ {
        let upper = match max {
            Some(max) if max < min => Bound::Excluded(min),
            Some(max) => Bound::Included(max),
            None => Bound::Unbounded,
        };

        self.supported
            .range((Bound::Included(min), upper))
            .copied()
            .filter(|level| self.is_enabled(*level))
    }
}
