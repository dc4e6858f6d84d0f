//! SDK selection
//!
//! Validates the artifact's declared window, applies the per-test overrides,
//! then resolves the selection request against the catalog.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::sdk::catalog::SdkCatalog;
use crate::sdk::error::SelectionError;
use crate::sdk::provider::SdkProvider;
use crate::sdk::request::{SdkSelection, SelectionRequest};
use crate::sdk::types::{ApiLevel, Sdk, UsesSdk};

/// Trait for choosing the SDKs a test artifact runs against
pub trait SdkPicker: Send + Sync {
    /// Select SDKs for one artifact
    ///
    /// # Returns
    /// * `Ok(sdks)` - Selected SDKs ascending by API level; empty when nothing
    ///   in the window can run
    /// * `Err(SelectionError)` - If the window is inconsistent or an
    ///   explicitly requested SDK is not supported
    fn select_sdks(
        &self,
        selection: &SdkSelection,
        uses_sdk: &UsesSdk,
    ) -> Result<Vec<Arc<Sdk>>, SelectionError>;
}

/// Inclusive range of API levels a windowed request may pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SelectionWindow {
    min: ApiLevel,
    /// `None` when unbounded
    max: Option<ApiLevel>,
}

pub struct DefaultSdkPicker<P: SdkProvider> {
    provider: P,
    catalog: SdkCatalog,
}

impl<P: SdkProvider> DefaultSdkPicker<P> {
    pub fn new(provider: P, catalog: SdkCatalog) -> Self {
        Self { provider, catalog }
    }

    pub fn catalog(&self) -> &SdkCatalog {
        &self.catalog
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Compute the selection window from the artifact bounds and overrides
    fn selection_window(
        selection: &SdkSelection,
        uses_sdk: &UsesSdk,
    ) -> Result<SelectionWindow, SelectionError> {
        let window = SelectionWindow {
            min: selection.min_sdk.unwrap_or(uses_sdk.min_sdk),
            max: selection.max_sdk.or(uses_sdk.max_sdk),
        };

        if let Some(max) = window.max.filter(|max| window.min > *max) {
            if selection.min_sdk.is_some() && selection.max_sdk.is_some() {
                return Err(min_larger_than_max(window.min, max));
            }
            // One bound came from the artifact, so the override pushed the
            // window past it. Nothing in range rather than an error.
            warn!(
                "minSdk={} exceeds maxSdk={} after overrides; no SDKs in range",
                window.min, max
            );
        }

        Ok(window)
    }

    fn candidates(&self, window: SelectionWindow) -> Vec<ApiLevel> {
        let candidates: Vec<ApiLevel> = self.catalog.candidates(window.min, window.max).collect();
        debug!(
            "Candidates for window [{}, {}]: {:?}",
            window.min,
            window
                .max
                .map_or_else(|| "unbounded".to_string(), |max| max.to_string()),
            candidates
        );
        candidates
    }

    /// Closest candidate not above `target`, else the lowest candidate
    fn clip(&self, target: ApiLevel, window: SelectionWindow) -> Option<ApiLevel> {
        let candidates = self.candidates(window);
        candidates
            .iter()
            .rev()
            .find(|level| **level <= target)
            .or(candidates.first())
            .copied()
    }

    /// Check that an explicitly requested level is in the supported set
    fn supported_level(&self, level: ApiLevel) -> Result<ApiLevel, SelectionError> {
        if self.catalog.is_supported(level) {
            Ok(level)
        } else {
            Err(SelectionError::UnresolvableVersion {
                level,
                supported: self.catalog.supported().iter().copied().collect(),
            })
        }
    }
}

impl<P: SdkProvider> SdkPicker for DefaultSdkPicker<P> {
    fn select_sdks(
        &self,
        selection: &SdkSelection,
        uses_sdk: &UsesSdk,
    ) -> Result<Vec<Arc<Sdk>>, SelectionError> {
        validate_uses_sdk(uses_sdk)?;
        let window = Self::selection_window(selection, uses_sdk)?;

        let levels: BTreeSet<ApiLevel> = match &selection.request {
            SelectionRequest::Explicit(level) => BTreeSet::from([self.supported_level(*level)?]),
            SelectionRequest::ExplicitList(levels) => levels
                .iter()
                .copied()
                .collect::<IndexSet<ApiLevel>>()
                .into_iter()
                .map(|level| self.supported_level(level))
                .collect::<Result<_, _>>()?,
            SelectionRequest::AllSupported => self.candidates(window).into_iter().collect(),
            SelectionRequest::Oldest => {
                self.candidates(window).first().copied().into_iter().collect()
            }
            SelectionRequest::Newest => {
                self.candidates(window).last().copied().into_iter().collect()
            }
            SelectionRequest::Target | SelectionRequest::Default => {
                self.clip(uses_sdk.target_sdk, window).into_iter().collect()
            }
        };

        if levels.is_empty() {
            info!("No runnable SDKs for {:?}", selection.request);
        } else {
            info!("Selected SDKs {:?} for {:?}", levels, selection.request);
        }

        levels
            .into_iter()
            .map(|level| self.provider.resolve(level))
            .collect()
    }
}

/// Reject artifact windows that contradict themselves
fn validate_uses_sdk(uses_sdk: &UsesSdk) -> Result<(), SelectionError> {
    let UsesSdk {
        target_sdk,
        min_sdk,
        max_sdk,
    } = *uses_sdk;

    if let Some(max_sdk) = max_sdk.filter(|max_sdk| min_sdk > *max_sdk) {
        return Err(min_larger_than_max(min_sdk, max_sdk));
    }

    if target_sdk < min_sdk {
        return Err(SelectionError::InvalidConstraint(format!(
            "Package targetSdkVersion={} < minSdkVersion={}",
            target_sdk, min_sdk
        )));
    }

    if let Some(max_sdk) = max_sdk.filter(|max_sdk| target_sdk > *max_sdk) {
        return Err(SelectionError::InvalidConstraint(format!(
            "Package targetSdkVersion={} > maxSdkVersion={}",
            target_sdk, max_sdk
        )));
    }

    Ok(())
}

fn min_larger_than_max(min_sdk: ApiLevel, max_sdk: ApiLevel) -> SelectionError {
    SelectionError::InvalidConstraint(format!(
        "minSdk may not be larger than maxSdk (minSdk={}, maxSdk={})",
        min_sdk, max_sdk
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::provider::{DefaultSdkProvider, MockSdkProvider};
    use mockall::predicate::eq;
    use rstest::rstest;

    const SDK_INTS: &[u32] = &[16, 17, 18, 19, 21, 22, 23];

    fn levels(values: &[u32]) -> Vec<ApiLevel> {
        values.iter().copied().map(ApiLevel).collect()
    }

    fn picker() -> DefaultSdkPicker<DefaultSdkProvider> {
        DefaultSdkPicker::new(
            DefaultSdkProvider::new(levels(SDK_INTS)),
            SdkCatalog::new(levels(SDK_INTS)),
        )
    }

    fn selected(result: Vec<Arc<Sdk>>) -> Vec<u32> {
        result.iter().map(|sdk| sdk.api_level.get()).collect()
    }

    #[rstest]
    #[case(SelectionRequest::Explicit(ApiLevel(21)), &[21])]
    #[case(SelectionRequest::Oldest, &[19])]
    #[case(SelectionRequest::Target, &[21])]
    #[case(SelectionRequest::Default, &[21])]
    #[case(SelectionRequest::Newest, &[22])]
    #[case(SelectionRequest::AllSupported, &[19, 21, 22])]
    #[case(SelectionRequest::Explicit(ApiLevel(16)), &[16])] // below the window
    #[case(SelectionRequest::Explicit(ApiLevel(23)), &[23])] // above the window
    #[case(SelectionRequest::ExplicitList(levels(&[23, 16, 23])), &[16, 23])]
    #[case(SelectionRequest::ExplicitList(vec![]), &[])]
    fn select_sdks_dispatches_on_request(
        #[case] request: SelectionRequest,
        #[case] expected: &[u32],
    ) {
        let uses_sdk = UsesSdk::new(21).with_min_sdk(19).with_max_sdk(22);

        let result = picker()
            .select_sdks(&SdkSelection::new(request), &uses_sdk)
            .unwrap();

        assert_eq!(selected(result), expected);
    }

    #[rstest]
    #[case(
        UsesSdk::new(23).with_min_sdk(22).with_max_sdk(21),
        "minSdk may not be larger than maxSdk (minSdk=22, maxSdk=21)"
    )]
    #[case(UsesSdk::new(22).with_min_sdk(23), "Package targetSdkVersion=22 < minSdkVersion=23")]
    #[case(UsesSdk::new(22).with_max_sdk(21), "Package targetSdkVersion=22 > maxSdkVersion=21")]
    fn select_sdks_rejects_inconsistent_artifact_window(
        #[case] uses_sdk: UsesSdk,
        #[case] message: &str,
    ) {
        // Validation runs before dispatch, even for explicit requests.
        for request in [SelectionRequest::Default, SelectionRequest::Explicit(ApiLevel(21))] {
            let err = picker()
                .select_sdks(&SdkSelection::new(request), &uses_sdk)
                .unwrap_err();
            assert_eq!(err, SelectionError::InvalidConstraint(message.to_string()));
        }
    }

    #[test]
    fn select_sdks_rejects_inverted_overrides() {
        let selection = SdkSelection::new(SelectionRequest::AllSupported)
            .with_min_sdk(22)
            .with_max_sdk(21);

        let err = picker().select_sdks(&selection, &UsesSdk::new(23)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "minSdk may not be larger than maxSdk (minSdk=22, maxSdk=21)"
        );
    }

    #[test]
    fn select_sdks_returns_empty_when_single_override_inverts_window() {
        let selection = SdkSelection::new(SelectionRequest::AllSupported).with_min_sdk(24);
        let uses_sdk = UsesSdk::new(23).with_max_sdk(23);

        let result = picker().select_sdks(&selection, &uses_sdk).unwrap();

        assert!(result.is_empty());
    }

    #[rstest]
    #[case(1, &[16])] // below every supported SDK, clip up to the lowest
    #[case(20, &[19])] // missing from the catalog, clip down
    #[case(30, &[23])]
    fn default_clips_target_into_catalog(#[case] target: u32, #[case] expected: &[u32]) {
        let uses_sdk = UsesSdk::new(target);

        let result = picker()
            .select_sdks(&SdkSelection::default(), &uses_sdk)
            .unwrap();

        assert_eq!(selected(result), expected);
    }

    #[test]
    fn default_respects_enabled_subset() {
        let picker = DefaultSdkPicker::new(
            DefaultSdkProvider::new(levels(SDK_INTS)),
            SdkCatalog::new(levels(SDK_INTS)).with_enabled(levels(&[17, 18])),
        );

        let result = picker
            .select_sdks(&SdkSelection::default(), &UsesSdk::new(22))
            .unwrap();

        assert_eq!(selected(result), &[18]);
    }

    #[test]
    fn explicit_ignores_enabled_subset() {
        let picker = DefaultSdkPicker::new(
            DefaultSdkProvider::new(levels(SDK_INTS)),
            SdkCatalog::new(levels(SDK_INTS)).with_enabled(levels(&[17, 18])),
        );
        let selection = SdkSelection::new(SelectionRequest::Explicit(ApiLevel(23)));

        let result = picker.select_sdks(&selection, &UsesSdk::new(22)).unwrap();

        assert_eq!(selected(result), &[23]);
    }

    #[test]
    fn explicit_list_fails_on_first_unsupported_member() {
        let selection =
            SdkSelection::new(SelectionRequest::ExplicitList(levels(&[19, 20, 24])));

        let err = picker().select_sdks(&selection, &UsesSdk::new(22)).unwrap_err();

        assert_eq!(
            err,
            SelectionError::UnresolvableVersion {
                level: ApiLevel(20),
                supported: levels(SDK_INTS),
            }
        );
    }

    #[test]
    fn explicit_is_checked_against_catalog_before_provider() {
        let mut provider = MockSdkProvider::new();
        provider.expect_resolve().never();
        let picker = DefaultSdkPicker::new(provider, SdkCatalog::new(levels(&[21])));
        let selection = SdkSelection::new(SelectionRequest::Explicit(ApiLevel(22)));

        let err = picker.select_sdks(&selection, &UsesSdk::new(22)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "SDK 22 is not supported (supported SDKs: 21)"
        );
    }

    #[test]
    fn select_sdks_resolves_each_level_once_in_ascending_order() {
        let mut provider = MockSdkProvider::new();
        let mut sequence = mockall::Sequence::new();
        for level in [19, 21] {
            provider
                .expect_resolve()
                .with(eq(ApiLevel(level)))
                .times(1)
                .in_sequence(&mut sequence)
                .returning(|level| {
                    Ok(Arc::new(Sdk {
                        api_level: level,
                        codename: None,
                        version_name: None,
                    }))
                });
        }
        let picker = DefaultSdkPicker::new(provider, SdkCatalog::new(levels(&[19, 21])));
        let selection =
            SdkSelection::new(SelectionRequest::ExplicitList(levels(&[21, 19, 21])));

        let result = picker.select_sdks(&selection, &UsesSdk::new(21)).unwrap();

        assert_eq!(selected(result), &[19, 21]);
    }

    #[test]
    fn provider_errors_are_propagated() {
        let mut provider = MockSdkProvider::new();
        provider.expect_resolve().returning(|level| {
            Err(SelectionError::UnresolvableVersion {
                level,
                supported: vec![],
            })
        });
        let picker = DefaultSdkPicker::new(provider, SdkCatalog::new(levels(&[21])));

        let result = picker.select_sdks(&SdkSelection::default(), &UsesSdk::new(21));

        assert!(matches!(
            result,
            Err(SelectionError::UnresolvableVersion { level: ApiLevel(21), .. })
        ));
    }

    #[test]
    fn empty_catalog_selects_nothing_for_windowed_requests() {
        let picker =
            DefaultSdkPicker::new(DefaultSdkProvider::new(std::iter::empty()), SdkCatalog::default());

        for request in [
            SelectionRequest::AllSupported,
            SelectionRequest::Oldest,
            SelectionRequest::Newest,
            SelectionRequest::Target,
            SelectionRequest::Default,
        ] {
            let result = picker
                .select_sdks(&SdkSelection::new(request), &UsesSdk::new(21))
                .unwrap();
            assert!(result.is_empty());
        }
    }
}
