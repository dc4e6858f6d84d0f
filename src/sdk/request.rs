//! Selection requests

use crate::sdk::types::ApiLevel;

/// Which SDKs a test asks to run against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Exactly one named SDK, bypassing the artifact window
    Explicit(ApiLevel),
    /// Several named SDKs, bypassing the artifact window
    ExplicitList(Vec<ApiLevel>),
    /// Every supported SDK in the window
    AllSupported,
    /// Lowest supported SDK in the window
    Oldest,
    /// The artifact's target SDK, clipped into the window
    Target,
    /// No explicit selection; resolves like [`SelectionRequest::Target`]
    Default,
    /// Highest supported SDK in the window
    Newest,
}

/// A selection request together with the per-test min/max overrides
///
/// The overrides replace the artifact's declared bounds when forming the
/// selection window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkSelection {
    pub request: SelectionRequest,
    pub min_sdk: Option<ApiLevel>,
    pub max_sdk: Option<ApiLevel>,
}

impl SdkSelection {
    pub fn new(request: SelectionRequest) -> Self {
        Self {
            request,
            min_sdk: None,
            max_sdk: None,
        }
    }

    pub fn with_min_sdk(mut self, min_sdk: u32) -> Self {
        self.min_sdk = Some(ApiLevel(min_sdk));
        self
    }

    pub fn with_max_sdk(mut self, max_sdk: u32) -> Self {
        self.max_sdk = Some(ApiLevel(max_sdk));
        self
    }
}

impl Default for SdkSelection {
    fn default() -> Self {
        Self::new(SelectionRequest::Default)
    }
}

impl From<SelectionRequest> for SdkSelection {
    fn from(request: SelectionRequest) -> Self {
        Self::new(request)
    }
}
