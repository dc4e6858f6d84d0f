use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::sdk::{
    ApiLevel, DefaultSdkPicker, DefaultSdkProvider, ReleaseNameError, SdkCatalog, SdkSelection,
    SelectionRequest, UsesSdk, parse_sdk_list,
};

// =============================================================================
// Environment
// =============================================================================

/// Overrides `enabledSdks` from the config file (e.g. "KITKAT,21")
pub const ENABLED_SDKS_ENV: &str = "SDK_PICKER_ENABLED_SDKS";

/// Log filter directives for the binary (e.g. "sdk_picker=debug")
pub const LOG_FILTER_ENV: &str = "SDK_PICKER_LOG";

/// Filter used when `SDK_PICKER_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid SDK list: {0}")]
    ReleaseName(#[from] ReleaseNameError),
}

// =============================================================================
// Per-test selection
// =============================================================================

/// The `sdk` field of a test configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSdkList")]
pub enum SdkSpec {
    /// One or more named SDKs
    Levels(Vec<ApiLevel>),
    All,
    Oldest,
    Target,
    Newest,
}

impl FromStr for SdkSpec {
    type Err = ReleaseNameError;

    /// Accepts a sentinel word (`all`, `oldest`, `target`, `newest`, or the
    /// `ALL_SDKS` style spellings) or an SDK list such as `"KITKAT, 21"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_sdks" => Ok(SdkSpec::All),
            "oldest" | "oldest_sdk" => Ok(SdkSpec::Oldest),
            "target" | "target_sdk" => Ok(SdkSpec::Target),
            "newest" | "newest_sdk" => Ok(SdkSpec::Newest),
            _ => parse_sdk_list(s).map(SdkSpec::Levels),
        }
    }
}

impl TryFrom<RawSdkList> for SdkSpec {
    type Error = ReleaseNameError;

    fn try_from(raw: RawSdkList) -> Result<Self, Self::Error> {
        match raw {
            RawSdkList::Text(text) => text.parse(),
            raw => raw.into_levels().map(SdkSpec::Levels),
        }
    }
}

/// SDK selection for one test, as written in configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SdkConfig {
    pub sdk: Option<SdkSpec>,
    pub min_sdk: Option<ApiLevel>,
    pub max_sdk: Option<ApiLevel>,
}

impl SdkConfig {
    /// Convert into the request the picker understands
    ///
    /// Without an `sdk` value, a `minSdk` or `maxSdk` override selects every
    /// SDK in the overridden range.
    pub fn selection(&self) -> SdkSelection {
        let has_range = self.min_sdk.is_some() || self.max_sdk.is_some();

        let request = match &self.sdk {
            Some(SdkSpec::All) => SelectionRequest::AllSupported,
            Some(SdkSpec::Oldest) => SelectionRequest::Oldest,
            Some(SdkSpec::Target) => SelectionRequest::Target,
            Some(SdkSpec::Newest) => SelectionRequest::Newest,
            Some(SdkSpec::Levels(levels)) => match levels.as_slice() {
                [] if has_range => SelectionRequest::AllSupported,
                [] => SelectionRequest::Default,
                [level] => SelectionRequest::Explicit(*level),
                _ => SelectionRequest::ExplicitList(levels.clone()),
            },
            None if has_range => SelectionRequest::AllSupported,
            None => SelectionRequest::Default,
        };

        SdkSelection {
            request,
            min_sdk: self.min_sdk,
            max_sdk: self.max_sdk,
        }
    }
}

// =============================================================================
// Artifact manifest
// =============================================================================

/// `uses-sdk` attributes of the artifact under test
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    pub target_sdk_version: ApiLevel,
    #[serde(default = "default_min_sdk_version")]
    pub min_sdk_version: ApiLevel,
    #[serde(default)]
    pub max_sdk_version: Option<ApiLevel>,
}

fn default_min_sdk_version() -> ApiLevel {
    ApiLevel::MIN
}

impl From<ManifestConfig> for UsesSdk {
    fn from(manifest: ManifestConfig) -> Self {
        UsesSdk {
            target_sdk: manifest.target_sdk_version,
            min_sdk: manifest.min_sdk_version,
            max_sdk: manifest.max_sdk_version,
        }
    }
}

// =============================================================================
// Host catalog
// =============================================================================

/// SDK list written either as an array of levels or as a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawSdkList {
    Level(u32),
    Levels(Vec<u32>),
    Text(String),
}

impl RawSdkList {
    fn into_levels(self) -> Result<Vec<ApiLevel>, ReleaseNameError> {
        let levels = match self {
            RawSdkList::Level(level) => vec![level],
            RawSdkList::Levels(levels) => levels,
            RawSdkList::Text(text) => return parse_sdk_list(&text),
        };

        levels
            .into_iter()
            .map(|level| match level {
                0 => Err(ReleaseNameError::InvalidApiLevel(level.to_string())),
                level => Ok(ApiLevel(level)),
            })
            .collect()
    }
}

/// Parsed SDK list from configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSdkList")]
pub struct SdkList(pub Vec<ApiLevel>);

impl TryFrom<RawSdkList> for SdkList {
    type Error = ReleaseNameError;

    fn try_from(raw: RawSdkList) -> Result<Self, Self::Error> {
        raw.into_levels().map(SdkList)
    }
}

/// Host configuration: which SDKs can be built and which are enabled
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    /// Defaults to every known release
    pub supported_sdks: Option<SdkList>,
    /// Defaults to no restriction
    pub enabled_sdks: Option<SdkList>,
}

impl PickerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace `enabled_sdks` with `$SDK_PICKER_ENABLED_SDKS` when it is set
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_enabled_sdks_env(std::env::var(ENABLED_SDKS_ENV).ok())
    }

    fn with_enabled_sdks_env(mut self, enabled_sdks: Option<String>) -> Result<Self, ConfigError> {
        if let Some(text) = enabled_sdks.filter(|text| !text.trim().is_empty()) {
            self.enabled_sdks = Some(SdkList(parse_sdk_list(&text)?));
        }
        Ok(self)
    }

    pub fn catalog(&self) -> SdkCatalog {
        let catalog = match &self.supported_sdks {
            Some(SdkList(levels)) => SdkCatalog::new(levels.iter().copied()),
            None => SdkCatalog::new(DefaultSdkProvider::known().levels()),
        };

        match &self.enabled_sdks {
            Some(SdkList(levels)) => catalog.with_enabled(levels.iter().copied()),
            None => catalog,
        }
    }

    /// Build a picker whose provider covers exactly the supported SDKs
    pub fn picker(&self) -> DefaultSdkPicker<DefaultSdkProvider> {
        let catalog = self.catalog();
        let provider = DefaultSdkProvider::new(catalog.supported().iter().copied());
        DefaultSdkPicker::new(provider, catalog)
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Returns the path to the data directory for sdk-picker.
/// Uses $XDG_DATA_HOME/sdk-picker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/sdk-picker,
/// or ./sdk-picker if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("sdk-picker.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("sdk-picker")
}
