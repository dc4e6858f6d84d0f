//! Common types for SDK selection

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform API level (e.g. 19 for KitKat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// The lowest API level an artifact can declare
    pub const MIN: ApiLevel = ApiLevel(1);

    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

/// Compatibility window declared by the artifact under test
///
/// Populated once from the artifact's manifest and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsesSdk {
    /// SDK the artifact is built against
    pub target_sdk: ApiLevel,
    /// Lowest SDK the artifact supports (1 when the manifest is silent)
    pub min_sdk: ApiLevel,
    /// Highest SDK the artifact supports, `None` when unbounded
    pub max_sdk: Option<ApiLevel>,
}

impl UsesSdk {
    pub fn new(target_sdk: u32) -> Self {
        Self {
            target_sdk: ApiLevel(target_sdk),
            min_sdk: ApiLevel::MIN,
            max_sdk: None,
        }
    }

    pub fn with_min_sdk(mut self, min_sdk: u32) -> Self {
        self.min_sdk = ApiLevel(min_sdk);
        self
    }

    pub fn with_max_sdk(mut self, max_sdk: u32) -> Self {
        self.max_sdk = Some(ApiLevel(max_sdk));
        self
    }
}

/// Descriptor for one SDK the host can build an environment for
///
/// Identity is the API level; codename and version name are metadata taken
/// from the release table and are absent for levels it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sdk {
    pub api_level: ApiLevel,
    pub codename: Option<&'static str>,
    pub version_name: Option<&'static str>,
}

impl fmt::Display for Sdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.codename, self.version_name) {
            (Some(codename), Some(version)) => {
                write!(f, "{} ({}, {})", self.api_level, codename, version)
            }
            _ => write!(f, "{}", self.api_level),
        }
    }
}
