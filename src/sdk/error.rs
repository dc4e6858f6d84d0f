use thiserror::Error;

use crate::sdk::types::ApiLevel;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Inconsistent artifact window or min/max overrides
    #[error("{0}")]
    InvalidConstraint(String),

    #[error("SDK {level} is not supported (supported SDKs: {})", join_levels(.supported))]
    UnresolvableVersion {
        level: ApiLevel,
        supported: Vec<ApiLevel>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseNameError {
    #[error("Unknown release name: {0}")]
    UnknownReleaseName(String),

    #[error("Invalid API level: {0}")]
    InvalidApiLevel(String),
}

fn join_levels(levels: &[ApiLevel]) -> String {
    levels
        .iter()
        .map(ApiLevel::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
