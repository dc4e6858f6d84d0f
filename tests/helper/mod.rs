//! Shared fixtures for picker tests
#![allow(dead_code)]

use std::sync::Arc;

use sdk_picker::sdk::{ApiLevel, DefaultSdkPicker, DefaultSdkProvider, Sdk, SdkCatalog, SdkProvider};

/// Catalog used throughout the picker tests
pub const SDK_INTS: &[u32] = &[16, 17, 18, 19, 21, 22, 23];

pub fn levels(values: &[u32]) -> Vec<ApiLevel> {
    values.iter().copied().map(ApiLevel).collect()
}

pub fn provider() -> DefaultSdkProvider {
    DefaultSdkProvider::new(levels(SDK_INTS))
}

/// Picker over [`SDK_INTS`], optionally restricted to `enabled`
pub fn picker(enabled: Option<&[u32]>) -> DefaultSdkPicker<DefaultSdkProvider> {
    let catalog = SdkCatalog::new(levels(SDK_INTS));
    let catalog = match enabled {
        Some(enabled) => catalog.with_enabled(levels(enabled)),
        None => catalog,
    };
    DefaultSdkPicker::new(provider(), catalog)
}

pub fn sdks(values: &[u32]) -> Vec<Arc<Sdk>> {
    let provider = provider();
    values
        .iter()
        .map(|value| provider.resolve(ApiLevel(*value)).unwrap())
        .collect()
}

pub fn api_levels(sdks: &[Arc<Sdk>]) -> Vec<u32> {
    sdks.iter().map(|sdk| sdk.api_level.get()).collect()
}
