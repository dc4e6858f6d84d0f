//! SDK selection layer
//!
//! This module decides which platform API levels a test artifact runs against,
//! given its declared compatibility window, the per-test selection and the
//! catalog of SDKs the host can build.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────▶│   Picker    │◀────│  Selection  │
//! │ (supported, │     │  (validate, │     │  (request,  │
//! │  enabled)   │     │  dispatch)  │     │  overrides) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Provider   │────▶│  Release    │
//!                     │ (level→Sdk) │     │   table     │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Supported SDK levels plus an optional enabled subset
//! - [`error`]: Error types for selection and release-name parsing
//! - [`picker`]: The selection algorithm (`SdkPicker`, `DefaultSdkPicker`)
//! - [`provider`]: Resolves API levels to shared `Sdk` descriptors
//! - [`release`]: Known release codenames and the SDK list parser
//! - [`request`]: Selection request variants and min/max overrides
//! - [`types`]: Common types like `ApiLevel`, `UsesSdk` and `Sdk`

pub mod catalog;
pub mod error;
pub mod picker;
pub mod provider;
pub mod release;
pub mod request;
pub mod types;

pub use catalog::SdkCatalog;
pub use error::{ReleaseNameError, SelectionError};
pub use picker::{DefaultSdkPicker, SdkPicker};
pub use provider::{DefaultSdkProvider, SdkProvider};
pub use release::parse_sdk_list;
pub use request::{SdkSelection, SelectionRequest};
pub use types::{ApiLevel, Sdk, UsesSdk};
