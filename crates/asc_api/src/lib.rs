/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Client for the App Store Connect metadata API
//!
//! This crate covers the small slice of the API needed to maintain an app's
//! per-locale app-info metadata: looking up an app by bundle id, listing the
//! localizations of its app info, and patching a localization.
//!
//! Requests are authenticated with ES256 tokens minted from a team API key
//! (see [`auth`]). Callers depend on the [`MetadataApi`] trait rather than the
//! concrete [`AppStoreConnectClient`], so alternative implementations can be
//! substituted in tests.
//!
//! # Example
//!
//! ```no_run
//! use asc_api::{ApiKey, AppStoreConnectClient, MetadataApi};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), asc_api::ApiError> {
//! let key = ApiKey::from_private_key_file(
//!     "69a6de7f-0000-47e3-e053-5b8c7c11a4d1",
//!     "2X9R4HXF34",
//!     Path::new("AuthKey_2X9R4HXF34.p8"),
//! )?;
//! let client = AppStoreConnectClient::new(&key)?;
//!
//! let app = client.find_app("com.example.lens").await?;
//! for app_info_id in app.app_info_ids() {
//!     let localizations = client.list_app_info_localizations(app_info_id).await?;
//!     println!("{} localizations", localizations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::{ApiKey, TokenProvider};
pub use client::{AppStoreConnectClient, DEFAULT_BASE_URL, MetadataApi};
pub use error::ApiError;
pub use models::{
    App, AppInfoLocalization, AppInfoLocalizationAttributes, AppInfoLocalizationUpdate, Document,
    ResourceLinkage,
};
