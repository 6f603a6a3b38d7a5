/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Push localized app-info metadata to App Store Connect
//!
//! Each remote app-info localization is matched to a `<locale>.json` file in a
//! local folder (falling back from `en-GB` to `en`, and from `no` to `nb`),
//! checked against the platform's character limits, and submitted.
//!
//! The [`pipeline::Pipeline`] is generic over [`asc_api::MetadataApi`], so the
//! whole flow can run against an in-memory API in tests.

pub mod config;
pub mod error;
pub mod files;
pub mod locale;
pub mod pipeline;
pub mod report;
pub mod validation;

pub use error::{LocaleError, PipelineError};
pub use files::{LocaleDirectory, LocalizationFile, ResolvedLocale};
pub use locale::fallback_locale;
pub use pipeline::{Pipeline, PipelineOptions};
pub use report::{LocaleOutcome, LocaleReport, RunReport};
pub use validation::{ValidationError, is_within_limit, validate};
