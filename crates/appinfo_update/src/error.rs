/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use asc_api::ApiError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Why a single remote localization was not updated.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("localization {id} has no locale")]
    MissingRemoteLocale { id: String },

    #[error("no localization file found for '{locale}.json' or '{fallback}.json'")]
    MissingLocalFile { locale: String, fallback: String },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("update failed: {0}")]
    Remote(#[from] ApiError),
}

impl LocaleError {
    /// Skips are expected outcomes; everything else is a failure.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            LocaleError::MissingRemoteLocale { .. }
                | LocaleError::MissingLocalFile { .. }
                | LocaleError::Validation(_)
        )
    }
}

/// Errors that stop the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to look up app '{bundle_id}': {source}")]
    FindApp {
        bundle_id: String,
        #[source]
        source: ApiError,
    },

    #[error("app '{0}' has no app info to localize")]
    NoAppInfo(String),

    #[error("failed to list localizations of app info {app_info_id}: {source}")]
    ListLocalizations {
        app_info_id: String,
        #[source]
        source: ApiError,
    },

    #[error("aborted at {locale}: {source}")]
    Aborted {
        locale: String,
        #[source]
        source: LocaleError,
    },
}
