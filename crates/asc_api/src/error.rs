/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the metadata API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {title}{}", .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Status {
        status: u16,
        title: String,
        detail: Option<String>,
    },

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no app found for bundle id '{0}'")]
    AppNotFound(String),

    #[error("failed to sign API token: {0}")]
    Auth(#[from] jsonwebtoken::errors::Error),

    #[error("failed to read private key {path:?}: {source}")]
    Key {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    title: Option<String>,
    detail: Option<String>,
    code: Option<String>,
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a non-success response body.
    ///
    /// JSON:API error documents contribute the first error's title and detail;
    /// anything else is carried through as the detail text.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let first = serde_json::from_str::<ErrorDocument>(body)
            .ok()
            .and_then(|doc| doc.errors.into_iter().next());

        match first {
            Some(err) => ApiError::Status {
                status,
                title: err
                    .title
                    .or(err.code)
                    .unwrap_or_else(|| "request failed".to_string()),
                detail: err.detail,
            },
            None => ApiError::Status {
                status,
                title: "request failed".to_string(),
                detail: Some(body.trim().to_string()).filter(|b| !b.is_empty()),
            },
        }
    }

    /// Returns the HTTP status for errors that came back from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
