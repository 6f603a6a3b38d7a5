/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fmt;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::auth::{ApiKey, TokenProvider};
use crate::models::{
    App, AppInfoLocalization, AppInfoLocalizationUpdate, Document, UpdateRequest, select_app,
};
use crate::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// Page size requested for localization listings.
const PAGE_LIMIT: &str = "200";

/// The remote operations the update workflow depends on.
///
/// [`AppStoreConnectClient`] is the production implementation; tests supply
/// in-memory doubles.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Look up an app by bundle id, including its app infos and versions.
    async fn find_app(&self, bundle_id: &str) -> Result<App, ApiError>;

    /// List every localization of one app info, following pagination.
    async fn list_app_info_localizations(
        &self,
        app_info_id: &str,
    ) -> Result<Vec<AppInfoLocalization>, ApiError>;

    /// Patch a localization with a partial attribute set.
    async fn update_app_info_localization(
        &self,
        localization_id: &str,
        attributes: &AppInfoLocalizationUpdate,
    ) -> Result<AppInfoLocalization, ApiError>;
}

/// HTTP client for the metadata API.
pub struct AppStoreConnectClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl AppStoreConnectClient {
    pub fn new(key: &ApiKey) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("asc_api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            tokens: TokenProvider::new(key)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, url: &str) -> Result<RequestBuilder, ApiError> {
        debug!(%method, url, "API request");
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(self.tokens.bearer()?))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_error_body(status.as_u16(), &body))
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Document<T>, ApiError> {
        let request = self.request(Method::GET, url)?.query(query);
        let bytes = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl fmt::Debug for AppStoreConnectClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppStoreConnectClient")
            .field("base_url", &self.base_url)
            .field("tokens", &self.tokens)
            .finish()
    }
}

#[async_trait]
impl MetadataApi for AppStoreConnectClient {
    async fn find_app(&self, bundle_id: &str) -> Result<App, ApiError> {
        let document: Document<Vec<App>> = self
            .get_document(
                &self.url("/v1/apps"),
                &[
                    ("filter[bundleId]", bundle_id),
                    ("include", "appInfos,appStoreVersions"),
                ],
            )
            .await?;

        let app = select_app(document.data, bundle_id)
            .ok_or_else(|| ApiError::AppNotFound(bundle_id.to_string()))?;
        info!(
            app_id = %app.id,
            name = app.name().unwrap_or_default(),
            bundle_id,
            "resolved app"
        );
        Ok(app)
    }

    async fn list_app_info_localizations(
        &self,
        app_info_id: &str,
    ) -> Result<Vec<AppInfoLocalization>, ApiError> {
        let mut localizations = Vec::new();
        let mut document: Document<Vec<AppInfoLocalization>> = self
            .get_document(
                &self.url(&format!("/v1/appInfos/{app_info_id}/appInfoLocalizations")),
                &[("limit", PAGE_LIMIT)],
            )
            .await?;

        loop {
            localizations.append(&mut document.data);
            let Some(next) = document.links.next.take() else {
                break;
            };
            // `next` already carries the query string.
            document = self.get_document(&next, &[]).await?;
        }

        info!(app_info_id, count = localizations.len(), "fetched localizations");
        Ok(localizations)
    }

    async fn update_app_info_localization(
        &self,
        localization_id: &str,
        attributes: &AppInfoLocalizationUpdate,
    ) -> Result<AppInfoLocalization, ApiError> {
        let url = self.url(&format!("/v1/appInfoLocalizations/{localization_id}"));
        let request = self
            .request(Method::PATCH, &url)?
            .json(&UpdateRequest::new(localization_id, attributes));

        let bytes = self.send(request).await?.bytes().await?;
        let document: Document<AppInfoLocalization> = serde_json::from_slice(&bytes)?;
        Ok(document.data)
    }
}
