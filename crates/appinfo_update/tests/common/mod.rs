/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use asc_api::{ApiError, App, AppInfoLocalization, AppInfoLocalizationUpdate, MetadataApi};
use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

pub const BUNDLE_ID: &str = "com.example.lens";
pub const APP_ID: &str = "1465218347";
pub const APP_INFO_ID: &str = "info-current";

/// Create a folder holding the given `(file name, content)` pairs.
pub fn locale_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

/// A cloneable sink for pipeline progress output.
#[derive(Clone, Default)]
pub struct Output(Arc<Mutex<Vec<u8>>>);

impl Output {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// In-memory API that serves one app and records every update.
pub struct FakeApi {
    localizations: Vec<AppInfoLocalization>,
    app_info_ids: Vec<&'static str>,
    failing_update: Option<String>,
    listed: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, AppInfoLocalizationUpdate)>>,
}

impl FakeApi {
    /// `localizations` are `(id, locale)` pairs in server order.
    pub fn new(localizations: &[(&str, &str)]) -> Self {
        let localizations = localizations
            .iter()
            .map(|(id, locale)| {
                serde_json::from_value(json!({
                    "type": "appInfoLocalizations",
                    "id": id,
                    "attributes": { "locale": locale }
                }))
                .unwrap()
            })
            .collect();

        Self {
            localizations,
            app_info_ids: vec![APP_INFO_ID, "info-previous"],
            failing_update: None,
            listed: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_update(mut self, localization_id: &str) -> Self {
        self.failing_update = Some(localization_id.to_string());
        self
    }

    pub fn without_app_infos(mut self) -> Self {
        self.app_info_ids.clear();
        self
    }

    pub fn updates(&self) -> Vec<(String, AppInfoLocalizationUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn updated_ids(&self) -> Vec<String> {
        self.updates().into_iter().map(|(id, _)| id).collect()
    }

    pub fn listed_app_infos(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataApi for FakeApi {
    async fn find_app(&self, bundle_id: &str) -> Result<App, ApiError> {
        if bundle_id != BUNDLE_ID {
            return Err(ApiError::AppNotFound(bundle_id.to_string()));
        }

        let app_infos: Vec<_> = self
            .app_info_ids
            .iter()
            .map(|id| json!({ "type": "appInfos", "id": id }))
            .collect();

        Ok(serde_json::from_value(json!({
            "type": "apps",
            "id": APP_ID,
            "attributes": { "bundleId": BUNDLE_ID, "name": "Lens" },
            "relationships": {
                "appInfos": { "data": app_infos },
                "appStoreVersions": { "data": [] }
            }
        }))
        .unwrap())
    }

    async fn list_app_info_localizations(
        &self,
        app_info_id: &str,
    ) -> Result<Vec<AppInfoLocalization>, ApiError> {
        self.listed.lock().unwrap().push(app_info_id.to_string());
        Ok(self.localizations.clone())
    }

    async fn update_app_info_localization(
        &self,
        localization_id: &str,
        attributes: &AppInfoLocalizationUpdate,
    ) -> Result<AppInfoLocalization, ApiError> {
        if self.failing_update.as_deref() == Some(localization_id) {
            return Err(ApiError::from_error_body(
                409,
                r#"{"errors":[{"status":"409","title":"An attribute value is invalid."}]}"#,
            ));
        }

        self.updates
            .lock()
            .unwrap()
            .push((localization_id.to_string(), attributes.clone()));

        Ok(self
            .localizations
            .iter()
            .find(|l| l.id == localization_id)
            .cloned()
            .unwrap())
    }
}
