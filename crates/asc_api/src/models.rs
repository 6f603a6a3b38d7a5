/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! JSON:API resource shapes for the endpoints this crate talks to.
//!
//! Only the attributes the update workflow reads are modelled; everything
//! else in a response document is ignored on decode.

use serde::{Deserialize, Serialize};

/// Resource type of an app-info localization, as sent in PATCH bodies.
pub const APP_INFO_LOCALIZATIONS: &str = "appInfoLocalizations";

/// A top-level JSON:API document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default)]
    pub links: DocumentLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentLinks {
    pub next: Option<String>,
}

/// A `{type, id}` pair pointing at another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLinkage {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Vec<ResourceLinkage>>,
}

impl Relationship {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.data.iter().flatten().map(|linkage| linkage.id.as_str())
    }
}

/// An application record (`apps`).
#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<AppAttributes>,
    #[serde(default)]
    pub relationships: Option<AppRelationships>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    pub bundle_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRelationships {
    #[serde(default)]
    pub app_infos: Option<Relationship>,
}

impl App {
    pub fn bundle_id(&self) -> Option<&str> {
        self.attributes.as_ref()?.bundle_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.as_ref()?.name.as_deref()
    }

    /// The app's localization groups, in server order.
    pub fn app_info_ids(&self) -> Vec<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.app_infos.as_ref())
            .map(|rel| rel.ids().collect())
            .unwrap_or_default()
    }
}

/// Pick the app matching `bundle_id` out of a filtered listing.
///
/// The filter endpoint can return more than one record; an exact bundle id
/// match wins, otherwise the first record is used.
pub fn select_app(apps: Vec<App>, bundle_id: &str) -> Option<App> {
    let exact = apps.iter().position(|app| app.bundle_id() == Some(bundle_id));
    let mut apps = apps;
    match exact {
        Some(index) => Some(apps.swap_remove(index)),
        None => apps.into_iter().next(),
    }
}

/// A per-locale app-info record (`appInfoLocalizations`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoLocalization {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<AppInfoLocalizationAttributes>,
}

impl AppInfoLocalization {
    pub fn locale(&self) -> Option<&str> {
        self.attributes.as_ref()?.locale.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoLocalizationAttributes {
    pub locale: Option<String>,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub privacy_choices_url: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub privacy_policy_text: Option<String>,
}

/// Partial attribute set for a PATCH. `None` fields are left untouched on the
/// server and are omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoLocalizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_choices_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy_text: Option<String>,
}

impl AppInfoLocalizationUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequest<'a> {
    pub data: UpdateRequestData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequestData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'a str,
    pub attributes: &'a AppInfoLocalizationUpdate,
}

impl<'a> UpdateRequest<'a> {
    pub(crate) fn new(id: &'a str, attributes: &'a AppInfoLocalizationUpdate) -> Self {
        Self {
            data: UpdateRequestData {
                kind: APP_INFO_LOCALIZATIONS,
                id,
                attributes,
            },
        }
    }
}
