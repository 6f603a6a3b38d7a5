/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::{Path, PathBuf};

use asc_api::AppInfoLocalizationUpdate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LocaleError;
use crate::locale::fallback_locale;

/// The metadata for one locale as stored on disk in `<locale>.json`.
///
/// Every field is optional; absent fields are left untouched remotely.
/// The URL keys may also be spelled `privacyChoicesUrl` and
/// `privacyPolicyUrl`, but a file must not use both spellings of one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocalizationFile")]
pub struct LocalizationFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "privacyChoicesURL", skip_serializing_if = "Option::is_none")]
    pub privacy_choices_url: Option<String>,
    #[serde(rename = "privacyPolicyURL", skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    #[serde(rename = "privacyPolicyText", skip_serializing_if = "Option::is_none")]
    pub privacy_policy_text: Option<String>,
}

#[derive(Deserialize)]
struct RawLocalizationFile {
    name: Option<String>,
    subtitle: Option<String>,
    #[serde(rename = "privacyChoicesURL")]
    privacy_choices_url: Option<String>,
    #[serde(rename = "privacyChoicesUrl")]
    privacy_choices_url_alt: Option<String>,
    #[serde(rename = "privacyPolicyURL")]
    privacy_policy_url: Option<String>,
    #[serde(rename = "privacyPolicyUrl")]
    privacy_policy_url_alt: Option<String>,
    #[serde(rename = "privacyPolicyText")]
    privacy_policy_text: Option<String>,
}

fn one_spelling(
    key: &str,
    primary: Option<String>,
    alt: Option<String>,
) -> Result<Option<String>, String> {
    match (primary, alt) {
        (Some(_), Some(_)) => Err(format!(
            "both '{key}URL' and '{key}Url' are set; keep one of them"
        )),
        (primary, alt) => Ok(primary.or(alt)),
    }
}

impl TryFrom<RawLocalizationFile> for LocalizationFile {
    type Error = String;

    fn try_from(raw: RawLocalizationFile) -> Result<Self, Self::Error> {
        Ok(Self {
            name: raw.name,
            subtitle: raw.subtitle,
            privacy_choices_url: one_spelling(
                "privacyChoices",
                raw.privacy_choices_url,
                raw.privacy_choices_url_alt,
            )?,
            privacy_policy_url: one_spelling(
                "privacyPolicy",
                raw.privacy_policy_url,
                raw.privacy_policy_url_alt,
            )?,
            privacy_policy_text: raw.privacy_policy_text,
        })
    }
}

impl From<LocalizationFile> for AppInfoLocalizationUpdate {
    fn from(file: LocalizationFile) -> Self {
        Self {
            name: file.name,
            subtitle: file.subtitle,
            privacy_choices_url: file.privacy_choices_url,
            privacy_policy_url: file.privacy_policy_url,
            privacy_policy_text: file.privacy_policy_text,
        }
    }
}

/// A local file chosen for a remote locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    /// Locale the file is named after.
    pub locale: String,
    pub path: PathBuf,
    pub is_fallback: bool,
}

/// The folder of `<locale>.json` files.
#[derive(Debug, Clone)]
pub struct LocaleDirectory {
    pub root: PathBuf,
}

impl LocaleDirectory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.json", locale))
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.path_for(locale).is_file()
    }

    /// Find the file for a remote locale: the exact code first, then its
    /// fallback.
    pub fn resolve(&self, remote_locale: &str) -> Option<ResolvedLocale> {
        let fallback = fallback_locale(remote_locale);

        let (locale, is_fallback) = if self.contains(remote_locale) {
            (remote_locale, false)
        } else if self.contains(fallback) {
            (fallback, fallback != remote_locale)
        } else {
            debug!(remote_locale, fallback, "no localization file");
            return None;
        };

        Some(ResolvedLocale {
            locale: locale.to_string(),
            path: self.path_for(locale),
            is_fallback,
        })
    }

    /// Read and parse one resolved file.
    pub fn load(&self, resolved: &ResolvedLocale) -> Result<LocalizationFile, LocaleError> {
        let path = &resolved.path;
        let content = fs::read_to_string(path).map_err(|source| LocaleError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| LocaleError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Locales of every `.json` file in the folder, sorted.
    pub fn locales(&self) -> Result<Vec<String>, std::io::Error> {
        let mut locales = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            if path.is_file()
                && path.extension().and_then(|s| s.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                locales.push(stem.to_string());
            }
        }

        locales.sort();
        Ok(locales)
    }
}
