/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::{Path, PathBuf};

use asc_api::{ApiKey, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ISSUER_ID_ENV: &str = "ASC_ISSUER_ID";
pub const KEY_ID_ENV: &str = "ASC_KEY_ID";
pub const PRIVATE_KEY_PATH_ENV: &str = "ASC_PRIVATE_KEY_PATH";

/// Files checked, in order, when no `--config` is given.
pub const PROJECT_CONFIG_PATHS: [&str; 2] = [".appinfo-update.toml", "appinfo/config.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{what} required (--{flag}, {env} env, or [credentials] {key} in the config file)")]
    Missing {
        what: &'static str,
        flag: &'static str,
        env: &'static str,
        key: &'static str,
    },

    #[error(transparent)]
    Key(#[from] asc_api::ApiError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the first project config found under `dir`, if any.
    pub fn load_from_project(dir: &Path) -> Result<Option<Self>, ConfigError> {
        for candidate in PROJECT_CONFIG_PATHS {
            let path = dir.join(candidate);
            if path.is_file() {
                return Self::load(&path).map(Some);
            }
        }

        Ok(None)
    }
}

/// Credential values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CredentialArgs {
    pub issuer_id: Option<String>,
    pub key_id: Option<String>,
    pub private_key: Option<PathBuf>,
}

/// Fully resolved credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub issuer_id: String,
    pub key_id: String,
    pub private_key_path: PathBuf,
}

impl Credentials {
    /// Merge sources with precedence flag, then environment, then config file.
    ///
    /// `env` is injected so callers can pass `std::env::var` or a fixed map.
    pub fn resolve(
        args: &CredentialArgs,
        env: impl Fn(&str) -> Option<String>,
        config: &CredentialsConfig,
    ) -> Result<Self, ConfigError> {
        let issuer_id = args
            .issuer_id
            .clone()
            .or_else(|| env(ISSUER_ID_ENV))
            .or_else(|| config.issuer_id.clone())
            .ok_or(ConfigError::Missing {
                what: "API issuer id",
                flag: "issuer-id",
                env: ISSUER_ID_ENV,
                key: "issuer_id",
            })?;

        let key_id = args
            .key_id
            .clone()
            .or_else(|| env(KEY_ID_ENV))
            .or_else(|| config.key_id.clone())
            .ok_or(ConfigError::Missing {
                what: "API key id",
                flag: "key-id",
                env: KEY_ID_ENV,
                key: "key_id",
            })?;

        let private_key_path = args
            .private_key
            .clone()
            .or_else(|| env(PRIVATE_KEY_PATH_ENV).map(PathBuf::from))
            .or_else(|| config.private_key_path.clone())
            .ok_or(ConfigError::Missing {
                what: "API private key",
                flag: "private-key",
                env: PRIVATE_KEY_PATH_ENV,
                key: "private_key_path",
            })?;

        Ok(Self {
            issuer_id,
            key_id,
            private_key_path,
        })
    }

    pub fn load_key(&self) -> Result<ApiKey, ConfigError> {
        Ok(ApiKey::from_private_key_file(
            &self.issuer_id,
            &self.key_id,
            &self.private_key_path,
        )?)
    }
}
