// ABOUTME: Environment configuration management for backend selection and credentials
// ABOUTME: Parses environment variables into remote, local storage, and HTTP settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every setting comes from environment variables read once at startup.
//! Missing remote credentials are not an error: they are logged as a warning
//! and the session runs against the local fallback store.

use recipe_box_core::constants::{http, remote, storage};
use recipe_box_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which remote backend the session should try
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Row store over PostgREST (Supabase)
    Supabase,
    /// Document store over the Firestore REST API
    Firestore,
    /// No remote store; local fallback only
    Local,
}

impl BackendKind {
    /// Parse an explicit `RECIPE_BACKEND` value
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "supabase" | "rows" | "row-store" => Some(Self::Supabase),
            "firestore" | "firebase" | "documents" | "document-store" => Some(Self::Firestore),
            "local" | "offline" => Some(Self::Local),
            _ => None,
        }
    }

    /// Pick a backend from whichever credentials are present
    fn infer<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("SUPABASE_URL").is_some() {
            Self::Supabase
        } else if lookup("FIREBASE_PROJECT_ID").is_some() {
            Self::Firestore
        } else {
            Self::Local
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supabase => write!(f, "supabase"),
            Self::Firestore => write!(f, "firestore"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Row store credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g. `https://xyz.supabase.co`)
    pub url: String,
    /// Anonymous API key sent as `apikey` and bearer token
    pub anon_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &mask_secret(&self.anon_key))
            .finish()
    }
}

/// Document store credentials and endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Firebase project identifier
    pub project_id: String,
    /// Firestore database name
    pub database: String,
    /// Firebase ID token of the signed-in user
    pub id_token: String,
    /// UID of the signed-in user; scopes every query
    pub user_id: String,
    /// Firestore REST base URL (overridable for emulators)
    pub base_url: String,
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("id_token", &mask_secret(&self.id_token))
            .field("user_id", &self.user_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Fully configured remote backend
#[derive(Debug, Clone)]
pub enum RemoteBackendConfig {
    /// Row store
    Supabase(SupabaseConfig),
    /// Document store
    Firestore(FirebaseConfig),
}

/// Local fallback storage location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStoreConfig {
    /// Directory holding one JSON snapshot per storage key
    pub data_dir: PathBuf,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().map_or_else(
            || PathBuf::from(storage::FALLBACK_DATA_DIR),
            |dir| dir.join(storage::DATA_DIR_NAME),
        );
        Self { data_dir }
    }
}

/// Timeouts for the shared HTTP client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct RecipeBoxConfig {
    /// Requested backend
    pub backend: BackendKind,
    /// Remote backend settings; `None` when the backend is local or incomplete
    pub remote: Option<RemoteBackendConfig>,
    /// Local fallback storage
    pub local: LocalStoreConfig,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
}

impl RecipeBoxConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric setting is present but malformed.
    /// Missing credentials never fail; they disable the remote store.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric setting is present but malformed.
    pub fn from_lookup<F>(source: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| source(key).filter(|value| !value.trim().is_empty());

        let backend = match lookup("RECIPE_BACKEND") {
            Some(raw) => BackendKind::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unrecognized RECIPE_BACKEND, inferring from credentials");
                BackendKind::infer(&lookup)
            }),
            None => BackendKind::infer(&lookup),
        };

        let remote = match backend {
            BackendKind::Supabase => supabase_from(&lookup).map(RemoteBackendConfig::Supabase),
            BackendKind::Firestore => firebase_from(&lookup).map(RemoteBackendConfig::Firestore),
            BackendKind::Local => None,
        };

        let local = lookup("RECIPE_DATA_DIR").map_or_else(LocalStoreConfig::default, |dir| {
            LocalStoreConfig {
                data_dir: PathBuf::from(dir),
            }
        });

        let http = HttpClientConfig {
            timeout_secs: parse_secs(
                &lookup,
                "HTTP_CLIENT_TIMEOUT_SECS",
                http::DEFAULT_TIMEOUT_SECS,
            )?,
            connect_timeout_secs: parse_secs(
                &lookup,
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                http::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        let config = Self {
            backend,
            remote,
            local,
            http,
        };
        config.log_summary();
        Ok(config)
    }

    /// Whether a remote store can be attempted at all
    #[must_use]
    pub const fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    fn log_summary(&self) {
        info!(
            backend = %self.backend,
            remote_configured = self.has_remote(),
            data_dir = %self.local.data_dir.display(),
            http.timeout_secs = self.http.timeout_secs,
            "Configuration loaded"
        );
    }
}

fn supabase_from<F>(lookup: &F) -> Option<SupabaseConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup("SUPABASE_URL");
    let anon_key = lookup("SUPABASE_ANON_KEY");
    match (url, anon_key) {
        (Some(url), Some(anon_key)) => {
            info!(url = %url, anon_key = %mask_secret(&anon_key), "Supabase credentials found");
            Some(SupabaseConfig { url, anon_key })
        }
        (url, key) => {
            let missing = missing_names(&[
                ("SUPABASE_URL", url.is_none()),
                ("SUPABASE_ANON_KEY", key.is_none()),
            ]);
            warn!(
                missing = %missing,
                "Supabase credentials not found; remote store disabled, recipes will be kept locally"
            );
            None
        }
    }
}

fn firebase_from<F>(lookup: &F) -> Option<FirebaseConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let project_id = lookup("FIREBASE_PROJECT_ID");
    let id_token = lookup("FIREBASE_ID_TOKEN");
    let user_id = lookup("FIREBASE_USER_ID");
    match (project_id, id_token, user_id) {
        (Some(project_id), Some(id_token), Some(user_id)) => {
            info!(
                project_id = %project_id,
                user_id = %user_id,
                "Firebase credentials found"
            );
            Some(FirebaseConfig {
                project_id,
                database: lookup("FIRESTORE_DATABASE")
                    .unwrap_or_else(|| remote::FIRESTORE_DEFAULT_DATABASE.to_owned()),
                id_token,
                user_id,
                base_url: lookup("FIRESTORE_BASE_URL")
                    .unwrap_or_else(|| remote::FIRESTORE_BASE_URL.to_owned()),
            })
        }
        (project_id, id_token, user_id) => {
            let missing = missing_names(&[
                ("FIREBASE_PROJECT_ID", project_id.is_none()),
                ("FIREBASE_ID_TOKEN", id_token.is_none()),
                ("FIREBASE_USER_ID", user_id.is_none()),
            ]);
            warn!(
                missing = %missing,
                "Firebase session not found; remote store disabled, recipes will be kept locally"
            );
            None
        }
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| {
                AppError::config(format!("Invalid {key} value: {raw}")).with_source(e)
            })
    })
}

fn missing_names(checks: &[(&str, bool)]) -> String {
    checks
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Mask a credential for logs, keeping only its first four characters
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}
