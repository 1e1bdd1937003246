// ABOUTME: Shared HTTP client with connection pooling for remote store calls
// ABOUTME: Singleton pattern with configurable timeouts initialized at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::HttpClientConfig;

/// Configured timeouts for the shared client
static CLIENT_TIMEOUTS: OnceLock<HttpClientConfig> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Call once at startup before any remote store is built. Without it the
/// defaults apply (30s request timeout, 10s connect timeout).
pub fn initialize_shared_client(config: HttpClientConfig) {
    let _ = CLIENT_TIMEOUTS.set(config);
}

/// Get the shared HTTP client for remote store calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let config = CLIENT_TIMEOUTS.get().copied().unwrap_or_default();
        build_client(config)
    })
}

/// Build a standalone client with the given timeouts
#[must_use]
pub fn build_client(config: HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}
