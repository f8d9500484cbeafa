// ABOUTME: Shared HTTP client with connection pooling for catalog and OAuth calls
// ABOUTME: Process-wide singleton whose timeouts are fixed once at server startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Fix the shared client's timeouts
///
/// Only the first call has an effect, and only if no client was built yet.
/// Without it the client uses a 30s request timeout and 10s connect timeout.
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    if CLIENT_TIMEOUTS
        .set((timeout_secs, connect_timeout_secs))
        .is_err()
    {
        warn!("Shared HTTP client timeouts already initialized, ignoring new values");
    }
}

/// The pooled client used for every outbound call
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .user_agent(concat!("paceify/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
