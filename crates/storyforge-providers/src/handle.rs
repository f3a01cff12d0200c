//! Lazily built, credential-fingerprinted HTTP client handle.
//!
//! Providers keep one `ClientHandle` instead of a global client. The handle
//! hashes the credential it built the client with; if the key changes
//! between calls (e.g. reloaded from the environment), the client is rebuilt
//! before the next request. Rebuilds are guarded by a mutex so concurrent
//! callers never observe a half-initialized client.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::Duration;

/// Per-request timeout for provider HTTP calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A connection-pooled `reqwest::Client` tied to a credential fingerprint.
pub struct ClientHandle {
    inner: Mutex<Option<(u64, reqwest::Client)>>,
}

impl ClientHandle {
    pub fn new() -> Self {
        ClientHandle {
            inner: Mutex::new(None),
        }
    }

    /// Get a client valid for `api_key`, rebuilding if the key changed
    /// since the last call. `reqwest::Client` clones share the pool, so
    /// handing out clones is cheap.
    pub fn client_for(&self, api_key: &str) -> reqwest::Client {
        let fp = fingerprint(api_key);
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        match guard.as_ref() {
            Some((current, client)) if *current == fp => client.clone(),
            _ => {
                let client = reqwest::Client::builder()
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .expect("Failed to build HTTP client");
                *guard = Some((fp, client.clone()));
                client
            }
        }
    }
}

impl Default for ClientHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn fingerprint(api_key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    api_key.hash(&mut hasher);
    hasher.finish()
}
