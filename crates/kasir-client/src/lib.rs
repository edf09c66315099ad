//! # kasir-client: REST Client for the Kasir Backend
//!
//! The dashboard persists nothing itself; every durable fact lives
//! behind the backend REST API. This crate wraps that API behind typed
//! endpoint groups, one per resource family, the way a repository layer
//! wraps a database.
//!
//! ## Usage
//! ```rust,ignore
//! use kasir_client::{ApiClient, ApiConfig};
//! use kasir_core::types::Location;
//!
//! let client = ApiClient::new(&ApiConfig::load());
//! let items = client.inventory().fetch(Location::Toko).await?;
//! ```
//!
//! ## What This Crate Does NOT Do
//! No retries, no request de-duplication, no caching, no timeouts beyond
//! the transport's own. A call is one request and one response; failure
//! handling belongs to the screen that made the call.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ApiConfig;
pub use error::{ClientError, ClientResult};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::endpoints::auth::AuthApi;
use crate::endpoints::inventory::InventoryApi;
use crate::endpoints::items::ItemsApi;
use crate::endpoints::transactions::TransactionsApi;
use crate::endpoints::transfers::TransfersApi;
use crate::types::Envelope;

// =============================================================================
// API Client
// =============================================================================

/// Handle to the backend REST API.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections
/// internally.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the configured backend.
    pub fn new(config: &ApiConfig) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Absolute URL for an endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an enveloped resource and unwrap its `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path = %path, "GET");
        let response = self.http.get(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> =
            response
                .json()
                .await
                .map_err(|e| ClientError::UnexpectedShape {
                    endpoint: path.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(envelope.data)
    }

    /// Issue a write (POST/PUT) with a JSON body, succeeding on any 2xx.
    pub(crate) async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        debug!(method = %method, path = %path, "write");
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// POST a JSON body and decode the enveloped response `data`.
    pub(crate) async fn post_enveloped<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path = %path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> =
            response
                .json()
                .await
                .map_err(|e| ClientError::UnexpectedShape {
                    endpoint: path.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(envelope.data)
    }

    // -------------------------------------------------------------------------
    // Endpoint Groups
    // -------------------------------------------------------------------------

    /// Inventory listings and goods receiving.
    pub fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi::new(self)
    }

    /// Item reads, corrections, and bulk updates.
    pub fn items(&self) -> ItemsApi<'_> {
        ItemsApi::new(self)
    }

    /// Sales transactions and their payment status.
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    /// Stock transfers and their history.
    pub fn transfers(&self) -> TransfersApi<'_> {
        TransfersApi::new(self)
    }

    /// Login verification.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }
}
