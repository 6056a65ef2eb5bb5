//! HTTP implementation of the VehicleRegistry trait
//!
//! One blocking round-trip per call against the REST contract:
//!   GET    {base}/vehicles        200 + JSON array
//!   POST   {base}/vehicles        201 + created vehicle, 400 on rejection
//!   PUT    {base}/vehicles/{id}   200 + updated vehicle, 404 if unknown
//!   DELETE {base}/vehicles/{id}   204, 404 if unknown
//!
//! No retry, no caching, no timeout beyond the transport default.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use transitlink_domain::repository::VehicleRegistry;
use transitlink_types::{RemoteError, Vehicle};

/// Structured rejection body from the registry service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract a readable message from a rejection body
fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    }
}

/// Blocking HTTP client for the remote vehicle registry
pub struct HttpVehicleRegistry {
    client: Client,
    base_url: String,
}

impl HttpVehicleRegistry {
    /// Create a client for the given API base URL (e.g., `http://127.0.0.1:3001/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport(e: reqwest::Error) -> RemoteError {
        RemoteError::Unavailable(e.to_string())
    }

    /// Consume a non-2xx response into the rejection taxonomy
    fn rejected(response: Response) -> RemoteError {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        RemoteError::Rejected {
            status,
            message: rejection_message(status, &body),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let status = response.status().as_u16();
        response.json().map_err(|e| RemoteError::Rejected {
            status,
            message: format!("Malformed response body: {e}"),
        })
    }
}

impl VehicleRegistry for HttpVehicleRegistry {
    fn list(&self) -> Result<Vec<Vehicle>, RemoteError> {
        let url = self.url("/vehicles");
        debug!("GET {url}");
        let response = self.client.get(&url).send().map_err(Self::transport)?;
        if !response.status().is_success() {
            return Err(Self::rejected(response));
        }
        Self::decode(response)
    }

    fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, RemoteError> {
        let url = self.url("/vehicles");
        debug!("POST {url} ({})", vehicle.id);
        let response = self
            .client
            .post(&url)
            .json(vehicle)
            .send()
            .map_err(Self::transport)?;
        if !response.status().is_success() {
            return Err(Self::rejected(response));
        }
        Self::decode(response)
    }

    fn replace(&self, vehicle: &Vehicle) -> Result<Vehicle, RemoteError> {
        let url = self.url(&format!("/vehicles/{}", vehicle.id));
        debug!("PUT {url}");
        let response = self
            .client
            .put(&url)
            .json(vehicle)
            .send()
            .map_err(Self::transport)?;
        if response.status().as_u16() == 404 {
            return Err(RemoteError::NotFound(vehicle.id.clone()));
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response));
        }
        Self::decode(response)
    }

    fn remove(&self, id: &str) -> Result<(), RemoteError> {
        let url = self.url(&format!("/vehicles/{id}"));
        debug!("DELETE {url}");
        let response = self.client.delete(&url).send().map_err(Self::transport)?;
        if response.status().as_u16() == 404 {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::rejected(response));
        }
        Ok(())
    }
}
