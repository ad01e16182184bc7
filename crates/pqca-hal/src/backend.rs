//! Backend trait and configuration.
//!
//! A backend is an opaque handle for a circuit execution target,
//! simulated or physical. The interface is deliberately synchronous:
//! one blocking call runs a circuit for N shots and returns counts.
//! Execution may block for an unbounded, externally-determined time
//! (hardware targets queue jobs); cancellation, timeout, and retry are
//! caller responsibilities.
//!
//! # Contract
//!
//! - `capabilities()` MUST be synchronous and infallible; capabilities
//!   are cached at construction time.
//! - `run()` MUST reject circuits wider than `capabilities().num_qubits`
//!   with [`BackendError::CircuitTooLarge`] and `shots == 0` with
//!   [`BackendError::InvalidShots`].
//! - Every failure surfaces as a [`BackendError`]; there are no partial
//!   results.

use std::fmt;

use serde::{Deserialize, Serialize};

use pqca_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{BackendError, BackendResult};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint URL, for remote targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token, for remote targets.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional backend-specific configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for circuit execution backends.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    ///
    /// Synchronous and infallible; implementations cache capabilities
    /// at construction time and return a reference.
    fn capabilities(&self) -> &Capabilities;

    /// Run a circuit for the given number of shots, blocking until the
    /// outcome counts are available.
    fn run(&self, circuit: &Circuit, shots: u32) -> BackendResult<ExecutionResult>;
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> BackendResult<Self>;
}

/// Shared validation helper: reject oversized circuits and zero shots.
pub fn validate_submission(
    capabilities: &Capabilities,
    circuit: &Circuit,
    shots: u32,
) -> BackendResult<()> {
    if circuit.num_qubits() > capabilities.num_qubits as usize {
        return Err(BackendError::CircuitTooLarge(format!(
            "circuit has {} qubits but backend supports {}",
            circuit.num_qubits(),
            capabilities.num_qubits
        )));
    }
    if shots == 0 {
        return Err(BackendError::InvalidShots(
            "at least one shot is required".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test")
            .with_endpoint("https://api.example.com")
            .with_token("secret-token")
            .with_extra("max_qubits", serde_json::json!(8));

        assert_eq!(config.name, "test");
        assert_eq!(config.endpoint, Some("https://api.example.com".to_string()));
        assert_eq!(config.token, Some("secret-token".to_string()));
        assert!(config.extra.contains_key("max_qubits"));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = BackendConfig::new("test").with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_validate_submission() {
        let caps = Capabilities::simulator(2);
        let circuit = Circuit::new("small", 2);
        assert!(validate_submission(&caps, &circuit, 1).is_ok());

        let wide = Circuit::new("wide", 3);
        assert!(matches!(
            validate_submission(&caps, &wide, 1),
            Err(BackendError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            validate_submission(&caps, &circuit, 0),
            Err(BackendError::InvalidShots(_))
        ));
    }
}
