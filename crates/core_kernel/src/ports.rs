//! Ports and Adapters Infrastructure
//!
//! This module provides the foundational types for the ports-and-adapters
//! seams used across the workspace.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Wizard Controller                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │   (DraftPort, AddressLookup, SignaturePad, SubmissionSink)   │
//! │   Defined in each domain, depend only on core_kernel         │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Key-value store  │     │  Test doubles /  │
//!         │ (memory, file)    │     │  static tables   │
//!         └───────────────────┘     └──────────────────┘
//! ```
//!
//! Every port call is synchronous. The wizard handles one user event at a
//! time and never suspends mid-transition.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Failure reported by an adapter behind a port
///
/// Read paths never produce one: stores degrade to "absent" instead. Only
/// writes, counter draws and submissions can fail.
#[derive(Debug, Error)]
pub enum PortError {
    /// The adapter refused the input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Writing to the underlying medium failed
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The downstream system did not answer
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Storage error keeping the adapter's own error as its source
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// True when repeating the same call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Storage { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    /// The offending field, for validation failures that name one
    pub fn field(&self) -> Option<&str> {
        match self {
            PortError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports must be shareable across threads so the HTTP layer can hold the
/// wizard behind a mutex.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter answers but a check failed partially
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
    /// Health status is unknown
    Unknown,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Creates a healthy result for the given adapter
    pub fn healthy(adapter_id: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Creates an unhealthy result with an explanation
    pub fn unhealthy(adapter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }
}

/// Trait for adapters that support health checks
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_storage_errors_are_transient() {
        assert!(PortError::storage("disk full").is_transient());
        assert!(PortError::ServiceUnavailable {
            service: "submission".to_string(),
        }
        .is_transient());
        assert!(!PortError::internal("counter not advanced").is_transient());
    }

    #[test]
    fn test_storage_with_source_keeps_cause() {
        let cause = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error = PortError::storage_with_source("cannot write formData", cause);
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("read-only"));
    }

    #[test]
    fn test_validation_field() {
        let error = PortError::validation_field("Draft has no claim id", "claimId");
        assert_eq!(error.field(), Some("claimId"));
        assert!(!error.is_transient());
        assert_eq!(PortError::storage("x").field(), None);
    }

    #[test]
    fn test_health_check_result_constructors() {
        let ok = HealthCheckResult::healthy("memory-draft-store");
        assert_eq!(ok.status, AdapterHealth::Healthy);
        assert!(ok.message.is_none());

        let bad = HealthCheckResult::unhealthy("json-file-draft-store", "permission denied");
        assert_eq!(bad.status, AdapterHealth::Unhealthy);
        assert_eq!(bad.message.as_deref(), Some("permission denied"));
    }
}
