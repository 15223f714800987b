//! Core Kernel - Foundational types for the claim intake wizard
//!
//! This crate provides the building blocks shared by every other crate:
//! - Claim identifiers derived from a persisted counter
//! - Calendar arithmetic for date-of-birth checks (leap years, month lengths)
//! - Port plumbing for the ports-and-adapters seams (errors, health checks)

pub mod calendar;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use calendar::{CalendarDate, CalendarError, current_year, days_in_month, is_leap_year};
pub use identifiers::ClaimId;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
