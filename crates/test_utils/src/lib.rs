//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim intake wizard test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built step inputs and drafts
//! - `builders`: Builders for forms, drafts, and a wired-up test wizard
//! - `assertions`: Custom assertion helpers for validation and drafts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
