//! Core error types used across the system

use thiserror::Error;
use crate::calendar::CalendarError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// A value could not be parsed into a kernel type
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
