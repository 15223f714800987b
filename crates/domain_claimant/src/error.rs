//! Claimant domain errors

use thiserror::Error;

/// Errors that can occur in the claimant domain
#[derive(Debug, Error)]
pub enum ClaimantError {
    /// The address book could not be loaded
    #[error("Address book error: {0}")]
    AddressBook(String),

    /// The address book is not valid JSON of the expected shape
    #[error("Address book format error: {0}")]
    AddressBookFormat(#[from] serde_json::Error),
}

impl ClaimantError {
    /// Creates an AddressBook error with a message
    pub fn address_book(message: impl Into<String>) -> Self {
        ClaimantError::AddressBook(message.into())
    }
}
