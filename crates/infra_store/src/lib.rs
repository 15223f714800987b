//! Draft Store Infrastructure
//!
//! This crate provides the durable side of the claim intake wizard: a small
//! string key-value medium and the adapter that maps the wizard's
//! [`DraftPort`](domain_claims::DraftPort) onto it.
//!
//! # Keys
//!
//! | Key | Value |
//! |---|---|
//! | `currentStep` | step number as a string |
//! | `formData` | JSON-serialized `ClaimDraft` |
//! | `lastUsedId` | claim id counter as a string |
//! | `databaseId` | claim id mirror as a string |
//!
//! # Example
//!
//! ```rust
//! use domain_claims::{DraftPort, WizardStep};
//! use infra_store::{KeyValueDraftStore, MemoryStore};
//!
//! let store = KeyValueDraftStore::new(MemoryStore::new());
//! store.save_step(WizardStep::Signature).unwrap();
//! assert_eq!(store.load_step(), Some(WizardStep::Signature));
//! ```

pub mod backend;
pub mod draft_store;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;

pub use backend::{open_store, KeyValueStore, StoreBackend};
pub use draft_store::KeyValueDraftStore;
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
