//! Key-value Draft Store Adapter
//!
//! Implements [`DraftPort`] over any [`KeyValueStore`], using the four keys
//! in [`crate::keys`].
//!
//! # Error Handling
//!
//! Reads degrade: a missing value is absent, and a value that fails to parse
//! is logged at `warn` and treated as absent or default. Write failures are
//! translated to `PortError::Storage`.

use tracing::{debug, warn};

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{ClaimDraft, DraftPort, WizardStep};

use crate::backend::KeyValueStore;
use crate::keys;

/// DraftPort backed by a string key-value medium
#[derive(Debug, Clone)]
pub struct KeyValueDraftStore<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueDraftStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying medium
    pub fn inner(&self) -> &S {
        &self.store
    }

    fn last_used_id(&self) -> u64 {
        match self.store.get(keys::LAST_USED_ID) {
            None => 0,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(key = keys::LAST_USED_ID, value = %raw, "unreadable counter, starting from 0");
                0
            }),
        }
    }
}

impl<S: KeyValueStore> DomainPort for KeyValueDraftStore<S> {}

impl<S: KeyValueStore> HealthCheckable for KeyValueDraftStore<S> {
    fn health_check(&self) -> HealthCheckResult {
        let adapter_id = format!("{}-draft-store", self.store.backend_name());
        match self.store.check() {
            Ok(()) => HealthCheckResult::healthy(adapter_id),
            Err(error) => HealthCheckResult::unhealthy(adapter_id, error.to_string()),
        }
    }
}

impl<S: KeyValueStore> DraftPort for KeyValueDraftStore<S> {
    fn load_step(&self) -> Option<WizardStep> {
        let raw = self.store.get(keys::CURRENT_STEP)?;
        let step = raw.trim().parse::<u8>().ok().and_then(WizardStep::from_number);
        if step.is_none() {
            warn!(key = keys::CURRENT_STEP, value = %raw, "unreadable step, ignoring");
        }
        step
    }

    fn save_step(&self, step: WizardStep) -> Result<(), PortError> {
        self.store.set(keys::CURRENT_STEP, &step.to_string())?;
        Ok(())
    }

    fn load_draft(&self) -> ClaimDraft {
        let Some(raw) = self.store.get(keys::FORM_DATA) else {
            return ClaimDraft::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(key = keys::FORM_DATA, error = %error, "unreadable draft, starting empty");
            ClaimDraft::default()
        })
    }

    fn save_draft(&self, draft: &ClaimDraft) -> Result<(), PortError> {
        let json = serde_json::to_string(draft)
            .map_err(|e| PortError::storage_with_source("Failed to encode draft", e))?;
        self.store.set(keys::FORM_DATA, &json)?;
        Ok(())
    }

    fn load_claim_id(&self) -> Option<ClaimId> {
        let raw = self.store.get(keys::DATABASE_ID)?;
        if raw.trim().is_empty() {
            return None;
        }
        match raw.parse::<ClaimId>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(key = keys::DATABASE_ID, value = %raw, "unreadable claim id, ignoring");
                None
            }
        }
    }

    fn save_claim_id(&self, id: ClaimId) -> Result<(), PortError> {
        self.store.set(keys::DATABASE_ID, &id.to_string())?;
        Ok(())
    }

    fn next_claim_id(&self) -> Result<ClaimId, PortError> {
        let id = ClaimId::after(self.last_used_id())
            .ok_or_else(|| PortError::internal("claim id counter exhausted"))?;
        self.store.set(keys::LAST_USED_ID, &id.value().to_string())?;
        debug!(claim_id = %id, "claim id counter advanced");
        Ok(id)
    }

    fn clear(&self) -> Result<(), PortError> {
        for key in keys::SESSION_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
