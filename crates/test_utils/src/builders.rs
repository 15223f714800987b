//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use std::sync::Arc;

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use domain_claimant::{AddressForm, PersonalDetailsForm, StaticAddressLookup};
use domain_claims::{RecordingSubmissionSink, WizardController, WizardError, WizardStep};
use infra_store::{keys, KeyValueDraftStore, KeyValueStore, MemoryStore};

use crate::fixtures::{AddressFixtures, PersonalFixtures, SignatureFixtures};

/// Keeps only the characters a name field accepts
fn name_chars(raw: String) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_alphabetic() || *c == '-').collect();
    if cleaned.is_empty() {
        "Taylor".to_string()
    } else {
        cleaned
    }
}

/// Builder for step 2 form input
pub struct PersonalDetailsFormBuilder {
    form: PersonalDetailsForm,
}

impl Default for PersonalDetailsFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalDetailsFormBuilder {
    /// Creates a new builder with valid default values
    pub fn new() -> Self {
        Self {
            form: PersonalFixtures::form(),
        }
    }

    /// Replaces the names and email with generated ones
    pub fn with_random_identity(mut self) -> Self {
        self.form.first_name = name_chars(FirstName().fake());
        self.form.last_name = name_chars(LastName().fake());
        self.form.email = SafeEmail().fake();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.form.title = title.into();
        self
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.form.first_name = name.into();
        self
    }

    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.form.last_name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.form.mobile_number = mobile.into();
        self
    }

    /// Sets the date of birth as day, month, year
    pub fn with_dob(mut self, day: i64, month: i64, year: i64) -> Self {
        self.form.dob_day = day;
        self.form.dob_month = month;
        self.form.dob_year = year;
        self
    }

    pub fn build(self) -> PersonalDetailsForm {
        self.form
    }
}

/// A wizard wired to in-memory test doubles
///
/// The memory store is shared, so [`TestWizard::reload`] behaves like a page
/// reload over the same storage.
pub struct TestWizard {
    pub controller: WizardController,
    pub memory: MemoryStore,
    pub sink: RecordingSubmissionSink,
}

impl Default for TestWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWizard {
    /// Creates a wizard over empty storage
    pub fn new() -> Self {
        Self::with_memory(MemoryStore::new())
    }

    /// Creates a wizard over pre-populated storage
    pub fn with_memory(memory: MemoryStore) -> Self {
        let sink = RecordingSubmissionSink::new();
        let controller = build_controller(&memory, &sink);
        Self {
            controller,
            memory,
            sink,
        }
    }

    /// Creates a wizard whose claim id counter starts at `last_used_id`
    pub fn with_last_used_id(last_used_id: u64) -> Self {
        Self::with_memory(MemoryStore::with_entries([(
            keys::LAST_USED_ID,
            last_used_id.to_string(),
        )]))
    }

    /// Discards the controller and loads a fresh one from storage
    pub fn reload(&mut self) {
        self.controller = build_controller(&self.memory, &self.sink);
    }

    /// Raw value stored under `key`
    pub fn stored(&self, key: &str) -> Option<String> {
        self.memory.get(key)
    }

    /// Completes steps until the wizard sits on `target`
    pub fn advance_to(&mut self, target: WizardStep) -> Result<(), WizardError> {
        while self.controller.step() < target {
            match self.controller.step() {
                WizardStep::Address => {
                    self.controller.submit_address(&AddressFixtures::form())?;
                }
                WizardStep::PersonalDetails => {
                    self.controller.submit_personal_details(&PersonalFixtures::form())?;
                }
                WizardStep::Signature => {
                    self.controller.save_signature(&mut SignatureFixtures::drawn_pad())?;
                    self.controller.submit_signature()?;
                }
                WizardStep::Results => break,
            }
        }
        Ok(())
    }

    /// Submits step 1 with a specific address
    pub fn submit_address(&mut self, address: &str) -> Result<WizardStep, WizardError> {
        self.controller
            .submit_address(&AddressForm::new(AddressFixtures::postcode(), address))
    }
}

fn build_controller(memory: &MemoryStore, sink: &RecordingSubmissionSink) -> WizardController {
    WizardController::load(
        Arc::new(KeyValueDraftStore::new(memory.clone())),
        Arc::new(StaticAddressLookup::builtin()),
        Arc::new(sink.clone()),
    )
}
