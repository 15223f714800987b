//! Integration tests for infra_store

use std::fs;
use std::sync::Arc;

use proptest::prelude::*;
use tempfile::TempDir;

use core_kernel::{AdapterHealth, ClaimId, HealthCheckable};
use domain_claimant::{AddressForm, PersonalDetailsForm, StaticAddressLookup, UploadedSignature};
use domain_claims::{
    DraftPort, LoggingSubmissionSink, WizardController, WizardStep,
};
use test_utils::{DraftFixtures, TestWizard};
use infra_store::{
    keys, open_store, JsonFileStore, KeyValueDraftStore, KeyValueStore, MemoryStore, StoreBackend,
};

fn wizard_over<S: KeyValueStore>(store: S) -> WizardController {
    WizardController::load(
        Arc::new(KeyValueDraftStore::new(store)),
        Arc::new(StaticAddressLookup::builtin()),
        Arc::new(LoggingSubmissionSink),
    )
}

fn personal_form() -> PersonalDetailsForm {
    PersonalDetailsForm {
        title: "Mrs".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        mobile_number: "07700900321".to_string(),
        dob_day: 9,
        dob_month: 12,
        dob_year: 1956,
    }
}

// ============================================================================
// File Store Tests
// ============================================================================

mod file_tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set(keys::CURRENT_STEP, "3").unwrap();
        store.set(keys::LAST_USED_ID, "12").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::CURRENT_STEP).as_deref(), Some("3"));
        assert_eq!(reopened.get(keys::LAST_USED_ID).as_deref(), Some("12"));
    }

    #[test]
    fn test_corrupt_file_opens_empty_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.json");
        fs::write(&path, "this is not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(keys::FORM_DATA), None);

        store.set(keys::CURRENT_STEP, "1").unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::CURRENT_STEP).as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_parent_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("wizard.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set(keys::CURRENT_STEP, "2").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set(keys::DATABASE_ID, "4").unwrap();
        store.remove(keys::DATABASE_ID).unwrap();
        store.remove(keys::DATABASE_ID).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(keys::DATABASE_ID), None);
    }

    #[test]
    fn test_open_store_selects_file_backend() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.json");

        let store = open_store(&StoreBackend::JsonFile(path)).unwrap();
        assert_eq!(store.backend_name(), "json-file");
    }

    #[test]
    fn test_health_reports_backend() {
        let dir = TempDir::new().unwrap();
        let store = KeyValueDraftStore::new(JsonFileStore::open(dir.path().join("w.json")).unwrap());

        let health = store.health_check();
        assert_eq!(health.status, AdapterHealth::Healthy);
        assert_eq!(health.adapter_id, "json-file-draft-store");
    }
}

// ============================================================================
// Draft Store Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[test]
    fn test_draft_round_trips_through_form_data() {
        let store = KeyValueDraftStore::new(MemoryStore::new());
        let draft = DraftFixtures::complete(3);

        store.save_draft(&draft).unwrap();
        assert_eq!(store.load_draft(), draft);

        let raw = store.inner().get(keys::FORM_DATA).unwrap();
        assert!(raw.contains("\"claimId\":\"3\""));
    }

    #[test]
    fn test_legacy_form_data_is_read() {
        let legacy = r#"{"databaseId":"8","postcode":"BN13JF","address":"5 Nyetimber Hill","mobile_number":"07700900123"}"#;
        let store = KeyValueDraftStore::new(MemoryStore::with_entries([(keys::FORM_DATA, legacy)]));

        let draft = store.load_draft();
        assert_eq!(draft.claim_id, Some(ClaimId::new(8)));
        assert_eq!(draft.mobile_number.as_deref(), Some("07700900123"));
    }

    #[test]
    fn test_legacy_numeric_form_data_resumes_past_personal_details() {
        let legacy = r#"{"databaseId":7,"postcode":"BN13JF","address":"3 Nyetimber Hill","title":"Mr","firstName":"John","lastName":"Smith","email":"john@example.com","mobile_number":7700900123,"dob_day":15,"dob_month":6,"dob_year":1980}"#;
        let memory = MemoryStore::with_entries([
            (keys::CURRENT_STEP, "3"),
            (keys::FORM_DATA, legacy),
            (keys::LAST_USED_ID, "7"),
        ]);

        let wizard = wizard_over(memory);
        assert_eq!(wizard.step(), WizardStep::Signature);
        assert_eq!(wizard.draft().postcode.as_deref(), Some("BN13JF"));
        assert_eq!(wizard.draft().mobile_number.as_deref(), Some("7700900123"));
        assert_eq!(wizard.claim_id(), Some(ClaimId::new(7)));
    }

    proptest! {
        #[test]
        fn counter_is_strictly_increasing(start in 0u64..1_000_000, draws in 1usize..20) {
            let store = KeyValueDraftStore::new(
                MemoryStore::with_entries([(keys::LAST_USED_ID, start.to_string())]),
            );
            let mut previous = start;
            for _ in 0..draws {
                let id = store.next_claim_id().unwrap();
                prop_assert_eq!(id.value(), previous + 1);
                previous = id.value();
            }
        }
    }
}

// ============================================================================
// Wizard Over Real Media Tests
// ============================================================================

mod wizard_tests {
    use super::*;

    #[test]
    fn test_resume_after_restart_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wizard.json");

        let mut wizard = wizard_over(JsonFileStore::open(&path).unwrap());
        wizard
            .submit_address(&AddressForm::new("BN13JF", "3 Nyetimber Hill"))
            .unwrap();
        wizard.submit_personal_details(&personal_form()).unwrap();
        drop(wizard);

        let resumed = wizard_over(JsonFileStore::open(&path).unwrap());
        assert_eq!(resumed.step(), WizardStep::Signature);
        assert_eq!(resumed.draft().address.as_deref(), Some("3 Nyetimber Hill"));
        assert_eq!(resumed.draft().first_name.as_deref(), Some("Grace"));
        assert_eq!(resumed.claim_id(), Some(ClaimId::new(1)));
    }

    #[test]
    fn test_keys_written_by_full_flow() {
        let memory = MemoryStore::new();
        let mut wizard = wizard_over(memory.clone());
        wizard
            .submit_address(&AddressForm::new("BN13JF", "1 Nyetimber Hill"))
            .unwrap();
        wizard.submit_personal_details(&personal_form()).unwrap();
        let mut pad = UploadedSignature::new("data:image/png;base64,AAAA");
        wizard.save_signature(&mut pad).unwrap();
        wizard.submit_signature().unwrap();

        assert_eq!(memory.get(keys::CURRENT_STEP).as_deref(), Some("4"));
        assert_eq!(memory.get(keys::DATABASE_ID).as_deref(), Some("1"));
        assert_eq!(memory.get(keys::LAST_USED_ID).as_deref(), Some("1"));
        assert!(wizard.last_receipt().is_some());
    }

    #[test]
    fn test_reset_then_new_claim_gets_fresh_id() {
        let memory = MemoryStore::new();
        let mut wizard = wizard_over(memory.clone());
        wizard
            .submit_address(&AddressForm::new("BN13JF", "1 Nyetimber Hill"))
            .unwrap();
        wizard.reset().unwrap();

        assert_eq!(memory.get(keys::FORM_DATA), None);
        assert_eq!(memory.get(keys::CURRENT_STEP), None);

        wizard
            .submit_address(&AddressForm::new("BN13JF", "2 Nyetimber Hill"))
            .unwrap();
        assert_eq!(wizard.claim_id(), Some(ClaimId::new(2)));
    }

    #[test]
    fn test_reload_over_shared_memory_resumes() {
        let mut harness = TestWizard::with_last_used_id(41);
        harness.submit_address("5 Nyetimber Hill").unwrap();
        harness.reload();

        assert_eq!(harness.controller.step(), WizardStep::PersonalDetails);
        assert_eq!(harness.controller.claim_id(), Some(ClaimId::new(42)));
        assert_eq!(harness.stored(keys::LAST_USED_ID).as_deref(), Some("42"));
        assert_eq!(harness.stored(keys::DATABASE_ID).as_deref(), Some("42"));
    }

    #[test]
    fn test_stored_personal_details_resume_at_signature() {
        let form_data = serde_json::to_string(&DraftFixtures::after_personal_details(5)).unwrap();
        let mut harness =
            TestWizard::with_memory(MemoryStore::with_entries([(keys::FORM_DATA, form_data)]));
        assert_eq!(harness.controller.step(), WizardStep::Signature);

        harness.advance_to(WizardStep::Results).unwrap();
        assert_eq!(harness.stored(keys::CURRENT_STEP).as_deref(), Some("4"));
        assert_eq!(harness.sink.submitted().len(), 1);
        assert_eq!(harness.sink.submitted()[0].claim_id, Some(ClaimId::new(5)));
    }

    #[test]
    fn test_corrupt_form_data_resumes_at_first_missing_step() {
        let memory = MemoryStore::with_entries([
            (keys::CURRENT_STEP, "3"),
            (keys::FORM_DATA, "{{{"),
        ]);
        let wizard = wizard_over(memory);
        assert_eq!(wizard.step(), WizardStep::Address);
        assert!(wizard.draft().is_empty());
    }
}
