//! Storage keys shared with the browser form

/// Step pointer, stringified integer 1-4
pub const CURRENT_STEP: &str = "currentStep";

/// JSON-serialized claim draft
pub const FORM_DATA: &str = "formData";

/// Claim id counter, stringified integer
pub const LAST_USED_ID: &str = "lastUsedId";

/// Claim id mirror kept for resuming older drafts
pub const DATABASE_ID: &str = "databaseId";

/// Keys removed by a reset; the counter survives
pub const SESSION_KEYS: [&str; 3] = [FORM_DATA, CURRENT_STEP, DATABASE_ID];
