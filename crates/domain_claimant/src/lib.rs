//! Claimant Domain
//!
//! This crate holds the step validators that gate every forward move of the
//! intake wizard, together with the narrow ports to the collaborators the
//! validators consult.
//!
//! # Steps
//!
//! - **Address**: postcode shape, and an address picked from the lookup
//!   result for that postcode
//! - **Personal details**: title, names, email, mobile number, date of birth
//! - **Signature**: an explicitly saved, non-empty image
//!
//! Validators are pure: `validate(input) -> Result<Normalized, ValidationErrors>`.
//! Every error names the form field it belongs to so it can be shown in place.
//!
//! # Examples
//!
//! ```rust
//! use domain_claimant::{AddressForm, AddressValidator, StaticAddressLookup};
//!
//! let lookup = StaticAddressLookup::builtin();
//! let form = AddressForm::new("BN13JF", "3 Nyetimber Hill");
//! let details = AddressValidator::validate(&form, &lookup).unwrap();
//! assert_eq!(details.address, "3 Nyetimber Hill");
//! ```

pub mod address;
pub mod personal;
pub mod signature;
pub mod validation;
pub mod error;

pub use address::{AddressDetails, AddressForm, AddressLookup, AddressValidator, StaticAddressLookup};
pub use personal::{PersonalDetails, PersonalDetailsForm, PersonalDetailsValidator, Title};
pub use signature::{SignatureImage, SignaturePad, SignatureValidator, UploadedSignature};
pub use validation::{Field, FieldError, Rule, ValidationErrors, ValidationReport};
pub use error::ClaimantError;
