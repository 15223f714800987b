//! Signature step
//!
//! The capture widget is an external collaborator seen through
//! [`SignaturePad`]. Drawing on the pad is not enough to pass the step: the
//! user has to save explicitly, and only the saved image counts.

use serde::{Deserialize, Serialize};

use crate::validation::{Field, ValidationErrors};

/// Port to the signature capture widget
pub trait SignaturePad {
    /// Wipes whatever is currently drawn
    fn clear(&mut self);

    /// Exports the current drawing as an encoded image string
    fn save(&mut self) -> String;

    /// Returns true when nothing has been drawn
    fn is_empty(&self) -> bool;
}

/// An encoded signature image, kept verbatim as the widget produced it
/// (typically a `data:image/png;base64,...` URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

impl SignatureImage {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validator for the signature step
pub struct SignatureValidator;

impl SignatureValidator {
    /// Passes only for an explicitly saved, non-empty image
    pub fn validate(saved: Option<&SignatureImage>) -> Result<SignatureImage, ValidationErrors> {
        match saved {
            None => Err(ValidationErrors::single(
                Field::Signature,
                "Save your signature before continuing",
            )),
            Some(image) if image.is_blank() => Err(ValidationErrors::single(
                Field::Signature,
                "Signature is empty",
            )),
            Some(image) => Ok(image.clone()),
        }
    }
}

/// Pad holding an image that was drawn elsewhere and uploaded
///
/// Used where the real widget runs client-side and only its export reaches
/// the server.
#[derive(Debug, Clone, Default)]
pub struct UploadedSignature {
    encoded: String,
}

impl UploadedSignature {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }
}

impl SignaturePad for UploadedSignature {
    fn clear(&mut self) {
        self.encoded.clear();
    }

    fn save(&mut self) -> String {
        self.encoded.clone()
    }

    fn is_empty(&self) -> bool {
        self.encoded.trim().is_empty()
    }
}
