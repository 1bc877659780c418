//! Generator module - filling the fixed certificate template with a
//! user profile, a travel reason and a hand-drawn signature.
//!
//! The flow is one-shot and stateless: fetch the template and signature
//! bytes, compose the overlay (field texts, reason mark, timestamp block,
//! signature raster), serialize. Nothing is cached or retried here.

pub mod attestation;
pub mod common;
pub mod engine;
pub mod fetch;
pub mod layout;
pub mod signature;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use attestation::{AttestationGenerator, GenerationRequest};
pub use engine::TemplateDocument;
pub use fetch::FetchError;
pub use signature::SignatureImage;
pub use traits::Generator;

use thiserror::Error;

/// Errors that can occur during certificate generation.
///
/// The signature variants stay distinguishable from one another so a
/// caller can prompt for a re-capture rather than a retry.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to fetch certificate template: {0}")]
    TemplateFetch(#[source] FetchError),
    #[error("failed to parse certificate template: {0}")]
    TemplateParse(#[source] lopdf::Error),
    #[error("certificate template has no page to fill")]
    TemplatePage,
    #[error("profile has no signature image")]
    SignatureMissing,
    #[error("failed to fetch signature image: {0}")]
    SignatureFetch(#[source] FetchError),
    #[error("failed to decode signature image: {0}")]
    SignatureDecode(#[source] image::ImageError),
    #[error("failed to compose page content: {0}")]
    Compose(#[source] lopdf::Error),
    #[error("failed to serialize filled certificate: {0}")]
    Serialize(#[source] lopdf::Error),
}

/// Result of a successful certificate generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    /// Filename to hand the document out under.
    pub filename: String,
    /// The filled certificate bytes.
    pub pdf: Vec<u8>,
    /// The signing date printed on the certificate, `DD/MM/YYYY`. `None`
    /// when no reason was selected and the timestamp block was omitted.
    pub signed_on: Option<String>,
}
