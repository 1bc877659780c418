//! Generator for the derogatory movement certificate.
//!
//! Turns a profile, a selected reason and the moment of signing into the
//! filled single-page certificate. The template and the signature image
//! are independent inputs and are fetched concurrently; composing starts
//! once both have arrived.

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::config::GeneratorConfig;
use crate::profile::model::Profile;
use crate::reason::Reason;

use super::common::{format_date, format_hour, format_minute};
use super::engine::TemplateDocument;
use super::fetch::fetch_resource;
use super::layout::{
    Field, MARK_SIZE, SIGNATURE_BOTTOM_OFFSET, SIGNATURE_RIGHT_INSET, SIGNATURE_WIDTH,
};
use super::signature::SignatureImage;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};

/// One generation request: constructed immediately before generation,
/// consumed once, discarded.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub profile: Profile,
    /// `None` means no reason was selected: no checkbox mark and no
    /// timestamp block are drawn.
    pub reason: Option<Reason>,
    /// The moment of signing. Injected rather than read from the clock so
    /// generation stays a pure function of its inputs.
    pub now: DateTime<Local>,
}

impl GenerationRequest {
    /// Request stamped with the current local time.
    pub fn new(profile: Profile, reason: Option<Reason>) -> Self {
        Self::at(profile, reason, Local::now())
    }

    /// Request for an explicit moment of signing.
    pub fn at(profile: Profile, reason: Option<Reason>, now: DateTime<Local>) -> Self {
        Self { profile, reason, now }
    }
}

/// Generator for the movement certificate.
pub struct AttestationGenerator {
    config: GeneratorConfig,
}

impl AttestationGenerator {
    /// Create a generator bound to the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Fetch template and signature bytes concurrently and join on both.
    async fn load_inputs(
        &self,
        signature_ref: &str,
    ) -> Result<(Vec<u8>, Vec<u8>), GeneratorError> {
        tokio::try_join!(
            async {
                fetch_resource(&self.config.template)
                    .await
                    .map_err(GeneratorError::TemplateFetch)
            },
            async {
                fetch_resource(signature_ref)
                    .await
                    .map_err(GeneratorError::SignatureFetch)
            },
        )
    }

    /// Draw every field of the certificate onto the loaded template.
    ///
    /// The drawn regions are disjoint, so ordering does not matter; this
    /// follows the printed top-to-bottom order for readability. Returns
    /// the printed signing date when the timestamp block was drawn.
    fn compose(
        document: &mut TemplateDocument,
        request: &GenerationRequest,
        signature: &SignatureImage,
    ) -> Result<Option<String>, GeneratorError> {
        let profile = &request.profile;

        draw_field(document, Field::FullName, &profile.name);
        draw_field(document, Field::Birthday, &profile.birthday);
        draw_field(document, Field::Birthplace, profile.birthplace_or_empty());
        draw_field(document, Field::AddressLine, &profile.address_line());

        if let Some(reason) = request.reason {
            let mark = reason.mark_position();
            document.draw_text("x", mark.x, mark.y, MARK_SIZE);
        }

        draw_field(document, Field::SigningPlace, profile.signing_place());

        let signed_on = match request.reason {
            Some(_) => {
                let date = format_date(&request.now);
                draw_field(document, Field::SignedOnDate, &date);
                draw_field(document, Field::SignedAtHour, &format_hour(&request.now));
                draw_field(document, Field::SignedAtSeparator, ":");
                draw_field(document, Field::SignedAtMinute, &format_minute(&request.now));
                Some(date)
            }
            None => None,
        };

        let (width, height) = signature.scaled_to_width(SIGNATURE_WIDTH);
        let x = document.page_width() - width - SIGNATURE_RIGHT_INSET;
        document.draw_signature(signature, x, SIGNATURE_BOTTOM_OFFSET, width, height)?;

        Ok(signed_on)
    }
}

#[async_trait]
impl Generator<GenerationRequest> for AttestationGenerator {
    /// Generate the certificate from the request data.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedDocument, GeneratorError> {
        let signature_ref = request.profile.signature.trim();
        if signature_ref.is_empty() {
            return Err(GeneratorError::SignatureMissing);
        }

        let (template_bytes, signature_bytes) = self.load_inputs(signature_ref).await?;

        let signature = SignatureImage::decode(&signature_bytes)?;
        let mut document = TemplateDocument::load(&template_bytes)?;

        let signed_on = Self::compose(&mut document, &request, &signature)?;

        let pdf = document.save()?;
        log::info!(
            "Generated certificate '{}' ({} bytes, reason: {})",
            self.config.output_filename,
            pdf.len(),
            request
                .reason
                .map(|r| r.code())
                .unwrap_or("none"),
        );

        Ok(GeneratedDocument {
            filename: self.config.output_filename.clone(),
            pdf,
            signed_on,
        })
    }
}

// Inherent impl for ease of use without importing the trait
impl AttestationGenerator {
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedDocument, GeneratorError> {
        Generator::generate(self, request).await
    }
}

fn draw_field(document: &mut TemplateDocument, field: Field, text: &str) {
    let slot = field.slot();
    document.draw_text(text, slot.x, slot.y, slot.size);
}
