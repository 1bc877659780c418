//! Runtime configuration for the generator.

use std::env;

use crate::generator::common::get_static_dir;

/// Default filename the generated certificate is handed out under.
pub const DEFAULT_FILENAME: &str = "attestation.pdf";

/// Where the template lives and what the output is called.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Reference to the template asset: a filesystem path or an
    /// http(s) URL. The coordinate tables are hand-tuned to this exact
    /// asset; pointing at a different document requires re-deriving them.
    pub template: String,
    /// Filename attached to the generated document.
    pub output_filename: String,
}

impl GeneratorConfig {
    /// Configuration for an explicit template reference.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output_filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Read configuration from the environment (and `.env`, when
    /// present): `ATTESTATION_TEMPLATE` overrides the template
    /// reference, `ATTESTATION_FILENAME` the output filename.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let template =
            env::var("ATTESTATION_TEMPLATE").unwrap_or_else(|_| default_template_path());
        let output_filename =
            env::var("ATTESTATION_FILENAME").unwrap_or_else(|_| DEFAULT_FILENAME.to_string());

        Self {
            template,
            output_filename,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(default_template_path())
    }
}

fn default_template_path() -> String {
    get_static_dir().join("certificate.pdf").display().to_string()
}
