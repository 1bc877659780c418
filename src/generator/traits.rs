//! Traits for generator system standardization.

use async_trait::async_trait;

use super::{GeneratedDocument, GeneratorError};

/// Trait for document generators.
#[async_trait]
pub trait Generator<Req> {
    /// Generate a document from the request.
    async fn generate(&self, request: Req) -> Result<GeneratedDocument, GeneratorError>;
}
