use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::gemini::GenerationClient;
use crate::models::{GenerationRequest, ProductDescription};
use crate::parser::parse_description;
use crate::prompt::{build_payload, GenerationPayload};

/// Prompt → model → validation. Errors are forwarded exactly as raised, and
/// nothing is cached: identical requests make independent exchanges.
#[derive(Clone)]
pub struct GenerationPipeline {
    client: Arc<dyn GenerationClient>,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// The synchronous half: input validation and payload construction.
    pub fn prepare(&self, request: &GenerationRequest) -> Result<GenerationPayload> {
        build_payload(request)
    }

    pub async fn execute(&self, payload: &GenerationPayload) -> Result<ProductDescription> {
        let raw = self.client.generate(payload).await?;
        let description = parse_description(&raw)?;
        info!("✅ Description generated for '{}' ({} tags)", payload.product_name, description.tags.len());
        Ok(description)
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<ProductDescription> {
        let payload = self.prepare(request)?;
        self.execute(&payload).await
    }
}
