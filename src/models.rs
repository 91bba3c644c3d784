use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// One user submission. The product name is trimmed on construction and an
/// empty one is only rejected later, by the prompt builder. Keywords are kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    product_name: String,
    keywords: String,
}

impl GenerationRequest {
    pub fn new(product_name: impl AsRef<str>, keywords: impl AsRef<str>) -> Self {
        Self {
            product_name: product_name.as_ref().trim().to_string(),
            keywords: keywords.as_ref().to_string(),
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }
}

/// The validated marketing copy for one product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescription {
    pub title: String,
    pub long_description: String,
    pub short_description: String,
    pub tags: Vec<String>,
}

/// Identifies a submission. Later submissions always carry larger tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn after(previous: Option<RequestToken>) -> Self {
        RequestToken(previous.map_or(1, |t| t.0 + 1))
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GenerationOutcome {
    Idle,
    Loading,
    Success(ProductDescription),
    Failure { kind: ErrorKind, message: String },
}

impl GenerationOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure { .. })
    }
}

/// Everything a renderer needs: lifecycle outcome plus the display image.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedState {
    pub token: Option<RequestToken>,
    pub outcome: GenerationOutcome,
    pub image_url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub product_name: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitResponse {
    pub token: RequestToken,
}
