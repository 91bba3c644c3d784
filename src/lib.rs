//! Structured product copy (title, descriptions, tags) for Tiendanube stores,
//! generated by Gemini and validated before it reaches the page.

pub mod config;
pub mod controller;
pub mod error;
pub mod gemini;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod routes;
pub mod slug;

pub use controller::{RequestController, Submission};
pub use error::{ErrorKind, GenerationError};
pub use gemini::{GeminiClient, GenerationClient};
pub use models::{GenerationOutcome, GenerationRequest, ProductDescription, PublishedState, RequestToken};
pub use pipeline::GenerationPipeline;
