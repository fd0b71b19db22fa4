//! Completion client port for hosted multimodal model APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PromptError;

/// A fully built completion request: a system instruction plus one user turn,
/// with the sampling configuration fixed by the request builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model identifier (e.g., `"gpt-4o"`).
    pub model: String,
    /// The fixed system instruction for this request kind.
    pub system: String,
    /// The text of the user turn.
    pub user_text: String,
    /// Optional image attached to the user turn as a data URL.
    #[serde(default)]
    pub image_data_url: Option<String>,
    /// Upper bound on generated output tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature; `None` leaves the endpoint default in place.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// The text content of the first response choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
}

/// Boxed future type returned by [`CompletionClient::complete`].
pub type CompleteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Completion, PromptError>> + Send + 'a>>;

/// Sends completion requests to an external model endpoint.
pub trait CompletionClient: Send + Sync {
    /// Perform one completion call and return the first choice's text.
    fn complete(&self, request: &CompletionRequest) -> CompleteFuture<'_>;
}
