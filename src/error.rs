//! Unified error type for stockprompt.

use thiserror::Error;

/// Errors that can occur while generating or refining prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The completion API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// A reference image could not be re-encoded for transport.
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },

    /// A refine action was requested with an empty instruction.
    #[error("Empty refine instruction: describe what should change first")]
    EmptyInstruction,

    /// A refine action was requested for an image with no generated prompt.
    #[error("No prompt has been generated for '{0}' yet")]
    NotGenerated(String),
}
