//! Replaying adapter for the `CompletionClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PromptError;
use crate::ports::completion::{CompleteFuture, Completion, CompletionClient, CompletionRequest};

/// Serves recorded completion results from a cassette.
pub struct ReplayingCompletionClient {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingCompletionClient {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }
}

impl CompletionClient for ReplayingCompletionClient {
    fn complete(&self, _request: &CompletionRequest) -> CompleteFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "completion_client", "complete");
        Box::pin(async move {
            let output = output.map_err(|e| PromptError::Api {
                status: 0,
                message: format!("Cassette replay: {e}"),
            })?;
            replay_result::<Completion>(output)
                .map_err(|e| PromptError::Api { status: 0, message: e.to_string() })
        })
    }
}
