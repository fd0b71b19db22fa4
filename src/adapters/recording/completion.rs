//! Recording adapter for the `CompletionClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::completion::{CompleteFuture, CompletionClient, CompletionRequest};

/// Records completion interactions while delegating to an inner implementation.
pub struct RecordingCompletionClient {
    inner: Box<dyn CompletionClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCompletionClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn CompletionClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CompletionClient for RecordingCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> CompleteFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.complete(&request_clone).await;
            record_result(&recorder, "completion_client", "complete", &request_clone, &result);
            result
        })
    }
}
