//! Service context that bundles all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::openai::OpenAiClient;
use crate::adapters::recording::completion::RecordingCompletionClient;
use crate::adapters::replaying::completion::ReplayingCompletionClient;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::PromptError;
use crate::ports::CompletionClient;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Completion client port.
    pub client: Box<dyn CompletionClient>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config) -> Result<Self, PromptError> {
        let key = config.openai_key().ok_or(PromptError::MissingApiKey {
            provider: "OpenAI".into(),
            env_var: "OPENAI_API_KEY".into(),
        })?;
        let client = Box::new(OpenAiClient::new(config.defaults.api_url.clone(), key));
        Ok(Self { client })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be initialized.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), PromptError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = std::path::PathBuf::from(".stockprompt/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("completion_client.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-completion_client"),
            &commit,
        )));

        let recording_client =
            RecordingCompletionClient::new(live_ctx.client, Arc::clone(&recorder));

        let ctx = Self { client: Box::new(recording_client) };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, PromptError> {
        let replayer = load_cassette(path)
            .map_err(|e| PromptError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let client = Box::new(ReplayingCompletionClient::new(replayer));
        Ok(Self { client })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::{CompleteFuture, Completion, CompletionRequest};
    use crate::prompts::generation_request;

    struct CannedClient;

    impl CompletionClient for CannedClient {
        fn complete(&self, _request: &CompletionRequest) -> CompleteFuture<'_> {
            Box::pin(async { Ok(Completion { text: "a boardroom".into() }) })
        }
    }

    #[test]
    fn finish_fails_while_client_still_holds_recorder() {
        // The recording wrapper keeps a clone of the recorder handle, so the
        // session cannot be finished until the wrapper is dropped. This is
        // why run() drops its Session before flushing the cassette.
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            std::env::temp_dir().join("stockprompt_context_unfinished.cassette.yaml"),
            "rec",
            "abc",
        )));
        let client =
            RecordingCompletionClient::new(Box::new(CannedClient), Arc::clone(&recorder));
        let session = RecordingSession { recorder };

        let err = session.finish().expect_err("finish must fail while the client is alive");
        assert!(err.contains("still has references"));
        drop(client);
    }

    #[tokio::test]
    async fn recording_writes_cassette_once_client_is_dropped() {
        let dir = std::env::temp_dir().join("stockprompt_context_rec_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("completion_client.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec-test", "abc")));
        let client: Box<dyn CompletionClient> = Box::new(RecordingCompletionClient::new(
            Box::new(CannedClient),
            Arc::clone(&recorder),
        ));
        let session = RecordingSession { recorder };

        let request = generation_request("gpt-4o", "data:image/jpeg;base64,AAAA".into());
        let completion = client.complete(&request).await.unwrap();
        assert_eq!(completion.text, "a boardroom");

        drop(client);
        let written = session.finish().expect("finish should succeed once the client is dropped");
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("completion_client"));
        assert!(content.contains("a boardroom"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
