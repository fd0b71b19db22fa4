//! Generate/refine driver for one interactive session.
//!
//! A [`Session`] owns the prompt store and the completion client and enforces
//! the interaction contract: at most one paid call per unseen image, zero
//! calls for images already generated, and per-image failure isolation (a
//! failed call becomes that image's record instead of aborting the batch).

use image::DynamicImage;

use crate::encode::image_data_url;
use crate::error::PromptError;
use crate::ports::completion::CompletionClient;
use crate::prompts::{generation_request, refinement_request};
use crate::store::{Change, Outcome, SessionStore};

/// One interactive session: a store plus the client used to fill it.
pub struct Session {
    client: Box<dyn CompletionClient>,
    model: String,
    store: SessionStore,
}

impl Session {
    /// Create a session with an empty store.
    #[must_use]
    pub fn new(client: Box<dyn CompletionClient>, model: String) -> Self {
        Self { client, model, store: SessionStore::new() }
    }

    /// Read access to the store for rendering.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Attach an existing prompt to the session, e.g. one saved by an earlier
    /// run. Replaces any record already present for the identifier.
    pub fn restore(&mut self, id: &str, text: String) {
        self.store.overwrite(id, Outcome::Text(text));
    }

    /// Generate a prompt for an image unless one already exists.
    ///
    /// Performs exactly one completion call for an unseen identifier and zero
    /// calls otherwise. A failed call (encode or endpoint) is recorded as a
    /// [`Outcome::Failed`] for this image only; sibling images in a batch are
    /// unaffected.
    pub async fn get_or_generate(&mut self, id: &str, image: &DynamicImage) -> (Change, &Outcome) {
        let change = if self.store.contains(id) {
            Change::Skipped
        } else {
            let outcome = match image_data_url(image) {
                Ok(data_url) => {
                    let request = generation_request(&self.model, data_url);
                    match self.client.complete(&request).await {
                        Ok(completion) => Outcome::Text(completion.text),
                        Err(e) => Outcome::Failed { message: e.to_string() },
                    }
                }
                Err(e) => Outcome::Failed { message: e.to_string() },
            };
            self.store.overwrite(id, outcome)
        };
        let outcome = self.store.get(id).expect("record must exist after get_or_generate");
        (change, outcome)
    }

    /// Generate prompts for a batch of images, one at a time, in order.
    ///
    /// `on_change` is invoked after each image with the identifier, the state
    /// change, and the resulting record, so the caller can re-render
    /// incrementally. Returns the number of prompts newly generated; skipped
    /// images and failed calls do not count.
    pub async fn generate_all<F>(&mut self, images: &[(String, DynamicImage)], mut on_change: F) -> usize
    where
        F: FnMut(&str, Change, &Outcome),
    {
        let mut generated = 0;
        for (id, image) in images {
            let (change, outcome) = self.get_or_generate(id, image).await;
            if change == Change::Inserted && !outcome.is_failed() {
                generated += 1;
            }
            on_change(id, change, outcome);
        }
        generated
    }

    /// Rewrite the existing prompt for an image per a user instruction.
    ///
    /// The current record's display text is fed to the editor as the original
    /// prompt, so a failed record can still be refined like ordinary text.
    /// On completion the record is replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::NotGenerated`] if the image has no record, or
    /// [`PromptError::EmptyInstruction`] for an empty instruction; in both
    /// cases no call is made and the store is unchanged.
    pub async fn refine(&mut self, id: &str, instruction: &str) -> Result<&Outcome, PromptError> {
        let original = self
            .store
            .get(id)
            .ok_or_else(|| PromptError::NotGenerated(id.to_string()))?
            .display_text();

        let request = refinement_request(&self.model, &original, instruction)?;

        let outcome = match self.client.complete(&request).await {
            Ok(completion) => Outcome::Text(completion.text),
            Err(e) => Outcome::Failed { message: e.to_string() },
        };
        self.store.overwrite(id, outcome);

        Ok(self.store.get(id).expect("record must exist after refine"))
    }
}
