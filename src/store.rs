//! Session-scoped prompt store.
//!
//! Holds at most one record per image identifier for the lifetime of one
//! session. Failure and success stay distinct in the record; the `"Error: "`
//! rendering only happens at the display boundary.

use std::collections::HashMap;

/// The current value associated with one reference image: either generated
/// text or the failure that stands in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A successfully generated prompt.
    Text(String),
    /// A per-image completion failure, scoped to this image only.
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl Outcome {
    /// Render the record for display. Failures use the inline `Error: ...`
    /// form so a batch shows one line per image either way.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Failed { message } => format!("Error: {message}"),
        }
    }

    /// Whether this record holds a failure instead of generated text.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// How a store or session operation changed the record for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A record was created for a previously unseen image.
    Inserted,
    /// A record already existed; nothing was written and no call was made.
    Skipped,
    /// An existing record was replaced wholesale.
    Replaced,
}

/// Mapping from image identifier to its current record.
///
/// Created empty at session start and dropped at session end; there is no
/// cross-session persistence and no way to clear a single record.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: HashMap<String, Outcome>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for an image.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Outcome> {
        self.records.get(id)
    }

    /// Whether a record exists for an image.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Unconditionally replace the record for an image. The previous record,
    /// if any, is discarded wholesale; records are never merged.
    pub fn overwrite(&mut self, id: &str, outcome: Outcome) -> Change {
        match self.records.insert(id.to_string(), outcome) {
            Some(_) => Change::Replaced,
            None => Change::Inserted,
        }
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
