//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded set of interactions for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable name of the recording.
    pub name: String,
    /// When the cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made at, or `"unknown"`.
    pub commit: String,
    /// The recorded interactions, in order.
    pub interactions: Vec<Interaction>,
}

/// One recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// The port name (e.g., `"completion_client"`).
    pub port: String,
    /// The method name (e.g., `"complete"`).
    pub method: String,
    /// The serialized request.
    pub input: serde_json::Value,
    /// The serialized result, using the `Ok`/`Err` JSON convention.
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cassette_yaml_round_trip() {
        let cassette = Cassette {
            name: "refine-session".into(),
            recorded_at: Utc::now(),
            commit: "deadbeef".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "completion_client".into(),
                method: "complete".into(),
                input: json!({"model": "gpt-4o"}),
                output: json!({"Ok": {"text": "a prompt"}}),
            }],
        };

        let yaml = serde_yaml::to_string(&cassette).unwrap();
        let parsed: Cassette = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "refine-session");
        assert_eq!(parsed.interactions.len(), 1);
        assert_eq!(parsed.interactions[0].port, "completion_client");
    }
}
