//! Request and result models.

use std::fmt;

use bytes::Bytes;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EmotionError, EmotionResult};

/// Message for a request without usable text.
pub const TEXT_REQUIRED: &str = "Text is required";

/// A single analysis request: the text to classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    /// Build a request from text, rejecting empty input.
    pub fn new(text: impl Into<String>) -> EmotionResult<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(EmotionError::validation(TEXT_REQUIRED));
        }
        Ok(Self { text })
    }

    /// Decode a raw JSON request body.
    ///
    /// Anything other than an object with a non-empty string `text` field is
    /// a validation error.
    pub fn from_json(body: &[u8]) -> EmotionResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|_| EmotionError::validation(TEXT_REQUIRED))?;

        match value.get("text").and_then(|t| t.as_str()) {
            Some(text) => Self::new(text),
            None => Err(EmotionError::validation(TEXT_REQUIRED)),
        }
    }
}

/// Emotion name to score, in the order the upstream service returned them.
///
/// Scores are documented as 0.00 to 1.00 but are kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionScores {
    entries: Vec<(String, f64)>,
}

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a score. An existing emotion keeps its position.
    pub fn insert(&mut self, emotion: impl Into<String>, score: f64) {
        let emotion = emotion.into();
        match self.entries.iter_mut().find(|(name, _)| *name == emotion) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((emotion, score)),
        }
    }

    pub fn get(&self, emotion: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == emotion)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Parse an upstream success body.
    pub fn from_json(body: &[u8]) -> EmotionResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (emotion, score) in iter {
            scores.insert(emotion, score);
        }
        scores
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EmotionScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = EmotionScores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of emotion names to numeric scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = EmotionScores::new();
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    scores.insert(name, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// A response from the upstream service, before any interpretation.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
