//! Per-face analysis records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute key holding the highest-confidence emotion label
pub const DOMINANT_EMOTION_KEY: &str = "dominant_emotion";

/// Analysis actions a backend may run on each detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
  /// Emotion distribution and dominant emotion
  Emotion,
  /// Apparent age
  Age,
  /// Gender
  Gender,
  /// Race
  Race,
}

impl Action {
  /// Every action, i.e. the backend's default set
  pub const ALL: &[Action] = &[Action::Emotion, Action::Age, Action::Gender, Action::Race];

  /// Only emotion analysis
  pub const EMOTION_ONLY: &[Action] = &[Action::Emotion];
}

/// One detected face.
///
/// An open mapping of attribute name to value (`dominant_emotion`, `age`,
/// `gender`, `region`, ...). The backend decides which keys exist, so no
/// schema is imposed beyond "JSON object". Serializes as the bare object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceRecord(Map<String, Value>);

impl FaceRecord {
  /// Creates an empty record
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style attribute insertion
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.0.insert(key.into(), value.into());
    self
  }

  /// Looks up an attribute
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  /// The `dominant_emotion` attribute, if the backend produced one
  pub fn dominant_emotion(&self) -> Option<&Value> {
    self.get(DOMINANT_EMOTION_KEY)
  }

  /// Number of attributes
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// True when the record has no attributes
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn record_serializes_as_bare_object() {
    let record = FaceRecord::new().with("age", 30).with("gender", "Male");
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value, json!({ "age": 30, "gender": "Male" }));
  }

  #[test]
  fn record_deserializes_unknown_attributes() {
    let record: FaceRecord = serde_json::from_value(json!({
      "dominant_emotion": "happy",
      "emotion": { "happy": 97.1, "sad": 0.4 },
      "region": { "x": 10, "y": 12, "w": 80, "h": 80 }
    }))
    .unwrap();

    assert_eq!(record.dominant_emotion(), Some(&json!("happy")));
    assert_eq!(record.len(), 3);
  }

  #[test]
  fn record_rejects_non_object() {
    assert!(serde_json::from_value::<FaceRecord>(json!(["happy"])).is_err());
  }

  #[test]
  fn empty_record_has_no_emotion() {
    let record = FaceRecord::new();
    assert!(record.is_empty());
    assert_eq!(record.dominant_emotion(), None);
  }

  #[test]
  fn action_serializes_lowercase() {
    assert_eq!(
      serde_json::to_value(Action::EMOTION_ONLY).unwrap(),
      json!(["emotion"])
    );
    assert_eq!(
      serde_json::to_value(Action::ALL).unwrap(),
      json!(["emotion", "age", "gender", "race"])
    );
  }
}
