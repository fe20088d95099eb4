//! Pipeline inputs and the face-count outcome

use super::face::FaceRecord;

/// Where the raw image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
  /// Download from a remote http(s) URL
  Url(String),
  /// Bytes already in hand (multipart upload, local file)
  Bytes(Vec<u8>),
}

/// Result of analysing one image, keyed by how many faces were found.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
  /// Zero faces
  NoFace,
  /// Exactly one face. The sequence always has length 1.
  SingleFace(Vec<FaceRecord>),
  /// More than one face (the count is kept for logging)
  MultipleFaces(usize),
}

impl AnalysisOutcome {
  /// Maps an analyzer result sequence onto the three outcomes.
  #[must_use]
  pub fn from_records(records: Vec<FaceRecord>) -> Self {
    match records.len() {
      0 => Self::NoFace,
      1 => Self::SingleFace(records),
      n => Self::MultipleFaces(n),
    }
  }

  /// Number of faces found
  pub fn face_count(&self) -> usize {
    match self {
      Self::NoFace => 0,
      Self::SingleFace(_) => 1,
      Self::MultipleFaces(n) => *n,
    }
  }

  /// The single face record, if exactly one face was found
  pub fn single(&self) -> Option<&FaceRecord> {
    match self {
      Self::SingleFace(records) => records.first(),
      _ => None,
    }
  }
}
