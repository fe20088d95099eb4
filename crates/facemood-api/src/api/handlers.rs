//! HTTP handler definitions

use axum::{
  Json,
  extract::{
    Multipart, State,
    multipart::{MultipartError, MultipartRejection},
    rejection::JsonRejection,
  },
  http::StatusCode,
};
use tracing::{debug, error, info, warn};

use facemood::{AnalysisOutcome, FaceRecord, ImageSource};

use super::state::AppState;
use crate::config::Variant;
use crate::errors::{
  ApiError, MSG_INVALID_JSON_FORMAT, MSG_NO_IMAGE_FILE, MSG_REQUEST_MUST_BE_JSON,
};
use crate::models::{AnalyzeResponse, AnalyzeUrlRequest};

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// POST /analyze/url endpoint
///
/// Downloads the image and returns its dominant emotion.
///
/// # Request Body
/// ```json
/// { "image": "https://example.com/face.jpg" }
/// ```
///
/// # Response
/// - 200 OK: bare dominant emotion, e.g. `"happy"`
/// - 400 Bad Request: not JSON, no `image`, download or decode failure,
///   zero or several faces
/// - 500 Internal Server Error: analyzer or other unexpected failure
pub async fn post_analyze_url(
  State(state): State<AppState>,
  payload: Result<Json<AnalyzeUrlRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let Json(request) = payload.map_err(|rejection| {
    let err = json_rejection_to_error(&rejection);
    warn!(reason = %rejection, code = err.code(), "rejected URL analysis request");
    err
  })?;

  debug!(url = %request.image, "URL analysis request received");

  analyze(&state, Variant::Url, ImageSource::Url(request.image)).await
}

/// POST /analyze/upload endpoint
///
/// Reads the multipart field `image` and returns the full analysis of its
/// single face.
///
/// # Response
/// - 200 OK: record list, e.g. `[{"dominant_emotion": "happy", "age": 30, ...}]`
/// - 400 Bad Request: no `image` field, decode failure, zero or several faces
/// - 413 Payload Too Large: body over the configured limit
/// - 500 Internal Server Error: analyzer or other unexpected failure
pub async fn post_analyze_upload(
  State(state): State<AppState>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let mut multipart = multipart.map_err(|rejection| {
    warn!(reason = %rejection, "upload request is not multipart");
    ApiError::invalid_input(MSG_NO_IMAGE_FILE)
  })?;

  let Some(bytes) = read_image_field(&mut multipart).await? else {
    warn!("upload request has no `{}` field", IMAGE_FIELD);
    return Err(ApiError::invalid_input(MSG_NO_IMAGE_FILE));
  };

  debug!(bytes = bytes.len(), "upload analysis request received");

  analyze(&state, Variant::Upload, ImageSource::Bytes(bytes)).await
}

/// Health check endpoint
///
/// Confirms that the server is running.
pub async fn health_check() -> &'static str {
  "OK"
}

/// Maps a face-count outcome onto the variant's response.
///
/// # Errors
/// - `NoFace` / `MultipleFaces` with the variant's wording
/// - `Internal` when the URL variant's single record has no `dominant_emotion`
pub fn respond(variant: Variant, outcome: AnalysisOutcome) -> Result<AnalyzeResponse, ApiError> {
  match outcome {
    AnalysisOutcome::NoFace => Err(ApiError::NoFace(variant.no_face_message())),
    AnalysisOutcome::MultipleFaces(_) => {
      Err(ApiError::MultipleFaces(variant.multiple_faces_message()))
    }
    AnalysisOutcome::SingleFace(records) => match variant {
      Variant::Upload => Ok(AnalyzeResponse::Records(records)),
      Variant::Url => records
        .first()
        .and_then(FaceRecord::dominant_emotion)
        .cloned()
        .map(AnalyzeResponse::Emotion)
        .ok_or_else(|| ApiError::internal("analysis result has no `dominant_emotion`")),
    },
  }
}

/// Shared tail of both endpoints: run the pipeline, map the outcome, log.
async fn analyze(
  state: &AppState,
  variant: Variant,
  source: ImageSource,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let result = match state.pipeline.run(source, variant.actions()).await {
    Ok(outcome) => {
      let faces = outcome.face_count();
      respond(variant, outcome).inspect(|_| info!(%variant, faces, "analysis succeeded"))
    }
    Err(e) => Err(ApiError::from(e)),
  };

  result.map(Json).map_err(|err| {
    if err.status() == StatusCode::INTERNAL_SERVER_ERROR {
      error!(%variant, code = err.code(), error = %err, "analysis failed");
    } else {
      warn!(%variant, code = err.code(), error = %err, "analysis rejected");
    }
    err.sanitized(state.config.expose_errors)
  })
}

/// Returns the bytes of the first `image` field, skipping any other parts.
async fn read_image_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ApiError> {
  while let Some(field) = multipart.next_field().await.inspect_err(log_multipart_error)? {
    if field.name() == Some(IMAGE_FIELD) {
      let bytes = field.bytes().await.inspect_err(log_multipart_error)?;
      return Ok(Some(bytes.to_vec()));
    }
  }
  Ok(None)
}

fn log_multipart_error(err: &MultipartError) {
  warn!(reason = %err.body_text(), status = err.status().as_u16(), "malformed multipart body");
}

fn json_rejection_to_error(rejection: &JsonRejection) -> ApiError {
  match rejection {
    JsonRejection::MissingJsonContentType(_) => ApiError::invalid_input(MSG_REQUEST_MUST_BE_JSON),
    other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
      ApiError::PayloadTooLarge(other.body_text())
    }
    _ => ApiError::invalid_input(MSG_INVALID_JSON_FORMAT),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::errors::ApiErrorKind;

  fn one_face(record: FaceRecord) -> AnalysisOutcome {
    AnalysisOutcome::from_records(vec![record])
  }

  #[test]
  fn respond_upload_returns_full_list() {
    let record = FaceRecord::new().with("age", 30).with("gender", "Male");
    let response = respond(Variant::Upload, one_face(record)).unwrap();

    assert_eq!(
      serde_json::to_value(&response).unwrap(),
      json!([{ "age": 30, "gender": "Male" }])
    );
  }

  #[test]
  fn respond_url_returns_dominant_emotion() {
    let record = FaceRecord::new().with("dominant_emotion", "neutral");
    let response = respond(Variant::Url, one_face(record)).unwrap();

    assert_eq!(serde_json::to_value(&response).unwrap(), json!("neutral"));
  }

  #[test]
  fn respond_url_without_emotion_is_internal() {
    let err = respond(Variant::Url, one_face(FaceRecord::new())).unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Internal);
  }

  #[test]
  fn respond_no_face_uses_variant_wording() {
    let err = respond(Variant::Upload, AnalysisOutcome::NoFace).unwrap_err();
    assert_eq!(err.to_string(), "No Face Detected!");

    let err = respond(Variant::Url, AnalysisOutcome::NoFace).unwrap_err();
    assert_eq!(err.to_string(), "Yüz tespit edilemedi!");
  }

  #[test]
  fn respond_multiple_faces_uses_variant_wording() {
    let err = respond(Variant::Upload, AnalysisOutcome::MultipleFaces(2)).unwrap_err();
    assert_eq!(err.to_string(), "More than one faces detected!");
    assert_eq!(err.kind(), ApiErrorKind::MultipleFaces);

    let err = respond(Variant::Url, AnalysisOutcome::MultipleFaces(5)).unwrap_err();
    assert_eq!(err.to_string(), "Birden fazla yüz bulundu!");
  }
}
