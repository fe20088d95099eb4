//! Data model definitions

mod decoded_image;
mod face;
mod outcome;

pub use decoded_image::DecodedImage;
pub use face::{Action, DOMINANT_EMOTION_KEY, FaceRecord};
pub use outcome::{AnalysisOutcome, ImageSource};
