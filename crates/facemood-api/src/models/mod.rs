//! Model module

mod request;
mod response;

pub use request::AnalyzeUrlRequest;
pub use response::AnalyzeResponse;
