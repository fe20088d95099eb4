//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{IMAGE_FIELD, health_check, post_analyze_upload, post_analyze_url, respond};
pub use routes::{create_router, run_server};
pub use state::AppState;
