//! HTTP surface: routing, state and error/response mapping.

mod error;
mod handlers;
mod response;
mod state;

pub use error::ApiError;
pub use handlers::app_router;
pub use response::success_body;
pub use state::AppState;
