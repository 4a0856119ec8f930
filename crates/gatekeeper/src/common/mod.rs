mod error;
pub mod metrics;
mod state;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;
