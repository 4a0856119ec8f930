mod access_routes;
mod fallback;
mod health_routes;
mod key_routes;

pub use access_routes::access_routes;
pub use fallback::{method_not_allowed, not_found};
pub use health_routes::health_routes;
pub use key_routes::key_routes;
