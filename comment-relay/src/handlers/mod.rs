pub mod generate;
pub mod health;

pub use generate::{generate_comments, method_not_allowed, preflight};
pub use health::{health_check, metrics_endpoint, readiness_check};
