pub mod app;

pub use app::{generate, health_check, index};
