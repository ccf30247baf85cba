pub mod extract;
pub mod generator;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use extract::extract_json_object;
pub use generator::{validate_comments, CommentGenerator, GenerationError};
pub use prompt::build_prompt;
