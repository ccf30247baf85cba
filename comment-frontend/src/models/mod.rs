pub mod comment;

pub use comment::{CommentsResponse, GeneratedComment};
