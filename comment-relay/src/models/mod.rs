pub mod comment;

pub use comment::{CommentKind, CommentsResponse, GeneratedComment, COMMENT_COUNT};
