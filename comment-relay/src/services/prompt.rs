//! Prompt template for comment generation.

use crate::models::{CommentKind, CommentsResponse, GeneratedComment};

const PERSONA: &str = "You are to act as \"Jugnu,\" a Gen-Z, chai-loving, personal branding \
ghostwriter and AI automation expert. Your voice is punchy, playful, and bold but respectful. \
You write like a founder talking to other founders.

Your mission is to generate five (5) distinct comments for the LinkedIn post provided below. \
Each comment must be written in your signature style and serve a specific strategic purpose.

Your Signature Writing Style:
- Short & Punchy: Use short sentences and generous line breaks for easy reading.
- Human Tone: Sound like a real person, not a bot. Use emojis where they feel natural \
(e.g., 🔥, ☕, 😮‍💨, ✅).
- No Fluff: Avoid corporate jargon, buzzwords, and guru-speak. Get straight to the point.
- Analogies & Punchlines: Use clever analogies and spicy punchlines to be memorable.";

const TASK: &str = "Your Task:
1. Read the LinkedIn post provided below
2. Generate five unique comments
3. Label each comment with its strategic framework
4. Ensure the comments are grammatically perfect within the stylistic rules provided
5. Return the response in this exact JSON format:";

const CONTENT_PLACEHOLDER: &str = "Your comment content here...";

/// Marker that precedes the user's post; everything after it is the post.
pub const POST_MARKER: &str = "LinkedIn Post:\n";

/// Build the full instruction text around `post`.
///
/// The post is appended verbatim as the last part of the prompt.
pub fn build_prompt(post: &str) -> String {
    let mut prompt = String::with_capacity(PERSONA.len() + TASK.len() + post.len() + 2048);

    prompt.push_str(PERSONA);
    prompt.push_str("\n\nStrategic Comment Frameworks (Use one for each comment):\n\n");
    for kind in CommentKind::ALL {
        prompt.push('[');
        prompt.push_str(kind.label());
        prompt.push_str("]: ");
        prompt.push_str(kind.framework());
        prompt.push_str("\n\n");
    }
    prompt.push_str(TASK);
    prompt.push_str("\n\n");
    prompt.push_str(&response_format_example());
    prompt.push_str("\n\n");
    prompt.push_str(POST_MARKER);
    prompt.push_str(post);

    prompt
}

/// The JSON shape the model must answer with, labels in response order.
fn response_format_example() -> String {
    let example = CommentsResponse {
        comments: CommentKind::ALL
            .into_iter()
            .map(|kind| GeneratedComment::new(kind, CONTENT_PLACEHOLDER))
            .collect(),
    };
    // Serializing plain strings cannot fail.
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_is_embedded_verbatim_at_the_end() {
        let post = "  I just shipped a new feature!\n\n{weird} \"quotes\" 🚀  ";
        let prompt = build_prompt(post);
        assert!(prompt.ends_with(&format!("{}{}", POST_MARKER, post)));
    }

    #[test]
    fn labels_appear_in_order() {
        let prompt = build_prompt("post");
        let positions: Vec<usize> = CommentKind::ALL
            .iter()
            .map(|kind| {
                prompt
                    .find(&format!("\"type\": \"{}\"", kind.label()))
                    .unwrap_or_else(|| panic!("missing label {}", kind))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn format_example_is_valid_json_with_five_comments() {
        let example: CommentsResponse =
            serde_json::from_str(&response_format_example()).unwrap();
        assert_eq!(example.comments.len(), crate::models::COMMENT_COUNT);
    }

    #[test]
    fn every_framework_is_described() {
        let prompt = build_prompt("post");
        for kind in CommentKind::ALL {
            assert!(prompt.contains(&format!("[{}]: {}", kind.label(), kind.framework())));
        }
    }
}
