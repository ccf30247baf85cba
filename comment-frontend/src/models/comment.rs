use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedComment {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl GeneratedComment {
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
        }
    }

    /// CSS badge class for the comment's label; unknown labels get the
    /// neutral badge.
    pub fn badge_class(&self) -> &'static str {
        match self.kind.as_str() {
            "Magnetic Comment" => "badge-magnetic",
            "Credibility Comment" => "badge-credibility",
            "Resonance Comment" => "badge-resonance",
            "Funny/Smart Punchline" => "badge-punchline",
            "Subtle CTA Comment" => "badge-cta",
            _ => "badge-neutral",
        }
    }
}

/// Relay success body.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<GeneratedComment>,
}
