use serde::{Deserialize, Serialize};

/// Number of comments every successful response must contain.
pub const COMMENT_COUNT: usize = 5;

/// The strategic framework a generated comment is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentKind {
    #[serde(rename = "Magnetic Comment")]
    Magnetic,
    #[serde(rename = "Credibility Comment")]
    Credibility,
    #[serde(rename = "Resonance Comment")]
    Resonance,
    #[serde(rename = "Funny/Smart Punchline")]
    Punchline,
    #[serde(rename = "Subtle CTA Comment")]
    SubtleCta,
}

impl CommentKind {
    /// All kinds, in the order the response lists them.
    pub const ALL: [CommentKind; COMMENT_COUNT] = [
        CommentKind::Magnetic,
        CommentKind::Credibility,
        CommentKind::Resonance,
        CommentKind::Punchline,
        CommentKind::SubtleCta,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommentKind::Magnetic => "Magnetic Comment",
            CommentKind::Credibility => "Credibility Comment",
            CommentKind::Resonance => "Resonance Comment",
            CommentKind::Punchline => "Funny/Smart Punchline",
            CommentKind::SubtleCta => "Subtle CTA Comment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// What a comment of this kind is supposed to achieve.
    pub fn framework(self) -> &'static str {
        match self {
            CommentKind::Magnetic => {
                "Create curiosity. Say something that makes people want to click on your \
                 profile. This is often a bold take or a perspective shift."
            }
            CommentKind::Credibility => {
                "Build authority. Share a relevant micro-insight, a quick tip, or a result \
                 from a system you've built that relates to the post. Show you know your \
                 stuff without bragging."
            }
            CommentKind::Resonance => {
                "Connect emotionally. Share a punchy, relatable feeling or experience. This \
                 is about showing you \"get it.\""
            }
            CommentKind::Punchline => {
                "Show personality. Be witty, clever, or add a humorous twist to the post's \
                 topic. This is great for sparking quick engagement."
            }
            CommentKind::SubtleCta => {
                "Nudge to action. End with a line that invites a DM or a thought-provoking \
                 question that naturally leads to a conversation about your solutions."
            }
        }
    }
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled comment. The label is kept as free text because the relay
/// passes upstream output through without checking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedComment {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl GeneratedComment {
    pub fn new(kind: CommentKind, content: impl Into<String>) -> Self {
        Self {
            kind: kind.label().to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<GeneratedComment>,
}
