//! Conversation turns and the bounded history window.
//!
//! The client owns the full conversation; the proxy only ever forwards the
//! trailing [`HISTORY_WINDOW`] turns. Older turns are dropped silently, no
//! summarization.

use serde::{Deserialize, Serialize};

/// Maximum number of prior turns forwarded upstream with each request.
pub const HISTORY_WINDOW: usize = 10;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat-style provider APIs.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Human-readable label used in serialized transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message in the conversation, immutable once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// Trailing window of at most `n` turns, oldest to newest.
pub fn window(turns: &[ChatTurn], n: usize) -> &[ChatTurn] {
    let start = turns.len().saturating_sub(n);
    &turns[start..]
}

/// Serializes turns as `User:` / `Assistant:` lines for the single-prompt
/// provider.
pub fn transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n: usize) -> Vec<ChatTurn> {
        (1..=n)
            .map(|i| {
                if i % 2 == 1 {
                    ChatTurn::user(&format!("turn {}", i))
                } else {
                    ChatTurn::assistant(&format!("turn {}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_shorter_than_limit() {
        let turns = history(3);
        assert_eq!(window(&turns, HISTORY_WINDOW), &turns[..]);
    }

    #[test]
    fn test_window_at_limit() {
        let turns = history(10);
        assert_eq!(window(&turns, HISTORY_WINDOW).len(), 10);
        assert_eq!(window(&turns, HISTORY_WINDOW)[0].content, "turn 1");
    }

    #[test]
    fn test_window_drops_oldest() {
        let turns = history(14);
        let recent = window(&turns, HISTORY_WINDOW);

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].content, "turn 5");
        assert_eq!(recent[9].content, "turn 14");

        // Relative order preserved
        for pair in recent.windows(2) {
            assert_ne!(pair[0].role, pair[1].role);
        }
    }

    #[test]
    fn test_window_empty() {
        assert!(window(&[], HISTORY_WINDOW).is_empty());
    }

    #[test]
    fn test_transcript_format() {
        let turns = vec![
            ChatTurn::user("How do I learn SQL?"),
            ChatTurn::assistant("Start with SELECT statements."),
        ];

        assert_eq!(
            transcript(&turns),
            "User: How do I learn SQL?\nAssistant: Start with SELECT statements."
        );
    }

    #[test]
    fn test_role_serde() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(turn.role, Role::Assistant);

        let json = serde_json::to_string(&ChatTurn::user("hello")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);
    }
}
