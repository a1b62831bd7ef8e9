//! Conversation transcript model
//!
//! An ordered sequence of (role, text) turns supplied by the caller. A
//! transcript is append-only while a request is being assembled and
//! read-only once handed to the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a turn's speaker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user turn
    User,

    /// Assistant turn
    Assistant,

    /// System turn (master prompt)
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// Role of the turn's speaker
    pub role: Role,

    /// Text content of the turn
    pub content: String,
}

impl Turn {
    /// Create a new user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a new system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Ordered list of conversation turns
///
/// Construction consumes the turn list; afterwards all access goes
/// through read-only views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create a transcript from an ordered list of turns
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// All turns, in order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if the transcript has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent user turn, if any
    pub fn last_user_turn(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == Role::User)
    }

    /// All user turns, in order
    pub fn user_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.role == Role::User)
    }

    /// All turn texts joined with newlines
    pub fn joined_text(&self) -> String {
        self.turns
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let user = Turn::user("Hello");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "Hello");

        let assistant = Turn::assistant("Hi there");
        assert_eq!(assistant.role, Role::Assistant);

        let system = Turn::system("You are an interviewer");
        assert_eq!(system.role, Role::System);
    }

    #[test]
    fn test_role_serialization() {
        let turn = Turn::user("test");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"user"#));

        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }

    #[test]
    fn test_last_user_turn() {
        let transcript = Transcript::new(vec![
            Turn::user("first"),
            Turn::assistant("reply"),
            Turn::user("second"),
            Turn::assistant("reply again"),
        ]);
        assert_eq!(transcript.last_user_turn().unwrap().content, "second");
    }

    #[test]
    fn test_last_user_turn_empty() {
        let transcript = Transcript::new(vec![Turn::assistant("only assistant")]);
        assert!(transcript.last_user_turn().is_none());
        assert!(Transcript::default().last_user_turn().is_none());
    }

    #[test]
    fn test_user_turns_order() {
        let transcript = Transcript::new(vec![
            Turn::user("a"),
            Turn::assistant("x"),
            Turn::user("b"),
        ]);
        let users: Vec<_> = transcript.user_turns().map(|t| t.content.as_str()).collect();
        assert_eq!(users, vec!["a", "b"]);
    }

    #[test]
    fn test_joined_text() {
        let transcript = Transcript::new(vec![Turn::user("one"), Turn::assistant("two")]);
        assert_eq!(transcript.joined_text(), "one\ntwo");
    }
}
