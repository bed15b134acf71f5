use serde::{Deserialize, Serialize};
use std::fmt;

const SUMMARY_PREFIX: &str = "[Previous conversation summary: ";
const SUMMARY_SUFFIX: &str = "]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Label used when a transcript is rendered for the summarizer.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat turn. Fields are private so a turn cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Synthetic assistant turn standing in for a summarized prefix.
    pub fn summary(summary_text: &str) -> Self {
        Self::assistant(format!("{SUMMARY_PREFIX}{summary_text}{SUMMARY_SUFFIX}"))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_summary(&self) -> bool {
        self.role == Role::Assistant
            && self.content.starts_with(SUMMARY_PREFIX)
            && self.content.ends_with(SUMMARY_SUFFIX)
    }
}

/// Chronologically ordered chat history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn first(&self) -> Option<&Turn> {
        self.turns.first()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self::from_turns(turns)
    }
}

/// Render turns as `ROLE: content` blocks separated by blank lines.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role().transcript_label(), turn.content()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
