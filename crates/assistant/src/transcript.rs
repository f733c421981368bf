//! Caller-held conversation state.
//!
//! The engine is stateless; whoever renders the chat keeps a
//! [`Transcript`] and appends an exchange after each answered query.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// An ordered chat history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one user query and the assistant's reply to it.
    pub fn record(&mut self, query: impl Into<String>, reply: impl Into<String>) {
        self.turns.push(Turn { role: Role::User, text: query.into() });
        self.turns.push(Turn { role: Role::Assistant, text: reply.into() });
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_exchanges_in_order() {
        let mut transcript = Transcript::new();
        transcript.record("hi", "Hello!");
        transcript.record("panadol", "Medicine results:");
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.turns()[0].role, Role::User);
        assert_eq!(transcript.turns()[1].role, Role::Assistant);
        assert_eq!(transcript.turns()[2].text, "panadol");
    }

    #[test]
    fn starts_empty() {
        assert!(Transcript::new().is_empty());
    }
}
