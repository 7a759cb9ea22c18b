use crate::message::{Message, MessageType};
use crate::persona::Persona;

/// Per-conversation record of the running message history and the persona
/// selected on the previous turn. One instance per chat session, created at
/// session start and discarded with it; nothing is persisted.
///
/// History is append-only: messages are never edited or removed, even when a
/// later step of the same turn fails.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub history: Vec<Message>,
    pub active_persona: Persona,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            active_persona: Persona::Narrator,
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history.push(Message::new(MessageType::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.history.push(Message::new(MessageType::Assistant, content));
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_with_the_narrator() {
        let session = SessionState::new();
        assert!(session.history.is_empty());
        assert_eq!(session.active_persona, Persona::Narrator);
    }

    #[test]
    fn history_preserves_original_casing_and_order() {
        let mut session = SessionState::new();
        session.push_user("I Attack The Goblin");
        session.push_assistant("You rolled a 12.");
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].content, "I Attack The Goblin");
        assert_eq!(session.history[0].message_type, MessageType::User);
        assert_eq!(session.history[1].message_type, MessageType::Assistant);
    }
}
