use std::fmt;
use thiserror::Error;

/// Longest display name kept for a snake, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 24;
/// Longest chat message kept for the feed, in characters.
pub const MAX_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatEventError {
    #[error("chat event has an empty identity")]
    EmptyIdentity,
}

/// Stable per-user key. Never a per-message id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    pub fn parse(raw: &str) -> Result<Self, ChatEventError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChatEventError::EmptyIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chat message as delivered by a chat collaborator, reduced to what the game needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub identity: String,
    pub display_name: String,
    /// Text of the message. Empty for bare spawn requests.
    pub message: String,
    pub color_hint: Option<String>,
}

impl ChatEvent {
    pub fn new(identity: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            display_name: display_name.into(),
            message: String::new(),
            color_hint: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_color_hint(mut self, hint: impl Into<String>) -> Self {
        self.color_hint = Some(hint.into());
        self
    }

    /// Validated identity plus the display name to show.
    /// A blank name falls back to the identity; long names are truncated.
    pub fn validate(&self) -> Result<(Identity, String), ChatEventError> {
        let identity = Identity::parse(&self.identity)?;
        let trimmed = self.display_name.trim();
        let name_source = if trimmed.is_empty() {
            identity.as_str()
        } else {
            trimmed
        };
        let name: String = name_source.chars().take(MAX_DISPLAY_NAME_CHARS).collect();
        Ok((identity, name))
    }

    /// Message text trimmed and cut to `MAX_MESSAGE_CHARS`.
    pub fn message_text(&self) -> String {
        self.message.trim().chars().take(MAX_MESSAGE_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_trimmed() {
        let id = Identity::parse("  user-42 ").unwrap();
        assert_eq!(id.as_str(), "user-42");
    }

    #[test]
    fn test_blank_identity_rejected() {
        assert_eq!(Identity::parse("   "), Err(ChatEventError::EmptyIdentity));
        assert_eq!(
            ChatEvent::new("", "Fox").validate(),
            Err(ChatEventError::EmptyIdentity)
        );
    }

    #[test]
    fn test_blank_name_falls_back_to_identity() {
        let (id, name) = ChatEvent::new("u1", "  ").validate().unwrap();
        assert_eq!(id.as_str(), "u1");
        assert_eq!(name, "u1");
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "x".repeat(60);
        let (_, name) = ChatEvent::new("u1", long).validate().unwrap();
        assert_eq!(name.chars().count(), MAX_DISPLAY_NAME_CHARS);
    }

    #[test]
    fn test_message_trimmed_and_truncated() {
        let event = ChatEvent::new("u1", "Fox").with_message("  hello  ");
        assert_eq!(event.message_text(), "hello");

        let event = ChatEvent::new("u1", "Fox").with_message("y".repeat(500));
        assert_eq!(event.message_text().chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(ChatEvent::new("u1", "Fox").message_text(), "");
    }

    #[test]
    fn test_color_hint_kept() {
        let event = ChatEvent::new("u1", "Fox").with_color_hint("#4CAF50");
        assert_eq!(event.color_hint.as_deref(), Some("#4CAF50"));
    }
}
