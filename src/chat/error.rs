//! Failures of a chat exchange with the backend.

use thiserror::Error;

/// Errors produced while sending a chat message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The message was blank after trimming; nothing was sent.
    #[error("message is empty")]
    EmptyMessage,

    /// Another message from the same chat is still waiting for its reply.
    #[error("a request is already in flight")]
    Busy,

    /// The backend did not answer within the request timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("status: {0}")]
    Status(u16),

    /// Connection-level failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

const APOLOGY: &str = "Sorry. ";

impl ChatError {
    /// Text shown to the person chatting
    pub fn user_message(&self) -> String {
        let detail = match self {
            ChatError::EmptyMessage => "Please enter a message.",
            ChatError::Busy => "Still working on your previous message. Please wait.",
            ChatError::Timeout => "The response timed out. Please try again.",
            ChatError::Status(500) => "An AI server error occurred. Please try again shortly.",
            ChatError::Status(404) => {
                "The chatbot API could not be found. Please contact the administrator."
            }
            _ => "The consultation is currently delayed. Please try again shortly.",
        };
        format!("{APOLOGY}{detail}")
    }

    /// Map a reqwest failure onto the chat taxonomy
    pub(crate) fn from_send(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ChatError::Timeout
        } else if let Some(status) = error.status() {
            ChatError::Status(status.as_u16())
        } else {
            ChatError::Transport(error)
        }
    }

    /// Like [`ChatError::from_send`] but for failures while reading the body
    pub(crate) fn from_body(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Decode(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_follow_failure_kind() {
        assert_eq!(
            ChatError::Timeout.user_message(),
            "Sorry. The response timed out. Please try again."
        );
        assert_eq!(
            ChatError::Status(500).user_message(),
            "Sorry. An AI server error occurred. Please try again shortly."
        );
        assert_eq!(
            ChatError::Status(404).user_message(),
            "Sorry. The chatbot API could not be found. Please contact the administrator."
        );
        assert_eq!(
            ChatError::Status(502).user_message(),
            "Sorry. The consultation is currently delayed. Please try again shortly."
        );
        assert!(ChatError::EmptyMessage.user_message().starts_with(APOLOGY));
    }

    #[test]
    fn status_display_matches_backend_wording() {
        assert_eq!(ChatError::Status(404).to_string(), "status: 404");
    }
}
