//! CLI routines.
//!
//! A routine is a function returning `Result<RoutineSuccess,
//! RoutineFailure>`; the dispatcher renders the message of either outcome
//! and maps it to an exit code.

pub mod generate;

use crate::cli::display::{Message, MessageType};

#[derive(Debug, Clone)]
pub struct RoutineSuccess {
    pub message: Message,
    pub message_type: MessageType,
}

impl RoutineSuccess {
    pub fn success(message: Message) -> Self {
        Self {
            message,
            message_type: MessageType::Success,
        }
    }
}

#[derive(Debug)]
pub struct RoutineFailure {
    pub message: Message,
    pub error: Option<anyhow::Error>,
}

impl RoutineFailure {
    pub fn new<E: Into<anyhow::Error>>(message: Message, error: E) -> Self {
        Self {
            message,
            error: Some(error.into()),
        }
    }

    /// A failure whose message already says everything.
    pub fn error(message: Message) -> Self {
        Self {
            message,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_success_message_type() {
        let success =
            RoutineSuccess::success(Message::new("Generate".to_string(), "done".to_string()));
        assert_eq!(success.message_type, MessageType::Success);
        assert_eq!(success.message.action, "Generate");
    }

    #[test]
    fn failure_wraps_the_causing_error() {
        let failure = RoutineFailure::new(
            Message::new("Generate".to_string(), "failed".to_string()),
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(failure.error.is_some());
    }
}
