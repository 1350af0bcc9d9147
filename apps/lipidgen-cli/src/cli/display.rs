//! Styled terminal output.
//!
//! Every user-facing message is a `Message` (an action word plus details)
//! rendered with a right-aligned, colored action column, so command output
//! lines up the way the rest of the tooling's output does.

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::stdout;

/// Width of the action column in terminal output
pub const ACTION_WIDTH: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub action: String,
    pub details: String,
}

impl Message {
    pub fn new(action: String, details: String) -> Message {
        Message { action, details }
    }
}

pub fn show_message_wrapper(message_type: MessageType, message: Message) {
    let color = match message_type {
        MessageType::Info => Color::Cyan,
        MessageType::Success => Color::Green,
        MessageType::Error => Color::Red,
    };
    let action = format!("{:>width$}", message.action, width = ACTION_WIDTH);
    let styled = execute!(
        stdout(),
        SetForegroundColor(color),
        SetAttribute(Attribute::Bold),
        Print(&action),
        ResetColor,
        Print(" "),
        Print(&message.details),
        Print("\n"),
    );
    if styled.is_err() {
        println!("{} {}", action, message.details);
    }
}

macro_rules! show_message {
    ($message_type:expr, $message:expr) => {
        $crate::cli::display::show_message_wrapper($message_type, $message)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_action_and_details() {
        let message = Message::new("Generate".to_string(), "3 tables".to_string());
        assert_eq!(message.action, "Generate");
        assert_eq!(message.details, "3 tables");
    }
}
