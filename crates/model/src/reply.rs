use strum::Display;

pub const NOT_A_COMMAND: &str = "Not a command";
pub const NO_NEW_CASES: &str = "No new cases";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Benign outcome, nothing to deliver.
    Noop = 0,
    Deliver = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
}

/// Message object handed to the messaging gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    pub kind: MessageKind,
    /// Html body for text, image location for images.
    pub message: String,
    pub caption: Option<String>,
    pub chat_ids: Option<Vec<i64>>,
    pub has_multiple_messages: bool,
}

impl Reply {
    pub fn text(message: String) -> Reply {
        Reply {
            status: Status::Deliver,
            kind: MessageKind::Text,
            message,
            caption: None,
            chat_ids: None,
            has_multiple_messages: false,
        }
    }

    pub fn noop(message: &str) -> Reply {
        Reply {
            status: Status::Noop,
            ..Reply::text(message.to_string())
        }
    }

    pub fn image(location: String, caption: &str) -> Reply {
        Reply {
            kind: MessageKind::Image,
            caption: Some(caption.to_string()),
            ..Reply::text(location)
        }
    }

    pub fn broadcast(message: String, chat_ids: Vec<i64>) -> Reply {
        Reply {
            chat_ids: Some(chat_ids),
            has_multiple_messages: true,
            ..Reply::text(message)
        }
    }

    pub fn is_deliverable(&self) -> bool {
        self.status == Status::Deliver
    }
}
