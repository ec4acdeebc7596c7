use serde::{Deserialize, Serialize};

/// Push subscription of one chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notificator {
    #[serde(rename = "chatid")]
    pub chat_id: i64,
    pub origin: String,
    #[serde(rename = "chattitle", default)]
    pub chat_title: String,
    #[serde(rename = "isactive")]
    pub is_active: bool,
}

impl Notificator {
    pub fn new(chat_id: i64, origin: &str, chat_title: String, is_active: bool) -> Self {
        Notificator {
            chat_id,
            origin: origin.to_string(),
            chat_title,
            is_active,
        }
    }
}
