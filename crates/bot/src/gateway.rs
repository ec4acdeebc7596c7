use async_trait::async_trait;
use eyre::{eyre, Context as _, Error};
use log::{error, info};
use model::reply::{MessageKind, Reply};
use teloxide::{
    payloads::{SendMessageSetters as _, SendPhotoSetters as _},
    prelude::Requester as _,
    types::{ChatId, InputFile, ParseMode},
    Bot,
};
use url::Url;

/// Outbound side of the messenger.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, html: &str) -> Result<(), Error>;

    async fn send_image(
        &self,
        chat_id: i64,
        location: &str,
        caption: Option<&str>,
    ) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct TgGateway {
    bot: Bot,
}

impl TgGateway {
    pub fn new(bot: Bot) -> Self {
        TgGateway { bot }
    }

    pub fn from_token(token: &str) -> Self {
        TgGateway::new(Bot::new(token))
    }
}

#[async_trait]
impl Gateway for TgGateway {
    async fn send_text(&self, chat_id: i64, html: &str) -> Result<(), Error> {
        self.bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .await
            .context(format!("Failed to send message to {}", chat_id))?;
        Ok(())
    }

    async fn send_image(
        &self,
        chat_id: i64,
        location: &str,
        caption: Option<&str>,
    ) -> Result<(), Error> {
        let url = Url::parse(location).context(format!("Invalid image location {}", location))?;
        let request = self.bot.send_photo(ChatId(chat_id), InputFile::url(url));
        let sent = match caption {
            Some(caption) => request.caption(caption).await,
            None => request.await,
        };
        sent.context(format!("Failed to send image to {}", chat_id))?;
        Ok(())
    }
}

async fn send(gateway: &dyn Gateway, chat_id: i64, reply: &Reply) -> Result<(), Error> {
    match reply.kind {
        MessageKind::Text => gateway.send_text(chat_id, &reply.message).await,
        MessageKind::Image => {
            gateway
                .send_image(chat_id, &reply.message, reply.caption.as_deref())
                .await
        }
    }
}

/// Delivers a reply and returns the number of chats it reached.
///
/// Noop replies are not sent. Fan-out replies go to their own chat list, a
/// failing chat is logged and skipped. Other replies go to `chat_id`.
pub async fn deliver(
    gateway: &dyn Gateway,
    chat_id: Option<i64>,
    reply: &Reply,
) -> Result<usize, Error> {
    if !reply.is_deliverable() {
        info!("Nothing to deliver: {}", reply.message);
        return Ok(0);
    }

    if reply.has_multiple_messages {
        let chat_ids = reply.chat_ids.as_deref().unwrap_or_default();
        let mut delivered = 0;
        for chat_id in chat_ids {
            match send(gateway, *chat_id, reply).await {
                Ok(()) => delivered += 1,
                Err(err) => error!("Failed to deliver to {}: {:#}", chat_id, err),
            }
        }
        info!("Delivered to {} of {} chats", delivered, chat_ids.len());
        return Ok(delivered);
    }

    let chat_id = chat_id.ok_or_else(|| eyre!("No chat to deliver to"))?;
    send(gateway, chat_id, reply).await?;
    Ok(1)
}
