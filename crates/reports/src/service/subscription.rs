use log::info;
use model::{errors::ReportError, notificator::Notificator, reply::Reply};

use super::Reports;

pub const UPDATES_STARTED: &str = "Tapausten seuranta on aloitettu. Saat ilmoituksia uusista tapauksista kunnes perut ilmoitukset /stopupdates komennolla";
pub const UPDATES_STOPPED: &str = "Tapausten seuranta on lopetettu. Saat ilmoitukset uusista tapauksista /startupdates komennolla";

impl Reports {
    /// Turns new case alerts on or off for a chat.
    pub async fn set_updates(
        &self,
        chat_id: i64,
        chat_title: String,
        active: bool,
    ) -> Result<Reply, ReportError> {
        let origin = &self.settings.origin;
        let notificator = match self.store.subscriber(chat_id, origin).await? {
            Some(mut existing) => {
                existing.is_active = active;
                existing.chat_title = chat_title;
                existing
            }
            None => Notificator::new(chat_id, origin, chat_title, active),
        };
        self.store.upsert_subscriber(&notificator).await?;
        info!("Updates for chat {} active: {}", chat_id, active);

        let message = if active {
            UPDATES_STARTED
        } else {
            UPDATES_STOPPED
        };
        Ok(Reply::text(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use model::notificator::Notificator;

    use super::*;
    use crate::{service::fake::FakeStore, settings::BOT_ORIGIN, Settings};

    #[tokio::test]
    async fn test_start_and_stop() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let reply = reports.set_updates(7, "Ryhmä".to_string(), true).await.unwrap();
        assert_eq!(reply.message, UPDATES_STARTED);
        assert_eq!(
            store.subscriber_list(),
            vec![Notificator::new(7, BOT_ORIGIN, "Ryhmä".to_string(), true)]
        );

        let reply = reports
            .set_updates(7, "Uusi nimi".to_string(), false)
            .await
            .unwrap();
        assert_eq!(reply.message, UPDATES_STOPPED);
        assert_eq!(
            store.subscriber_list(),
            vec![Notificator::new(7, BOT_ORIGIN, "Uusi nimi".to_string(), false)]
        );
        assert_eq!(store.writes().len(), 2);
    }

    #[tokio::test]
    async fn test_other_origin_untouched() {
        let store = Arc::new(FakeStore {
            subscribers: Mutex::new(vec![Notificator::new(
                7,
                "otherbot",
                "Ryhmä".to_string(),
                true,
            )]),
            ..FakeStore::default()
        });
        let reports = Reports::new(store.clone(), Settings::default());

        reports.set_updates(7, "Ryhmä".to_string(), false).await.unwrap();
        let subscribers = store.subscriber_list();
        assert_eq!(subscribers.len(), 2);
        assert!(subscribers.iter().any(|n| n.origin == "otherbot" && n.is_active));
    }
}
