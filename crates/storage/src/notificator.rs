use std::sync::Arc;

use bson::doc;
use eyre::Error;
use futures_util::TryStreamExt as _;
use log::info;
use model::notificator::Notificator;
use mongodb::{options::IndexOptions, Collection, IndexModel};

const COLLECTION: &str = "notificators";

#[derive(Clone)]
pub struct NotificatorStore {
    store: Arc<Collection<Notificator>>,
}

impl NotificatorStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let store = db.collection(COLLECTION);
        store
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "chatid": 1, "origin": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        store
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "origin": 1, "isactive": 1 })
                    .build(),
            )
            .await?;
        Ok(NotificatorStore {
            store: Arc::new(store),
        })
    }

    /// Active subscriptions of an origin.
    pub async fn active(&self, origin: &str) -> Result<Vec<Notificator>, Error> {
        let notificators = self
            .store
            .find(doc! { "origin": origin, "isactive": true })
            .await?
            .try_collect()
            .await?;
        Ok(notificators)
    }

    pub async fn get(&self, chat_id: i64, origin: &str) -> Result<Option<Notificator>, Error> {
        Ok(self
            .store
            .find_one(doc! { "chatid": chat_id, "origin": origin })
            .await?)
    }

    pub async fn upsert(&self, notificator: &Notificator) -> Result<(), Error> {
        info!(
            "updating notificator {} by {}: active={}",
            notificator.chat_id, notificator.origin, notificator.is_active
        );
        self.store
            .update_one(
                doc! { "chatid": notificator.chat_id, "origin": notificator.origin.as_str() },
                doc! { "$set": {
                    "isactive": notificator.is_active,
                    "chattitle": notificator.chat_title.as_str(),
                }},
            )
            .upsert(true)
            .await?;
        Ok(())
    }
}
