use std::sync::Arc;

use bson::doc;
use chrono::{NaiveDateTime, NaiveTime};
use eyre::Error;
use futures_util::TryStreamExt as _;
use model::vaccination::VaccinationRecord;
use mongodb::{Collection, IndexModel};

const COLLECTION: &str = "vaccinations";

#[derive(Clone)]
pub struct VaccinationStore {
    vaccinations: Arc<Collection<VaccinationRecord>>,
}

impl VaccinationStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let vaccinations = db.collection(COLLECTION);
        vaccinations
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "area": 1, "dateSortString": 1 })
                    .build(),
            )
            .await?;
        Ok(VaccinationStore {
            vaccinations: Arc::new(vaccinations),
        })
    }

    /// Records of `area` dated from the start of the day `lookback_days` ago, oldest first.
    pub async fn since(
        &self,
        area: &str,
        lookback_days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<VaccinationRecord>, Error> {
        let since = timewindow::sortable_now(now, -lookback_days, Some(NaiveTime::MIN));
        let records = self
            .vaccinations
            .find(doc! {
                "area": area,
                "dateSortString": { "$gte": since.to_string() },
            })
            .sort(doc! { "dateSortString": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }
}
