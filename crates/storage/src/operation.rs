use std::sync::Arc;

use bson::doc;
use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Timelike as _};
use eyre::Error;
use futures_util::TryStreamExt as _;
use log::warn;
use model::operation::OperationRecord;
use mongodb::{Collection, IndexModel};
use serde::Deserialize;

const COLLECTION: &str = "operations";

/// Stored shape written by the loader jobs. `mon` is zero based.
#[derive(Debug, Deserialize)]
struct OperationDoc {
    name: String,
    #[serde(default)]
    maintype: String,
    yr: i32,
    mon: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl OperationDoc {
    fn into_record(self) -> Option<OperationRecord> {
        let last_run = NaiveDate::from_ymd_opt(self.yr, self.mon + 1, self.day)?
            .and_hms_opt(self.hour, self.minute, 0)?;
        Some(OperationRecord {
            name: self.name,
            main_type: self.maintype,
            last_run,
        })
    }
}

#[derive(Clone)]
pub struct OperationStore {
    operations: Arc<Collection<OperationDoc>>,
}

impl OperationStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let operations = db.collection(COLLECTION);
        operations
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "maintype": 1, "active": 1 })
                    .build(),
            )
            .await?;
        Ok(OperationStore {
            operations: Arc::new(operations),
        })
    }

    /// Active operations of a main type, latest run first.
    pub async fn active(&self, main_type: &str) -> Result<Vec<OperationRecord>, Error> {
        let docs: Vec<OperationDoc> = self
            .operations
            .find(doc! { "maintype": main_type, "active": true })
            .await?
            .try_collect()
            .await?;

        let mut records: Vec<OperationRecord> = docs
            .into_iter()
            .filter_map(|op| {
                let name = op.name.clone();
                let record = op.into_record();
                if record.is_none() {
                    warn!("Operation {} has an invalid timestamp", name);
                }
                record
            })
            .collect();
        records.sort_by(|a, b| b.last_run.cmp(&a.last_run));
        Ok(records)
    }

    pub async fn latest(&self, main_type: &str) -> Result<Option<OperationRecord>, Error> {
        Ok(OperationRecord::latest(self.active(main_type).await?))
    }

    /// Stamps `name` with `now`. A missing record is created active, typed by its name.
    pub async fn record_run(&self, name: &str, now: NaiveDateTime) -> Result<(), Error> {
        self.operations
            .update_one(
                doc! { "name": name },
                doc! { "$set": {
                    "yr": now.year(),
                    "mon": now.month0() as i32,
                    "day": now.day() as i32,
                    "hour": now.hour() as i32,
                    "minute": now.minute() as i32,
                },
                "$setOnInsert": { "maintype": name, "active": true }},
            )
            .upsert(true)
            .await?;
        Ok(())
    }
}
