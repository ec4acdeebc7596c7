use std::sync::Arc;

use bson::{doc, Bson, Document};
use eyre::Error;
use futures_util::TryStreamExt as _;
use log::{debug, warn};
use model::case::{CaseCategory, CaseDetails, CaseRecord};
use mongodb::{Collection, IndexModel};
use serde::Deserialize;
use timewindow::SortableDate;

/// Shared stored shape of the case collections. Confirmed cases name their
/// occurrence date `acqDate`, the other categories `date`.
#[derive(Debug, Deserialize)]
struct CaseDoc {
    #[serde(default)]
    id: Bson,
    #[serde(rename = "healthCareDistrict", default)]
    region: Option<String>,
    #[serde(rename = "acqDate", alias = "date")]
    occurred: SortableDate,
    #[serde(rename = "insertDate")]
    inserted: SortableDate,
    #[serde(rename = "infectionSource", default)]
    infection_source: Option<Bson>,
    #[serde(rename = "infectionSourceCountry", default)]
    infection_source_country: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl CaseDoc {
    fn into_record(self, category: CaseCategory) -> CaseRecord {
        let details = match category {
            CaseCategory::Confirmed => CaseDetails::Confirmed {
                infection_source: self.infection_source.as_ref().and_then(bson_text),
                infection_source_country: self.infection_source_country,
            },
            CaseCategory::Dead => CaseDetails::Dead,
            CaseCategory::Recovered => CaseDetails::Recovered,
        };
        CaseRecord {
            id: bson_text(&self.id).unwrap_or_default(),
            region: self.region,
            occurred: self.occurred,
            inserted: self.inserted,
            source: self.source,
            details,
        }
    }
}

fn bson_text(value: &Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn collection_name(category: CaseCategory) -> &'static str {
    match category {
        CaseCategory::Confirmed => "confirmed",
        CaseCategory::Dead => "deaths",
        CaseCategory::Recovered => "recovered",
    }
}

#[derive(Clone)]
pub struct CaseStore {
    confirmed: Arc<Collection<Document>>,
    dead: Arc<Collection<Document>>,
    recovered: Arc<Collection<Document>>,
}

impl CaseStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let confirmed = Self::open(db, CaseCategory::Confirmed).await?;
        let dead = Self::open(db, CaseCategory::Dead).await?;
        let recovered = Self::open(db, CaseCategory::Recovered).await?;
        Ok(CaseStore {
            confirmed: Arc::new(confirmed),
            dead: Arc::new(dead),
            recovered: Arc::new(recovered),
        })
    }

    async fn open(
        db: &mongodb::Database,
        category: CaseCategory,
    ) -> Result<Collection<Document>, Error> {
        let collection: Collection<Document> = db.collection(collection_name(category));
        collection
            .create_index(IndexModel::builder().keys(doc! { "insertDate": -1 }).build())
            .await?;
        Ok(collection)
    }

    fn collection(&self, category: CaseCategory) -> &Collection<Document> {
        match category {
            CaseCategory::Confirmed => &self.confirmed,
            CaseCategory::Dead => &self.dead,
            CaseCategory::Recovered => &self.recovered,
        }
    }

    /// Every record of a category that is not flagged removed.
    pub async fn find(
        &self,
        category: CaseCategory,
        source: Option<&str>,
    ) -> Result<Vec<CaseRecord>, Error> {
        let mut filter = doc! { "isremoved": { "$ne": true } };
        if let Some(source) = source {
            filter.insert("source", source);
        }

        let docs: Vec<Document> = self
            .collection(category)
            .find(filter)
            .await?
            .try_collect()
            .await?;

        let total = docs.len();
        let records: Vec<CaseRecord> = docs
            .into_iter()
            .filter_map(|doc| match bson::from_document::<CaseDoc>(doc) {
                Ok(case) => Some(case.into_record(category)),
                Err(err) => {
                    warn!("Skipping malformed {} case: {}", category, err);
                    None
                }
            })
            .collect();
        debug!("loaded {}/{} {} cases", records.len(), total, category);
        Ok(records)
    }
}
