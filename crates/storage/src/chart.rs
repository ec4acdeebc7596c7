use std::sync::Arc;

use bson::doc;
use eyre::Error;
use model::chart::ChartLink;
use mongodb::{options::IndexOptions, Collection, IndexModel};

const COLLECTION: &str = "charts";

#[derive(Clone)]
pub struct ChartStore {
    charts: Arc<Collection<ChartLink>>,
}

impl ChartStore {
    pub async fn new(db: &mongodb::Database) -> Result<Self, Error> {
        let charts = db.collection(COLLECTION);
        charts
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "chartName": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        Ok(ChartStore {
            charts: Arc::new(charts),
        })
    }

    pub async fn get(&self, chart_name: &str) -> Result<Option<ChartLink>, Error> {
        Ok(self
            .charts
            .find_one(doc! { "chartName": chart_name })
            .await?)
    }

    pub async fn mark_used(&self, chart_name: &str) -> Result<(), Error> {
        self.charts
            .update_one(
                doc! { "chartName": chart_name },
                doc! { "$inc": { "used": 1 } },
            )
            .await?;
        Ok(())
    }
}
