use std::sync::Arc;

use async_trait::async_trait;
use bot::gateway::{deliver, Gateway};
use eyre::Error;
use log::info;
use model::errors::ReportError;
use reports::Reports;

use crate::Task;

/// Broadcasts cases the loader has inserted since the previous alert.
pub struct NewCasesAlert {
    reports: Reports,
    gateway: Arc<dyn Gateway>,
    cron: String,
}

impl NewCasesAlert {
    pub fn new(reports: Reports, gateway: Arc<dyn Gateway>, cron: String) -> Self {
        NewCasesAlert {
            reports,
            gateway,
            cron,
        }
    }
}

#[async_trait]
impl Task for NewCasesAlert {
    const NAME: &'static str = "new_cases_alert";

    fn cron(&self) -> String {
        self.cron.clone()
    }

    async fn process(&mut self) -> Result<(), Error> {
        match self.reports.new_cases_alert(timewindow::store_now()).await {
            Ok(reply) => {
                deliver(self.gateway.as_ref(), None, &reply).await?;
            }
            Err(ReportError::NoSubscribers(origin)) => {
                info!("No subscribers for {}", origin);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}
