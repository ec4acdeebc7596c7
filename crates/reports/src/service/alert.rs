use chrono::{Duration, NaiveDateTime};
use log::info;
use model::{
    case::DateField,
    errors::ReportError,
    operation::{OperationRecord, ALERT_OPERATION, LOADER_OPERATION},
    reply::{Reply, NO_NEW_CASES},
};
use timewindow::SortableDate;

use crate::{
    aggregation::{aggregate_by_region, count_after, RegionSummary},
    format::{render_report, render_section, Column},
};

use super::{category_title, Reports};

const TITLE: &str = "Uusia tapauksia";

fn columns() -> [Column<RegionSummary>; 3] {
    [
        Column::new("Alue", |row: &RegionSummary| row.region.clone()),
        Column::new("Yhteensä", |row: &RegionSummary| row.total.to_string()),
        Column::new("Uudet", |row: &RegionSummary| row.new_in_window.to_string()),
    ]
}

impl Reports {
    /// New case alert for every active subscriber.
    ///
    /// Delivery is at most once: the alert operation is stamped before the
    /// broadcast reply is handed out.
    pub async fn new_cases_alert(&self, now: NaiveDateTime) -> Result<Reply, ReportError> {
        let settings = &self.settings;
        let subscribers = self.store.subscribers(&settings.origin).await?;
        if subscribers.is_empty() {
            return Err(ReportError::NoSubscribers(settings.origin.clone()));
        }

        let (alert, loader, cases) = tokio::try_join!(
            self.last_alert(),
            self.store.latest_operation(LOADER_OPERATION),
            self.fetch_cases()
        )?;

        if let Some(alert) = &alert {
            if alert.last_run >= loader.last_run {
                info!("Loader has not run since the last alert at {}", alert.last_run);
                return Ok(Reply::noop(NO_NEW_CASES));
            }
        }

        let threshold = SortableDate::new(
            loader.last_run - Duration::minutes(settings.alert_grace_minutes)
                + Duration::hours(settings.data_source.insert_offset_hours()),
        );
        if !cases.any_inserted_after(threshold) {
            info!("No cases inserted after {}", threshold);
            return Ok(Reply::noop(NO_NEW_CASES));
        }

        let mut ingress = format!(
            "Uusia tartuntoja {}.\nUusia kuolleita {}.",
            count_after(&cases.confirmed, threshold, DateField::Inserted),
            count_after(&cases.dead, threshold, DateField::Inserted),
        );
        if let Some(recovered) = &cases.recovered {
            ingress.push_str(&format!(
                "\nUusia parantuneita {}.",
                count_after(recovered, threshold, DateField::Inserted)
            ));
        }

        let columns = columns();
        let mut message = render_report(TITLE, Some(ingress.as_str()), &[], &columns);
        for (category, records) in cases.categories() {
            let rows = aggregate_by_region(
                records,
                threshold,
                DateField::Inserted,
                true,
                &settings.regions,
            );
            if let Some(section) = render_section(category_title(category), &rows, &columns) {
                message.push_str(&section);
            }
        }

        let alert_name = alert
            .map(|alert| alert.name)
            .unwrap_or_else(|| ALERT_OPERATION.to_string());
        self.store.record_operation_run(&alert_name, now).await?;

        let chat_ids = subscribers.iter().map(|n| n.chat_id).collect();
        Ok(Reply::broadcast(message, chat_ids))
    }

    /// The alert job has no operation record until it has run once.
    async fn last_alert(&self) -> Result<Option<OperationRecord>, ReportError> {
        match self.store.latest_operation(ALERT_OPERATION).await {
            Ok(alert) => Ok(Some(alert)),
            Err(ReportError::OperationNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
