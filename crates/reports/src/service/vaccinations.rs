use chrono::{Duration, NaiveDateTime};
use model::{errors::ReportError, reply::Reply};

use crate::{
    format::{render_report, Column},
    vaccination::{project_checkpoints, CheckpointEta, Eta},
};

use super::Reports;

pub const NO_VACCINATION_DATA: &str = "Ei rokotustietoja";

struct CheckpointRow {
    coverage: String,
    eta: String,
}

impl CheckpointRow {
    fn new(checkpoint: &CheckpointEta, offset_hours: i64) -> Self {
        CheckpointRow {
            coverage: format!("{:.0} %", checkpoint.checkpoint * 100.0),
            eta: match checkpoint.eta {
                Eta::At(at) => (at + Duration::hours(offset_hours))
                    .format("%d.%m.%Y")
                    .to_string(),
                Eta::Never => "ei arviota".to_string(),
            },
        }
    }
}

fn columns() -> [Column<CheckpointRow>; 2] {
    [
        Column::new("Kattavuus", |row: &CheckpointRow| row.coverage.clone()),
        Column::new("Arvio", |row: &CheckpointRow| row.eta.clone()),
    ]
}

impl Reports {
    /// Coverage of the configured area and projected dates of the coverage checkpoints.
    pub async fn vaccinations(&self, now: NaiveDateTime) -> Result<Reply, ReportError> {
        let settings = &self.settings;
        let records = self
            .store
            .vaccinations(
                &settings.vaccination_area,
                settings.vaccination_lookback_days,
                now,
            )
            .await?;
        let current = match records.last() {
            Some(current) => current,
            None => return Ok(Reply::noop(NO_VACCINATION_DATA)),
        };
        let baseline = if records.len() > 1 {
            records.first()
        } else {
            None
        };

        let projection = project_checkpoints(
            current,
            baseline,
            settings.vaccination_start,
            settings.vaccination_target,
            &settings.vaccination_checkpoints,
            now,
            settings.vaccination_pinned_hour,
        );

        let ingress = format!(
            "Rokotuksia annettu {} ({:.1} % väestöstä).\nKeskimäärin {:.0} rokotusta vuorokaudessa.",
            projection.shots,
            projection.coverage * 100.0,
            projection.rate_per_hour * 24.0,
        );
        let rows: Vec<CheckpointRow> = projection
            .checkpoints
            .iter()
            .map(|checkpoint| CheckpointRow::new(checkpoint, settings.display_utc_offset_hours))
            .collect();
        let title = format!("Rokotukset: {}", settings.vaccination_area);
        let message = render_report(&title, Some(ingress.as_str()), &rows, &columns());
        Ok(Reply::text(message))
    }
}
