use chrono::{Duration, NaiveDateTime, NaiveTime};
use model::{case::CaseCategory, errors::ReportError, reply::Reply};
use timewindow::sortable_now;

use crate::{
    format::{render_report, Column},
    growth::{doubling_time_series, prefilter, DoublingPoint},
};

use super::Reports;

pub const NOTHING_TO_SHOW: &str = "Ei tapauksia valitulla alueella";
const SEPARATOR_EVERY: usize = 7;

struct DoublingRow {
    day: String,
    doubling: String,
}

impl From<&DoublingPoint> for DoublingRow {
    fn from(point: &DoublingPoint) -> Self {
        DoublingRow {
            day: point.date.format("%d.%m.").to_string(),
            doubling: match point.doubling_days {
                Some(days) => format!("{:.1} pv", days),
                None => "ei kasvua".to_string(),
            },
        }
    }
}

fn columns() -> [Column<DoublingRow>; 2] {
    [
        Column::new("Päivä", |row: &DoublingRow| row.day.clone()),
        Column::new("Kaksinkertaistuminen", |row: &DoublingRow| {
            row.doubling.clone()
        }),
    ]
}

fn rows_with_separators(series: &[DoublingPoint]) -> Vec<DoublingRow> {
    let mut rows = Vec::with_capacity(series.len() + series.len() / SEPARATOR_EVERY);
    for (idx, point) in series.iter().enumerate() {
        if idx > 0 && idx % SEPARATOR_EVERY == 0 {
            rows.push(DoublingRow {
                day: String::new(),
                doubling: String::new(),
            });
        }
        rows.push(point.into());
    }
    rows
}

impl Reports {
    /// Doubling time of confirmed cases over the trailing days, optionally for one region.
    pub async fn doubling_time(
        &self,
        region_arg: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Reply, ReportError> {
        let settings = &self.settings;
        let region = region_arg.map(|arg| {
            settings
                .regions
                .resolve(arg)
                .unwrap_or_else(|| settings.regions.canonical(Some(arg)))
        });

        let cases = self.fetch_category(CaseCategory::Confirmed).await?;
        let since = settings
            .doubling_lookback_days
            .map(|days| sortable_now(now, -days, Some(NaiveTime::MIN)));
        let cases = prefilter(&cases, region.as_deref(), since, &settings.regions);
        if cases.is_empty() {
            return Ok(Reply::noop(NOTHING_TO_SHOW));
        }

        let today = (now + Duration::hours(settings.display_utc_offset_hours)).date();
        let series = doubling_time_series(&cases, today, settings.doubling_days_back);
        let title = match &region {
            Some(region) => format!(
                "Kaksinkertaistumisaika: {}",
                settings.regions.display_name(region)
            ),
            None => "Kaksinkertaistumisaika".to_string(),
        };
        let message = render_report(&title, None, &rows_with_separators(&series), &columns());
        Ok(Reply::text(message))
    }
}
