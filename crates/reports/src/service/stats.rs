use chrono::{Duration, NaiveDateTime};
use model::{
    case::{CaseCategory, DateField},
    errors::ReportError,
    operation::LOADER_OPERATION,
    reply::Reply,
};
use timewindow::sortable_now;

use crate::{
    aggregation::{aggregate_by_region, count_after, percent, RegionSummary},
    format::{render_report, render_section, render_table, Column},
};

use super::{category_title, Reports};

const TITLE: &str = "Tilastot";

fn columns() -> [Column<RegionSummary>; 3] {
    [
        Column::new("Alue", |row: &RegionSummary| row.region.clone()),
        Column::new("Tapauksia", |row: &RegionSummary| row.total.to_string()),
        Column::new("24h", |row: &RegionSummary| row.new_in_window.to_string()),
    ]
}

impl Reports {
    /// Statistics snapshot: headline numbers and one table per case category.
    pub async fn snapshot(&self, now: NaiveDateTime) -> Result<Reply, ReportError> {
        let (loader, cases) = tokio::try_join!(
            self.store.latest_operation(LOADER_OPERATION),
            self.fetch_cases()
        )?;
        let settings = &self.settings;

        let window = sortable_now(now, -settings.new_case_window_days, None);
        let confirmed_new = count_after(&cases.confirmed, window, DateField::Occurred);
        let hourly_window = sortable_now(now, -settings.hourly_average_days, None);
        let hourly_average = count_after(&cases.confirmed, hourly_window, DateField::Occurred)
            as f64
            / (settings.hourly_average_days.max(1) * 24) as f64;
        let dead_new = count_after(&cases.dead, window, DateField::Occurred);
        let last_update =
            loader.last_run + Duration::hours(settings.display_utc_offset_hours);

        let mut ingress = format!(
            "Tartuntoja {}, joista uusia {}.\nKasvua {}% vuorokaudessa.\nKeskimäärin {:.1} tartuntaa tunnissa viimeisen {} vuorokauden aikana.\nKuolleita {}, joista uusia {}.",
            cases.confirmed.len(),
            confirmed_new,
            percent(confirmed_new, cases.confirmed.len()),
            hourly_average,
            settings.hourly_average_days,
            cases.dead.len(),
            dead_new,
        );
        if let Some(recovered) = &cases.recovered {
            ingress.push_str(&format!("\nParantuneita {}.", recovered.len()));
        }
        ingress.push_str(&format!(
            "\nPäivitetty {}\nLähde: <strong>{}</strong>",
            last_update.format("%d.%m.%Y %H:%M"),
            settings.data_source.label()
        ));

        let columns = columns();
        let mut message = render_report(TITLE, Some(ingress.as_str()), &[], &columns);
        for (category, records) in cases.categories() {
            let rows = aggregate_by_region(
                records,
                window,
                DateField::Occurred,
                false,
                &settings.regions,
            );
            let section = if category == CaseCategory::Confirmed {
                Some(render_table(&rows, &columns))
            } else {
                render_section(category_title(category), &rows, &columns)
            };
            if let Some(section) = section {
                message.push_str(&section);
            }
        }
        Ok(Reply::text(message))
    }
}
