use chrono::NaiveDate;
use model::{region::RegionTable, source::DataSource};
use timewindow::SortableDate;
use url::Url;

pub const BOT_ORIGIN: &str = "hoitsubotti";

/// Tunables of the report engine. Everything time related is expressed in
/// offsets from the `now` each report receives.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Subscription origin of this bot.
    pub origin: String,
    pub data_source: DataSource,
    /// Restrict case queries to records of `data_source`.
    pub filter_by_source: bool,
    pub enable_recovered: bool,
    pub regions: RegionTable,
    /// Cases newer than this many days count as new in the snapshot.
    pub new_case_window_days: i64,
    /// Window of the per-hour average.
    pub hourly_average_days: i64,
    /// Loader operations are stored in UTC, reports show Finnish time. The
    /// doubling report also starts its days at Finnish midnight. Vaccination
    /// pacing keeps UTC days, anchored at `vaccination_pinned_hour`.
    pub display_utc_offset_hours: i64,
    pub alert_grace_minutes: i64,
    pub doubling_days_back: i64,
    pub doubling_lookback_days: Option<i64>,
    pub chart_name: String,
    pub chart_base_url: Option<Url>,
    pub vaccination_area: String,
    pub vaccination_target: u64,
    pub vaccination_lookback_days: i64,
    pub vaccination_start: SortableDate,
    pub vaccination_checkpoints: Vec<f64>,
    pub vaccination_pinned_hour: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let vaccination_start = NaiveDate::from_ymd_opt(2020, 12, 27)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        Settings {
            origin: BOT_ORIGIN.to_string(),
            data_source: DataSource::Hs,
            filter_by_source: false,
            enable_recovered: false,
            regions: RegionTable::default(),
            new_case_window_days: 1,
            hourly_average_days: 7,
            display_utc_offset_hours: 2,
            alert_grace_minutes: 5,
            doubling_days_back: 14,
            doubling_lookback_days: Some(90),
            chart_name: "dailyNew".to_string(),
            chart_base_url: None,
            vaccination_area: "Finland".to_string(),
            vaccination_target: 5_536_146,
            vaccination_lookback_days: 7,
            vaccination_start: SortableDate::new(vaccination_start),
            vaccination_checkpoints: vec![0.5, 0.7, 0.9],
            vaccination_pinned_hour: 9,
        }
    }
}

impl Settings {
    pub fn source_filter(&self) -> Option<&'static str> {
        if self.filter_by_source {
            Some(self.data_source.key())
        } else {
            None
        }
    }
}
