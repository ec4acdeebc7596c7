use chrono::{Duration, NaiveDate};
use model::{case::CaseRecord, region::RegionTable};
use timewindow::{day_bounds, is_within, SortableDate};

#[derive(Debug, Clone, PartialEq)]
pub struct DoublingPoint {
    /// Days back from the reference day, 0 is the reference day itself.
    pub day_offset: i64,
    pub date: NaiveDate,
    pub growth_rate: f64,
    /// `None` when nothing was added that day.
    pub doubling_days: Option<f64>,
}

/// Share of the cumulative count that was added on the day itself.
pub fn growth_rate(at_date: usize, before_date: usize) -> f64 {
    if before_date == 0 {
        0.0
    } else {
        at_date as f64 / before_date as f64
    }
}

pub fn doubling_days(growth_rate: f64) -> Option<f64> {
    if growth_rate <= 0.0 || !growth_rate.is_finite() {
        return None;
    }
    Some(std::f64::consts::LN_2 / (1.0 + growth_rate).ln())
}

/// Doubling time for each of the `days_back` days ending at `today`.
pub fn doubling_time_series(
    cases: &[CaseRecord],
    today: NaiveDate,
    days_back: i64,
) -> Vec<DoublingPoint> {
    (0..days_back.max(0))
        .map(|day_offset| {
            let date = today - Duration::days(day_offset);
            let (lower, upper) = day_bounds(date);

            let mut before_date = 0;
            let mut at_date = 0;
            for case in cases {
                if case.occurred >= upper {
                    continue;
                }
                before_date += 1;
                if is_within(case.occurred, lower, upper) {
                    at_date += 1;
                }
            }

            let growth_rate = growth_rate(at_date, before_date);
            DoublingPoint {
                day_offset,
                date,
                growth_rate,
                doubling_days: doubling_days(growth_rate),
            }
        })
        .collect()
}

/// Narrows cases to one canonical region and to those that occurred on or after `since`.
pub fn prefilter(
    cases: &[CaseRecord],
    region: Option<&str>,
    since: Option<SortableDate>,
    regions: &RegionTable,
) -> Vec<CaseRecord> {
    cases
        .iter()
        .filter(|case| {
            region.map_or(true, |region| {
                regions.canonical(case.region.as_deref()) == region
            })
        })
        .filter(|case| since.map_or(true, |since| case.occurred >= since))
        .cloned()
        .collect()
}
