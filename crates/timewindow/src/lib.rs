pub use chrono;
pub mod sortable;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
pub use sortable::SortableDate;

/// "Now" on the clock of the stored data: naive UTC, the time the loader jobs
/// stamp records and operations with. Callers take it once per report and pass
/// it down, so every threshold of a single report agrees on the same instant.
pub fn store_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Canonical date for `now` shifted by `offset_days`, optionally pinned to a time of day.
pub fn sortable_now(now: NaiveDateTime, offset_days: i64, time: Option<NaiveTime>) -> SortableDate {
    let shifted = now + Duration::days(offset_days);
    match time {
        Some(time) => SortableDate::new(shifted.date().and_time(time)),
        None => SortableDate::new(shifted),
    }
}

/// Strict on both ends.
pub fn is_within(date: SortableDate, lower: SortableDate, upper: SortableDate) -> bool {
    lower < date && date < upper
}

/// Exclusive bounds of `day` for `is_within`: the last second of the day
/// before and midnight of the day after.
pub fn day_bounds(day: NaiveDate) -> (SortableDate, SortableDate) {
    let midnight = day.and_time(NaiveTime::MIN);
    (
        SortableDate::new(midnight - Duration::seconds(1)),
        SortableDate::new(midnight + Duration::days(1)),
    )
}

/// Hours between two days with both endpoints pinned to the same `pinned_hour`,
/// so the result is always a whole multiple of 24.
pub fn hours_between(from: NaiveDate, to: NaiveDate, pinned_hour: u32) -> f64 {
    let pinned = NaiveTime::from_hms_opt(pinned_hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let span = to.and_time(pinned) - from.and_time(pinned);
    span.num_minutes() as f64 / 60.0
}

#[cfg(test)]
mod test {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    pub fn test_sortable_now() {
        let now = at(2021, 3, 1, 15, 30, 10);
        assert_eq!(
            sortable_now(now, -7, None).to_string(),
            "2021-02-22 15:30:10"
        );
        assert_eq!(
            sortable_now(now, 0, NaiveTime::from_hms_opt(0, 0, 0)).to_string(),
            "2021-03-01 00:00:00"
        );
        assert_eq!(
            sortable_now(now, -1, NaiveTime::from_hms_opt(23, 59, 59)).to_string(),
            "2021-02-28 23:59:59"
        );
    }

    #[test]
    pub fn test_is_within() {
        let lower = SortableDate::new(at(2021, 1, 5, 0, 0, 0));
        let upper = SortableDate::new(at(2021, 1, 6, 0, 0, 0));
        assert!(is_within(SortableDate::new(at(2021, 1, 5, 12, 0, 0)), lower, upper));
        assert!(!is_within(lower, lower, upper));
        assert!(!is_within(upper, lower, upper));
        assert!(!is_within(SortableDate::new(at(2021, 1, 4, 23, 59, 59)), lower, upper));
    }

    #[test]
    pub fn test_day_bounds() {
        let (lower, upper) = day_bounds(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
        assert_eq!(lower.to_string(), "2020-12-30 23:59:59");
        assert_eq!(upper.to_string(), "2021-01-01 00:00:00");
        assert!(is_within(SortableDate::new(at(2020, 12, 31, 0, 0, 0)), lower, upper));
        assert!(is_within(SortableDate::new(at(2020, 12, 31, 23, 59, 59)), lower, upper));
        assert!(!is_within(upper, lower, upper));
    }

    #[test]
    pub fn test_hours_between() {
        let from = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 1, 11).unwrap();
        assert_eq!(hours_between(from, to, 9), 240.0);
        assert_eq!(hours_between(to, to, 9), 0.0);
    }
}
