use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eyre::{eyre, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-width form used by the store. Range filters on stored dates compare
/// these strings lexicographically, so the width must never vary.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED: [&str; 4] = [
    FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortableDate(NaiveDateTime);

impl SortableDate {
    pub fn new(date_time: NaiveDateTime) -> Self {
        SortableDate(date_time)
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        let value = value.trim();
        for format in ACCEPTED {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(SortableDate(date_time));
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|date| SortableDate(date.and_time(NaiveTime::MIN)))
            .map_err(|_| eyre!("Invalid date: {}", value))
    }
}

impl From<NaiveDateTime> for SortableDate {
    fn from(value: NaiveDateTime) -> Self {
        SortableDate(value)
    }
}

impl fmt::Display for SortableDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for SortableDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortableDate::parse(s)
    }
}

impl Serialize for SortableDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SortableDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SortableDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> SortableDate {
        SortableDate::new(
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap(),
        )
    }

    #[test]
    fn test_canonical_width() {
        let date = ymd_hms(2021, 1, 5, 7, 3, 9);
        assert_eq!(date.to_string(), "2021-01-05 07:03:09");
        assert_eq!(date.to_string().len(), 19);
    }

    #[test]
    fn test_parse_variants() {
        let expected = ymd_hms(2020, 3, 14, 10, 0, 0);
        assert_eq!(SortableDate::parse("2020-03-14 10:00:00").unwrap(), expected);
        assert_eq!(SortableDate::parse("2020-03-14T10:00:00.000Z").unwrap(), expected);
        assert_eq!(SortableDate::parse("2020-03-14T10:00:00").unwrap(), expected);
        assert_eq!(
            SortableDate::parse("2020-03-14").unwrap(),
            ymd_hms(2020, 3, 14, 0, 0, 0)
        );
        assert!(SortableDate::parse("14.03.2020").is_err());
    }

    #[test]
    fn test_ordering_matches_string_ordering() {
        let a = SortableDate::parse("2020-12-31 23:59:59").unwrap();
        let b = SortableDate::parse("2021-01-01 00:00:00").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
