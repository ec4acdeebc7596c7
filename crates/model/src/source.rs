use std::str::FromStr;

use eyre::{eyre, Error};

/// Where the case data was loaded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Hs,
    Thl,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Hs => "HS avoin data",
            DataSource::Thl => "THL avoin data",
        }
    }

    /// Stored `source` value of the case records.
    pub fn key(&self) -> &'static str {
        match self {
            DataSource::Hs => "DB",
            DataSource::Thl => "S3",
        }
    }

    /// Shift from the operation clock (UTC) to the clock of stored `insertDate`
    /// values. The THL loader stamps records in Finnish time.
    pub fn insert_offset_hours(&self) -> i64 {
        match self {
            DataSource::Hs => 0,
            DataSource::Thl => 2,
        }
    }
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HS" | "DB" => Ok(DataSource::Hs),
            "THL" | "S3" => Ok(DataSource::Thl),
            other => Err(eyre!("Unknown data source: {}", other)),
        }
    }
}
