use serde::{Deserialize, Serialize};
use timewindow::SortableDate;

/// Cumulative shot count of an area at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaccinationRecord {
    pub area: String,
    pub shots: u64,
    #[serde(rename = "dateSortString")]
    pub date: SortableDate,
}
