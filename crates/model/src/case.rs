use strum::{Display, EnumString};
use timewindow::SortableDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CaseCategory {
    Confirmed,
    Dead,
    Recovered,
}

/// Which of a record's two timestamps a window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Occurred,
    Inserted,
}

/// Category specific part of a case record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseDetails {
    Confirmed {
        infection_source: Option<String>,
        infection_source_country: Option<String>,
    },
    Dead,
    Recovered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: String,
    /// Health-care district as stored. May be missing.
    pub region: Option<String>,
    pub occurred: SortableDate,
    /// When the loader wrote the record.
    pub inserted: SortableDate,
    /// Loader the record came from, see `DataSource::key`.
    pub source: Option<String>,
    pub details: CaseDetails,
}

impl CaseRecord {
    pub fn category(&self) -> CaseCategory {
        match self.details {
            CaseDetails::Confirmed { .. } => CaseCategory::Confirmed,
            CaseDetails::Dead => CaseCategory::Dead,
            CaseDetails::Recovered => CaseCategory::Recovered,
        }
    }

    pub fn date(&self, field: DateField) -> SortableDate {
        match field {
            DateField::Occurred => self.occurred,
            DateField::Inserted => self.inserted,
        }
    }
}

/// All case categories fetched for one report.
#[derive(Debug, Clone, Default)]
pub struct CaseSet {
    pub confirmed: Vec<CaseRecord>,
    pub dead: Vec<CaseRecord>,
    /// `None` when recovered data is disabled for the deployment.
    pub recovered: Option<Vec<CaseRecord>>,
}

impl CaseSet {
    pub fn categories(&self) -> Vec<(CaseCategory, &[CaseRecord])> {
        let mut categories = vec![
            (CaseCategory::Confirmed, self.confirmed.as_slice()),
            (CaseCategory::Dead, self.dead.as_slice()),
        ];
        if let Some(recovered) = &self.recovered {
            categories.push((CaseCategory::Recovered, recovered.as_slice()));
        }
        categories
    }

    pub fn any_inserted_after(&self, threshold: SortableDate) -> bool {
        self.categories()
            .iter()
            .flat_map(|(_, records)| records.iter())
            .any(|record| record.inserted > threshold)
    }
}
