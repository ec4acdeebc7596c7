use std::collections::HashMap;

use model::{
    case::{CaseRecord, DateField},
    region::RegionTable,
};
use timewindow::SortableDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub region: String,
    pub total: usize,
    pub new_in_window: usize,
}

/// Groups records by display region and counts the ones whose `field` is
/// strictly after `window_lower_bound`.
///
/// Output is sorted by `total` descending. Equal totals keep the order in which
/// their regions first appear in `records`.
pub fn aggregate_by_region(
    records: &[CaseRecord],
    window_lower_bound: SortableDate,
    field: DateField,
    hide_zero_window_regions: bool,
    regions: &RegionTable,
) -> Vec<RegionSummary> {
    let mut groups: Vec<RegionSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let region = regions.normalize(record.region.as_deref());
        let idx = *index.entry(region).or_insert_with_key(|region| {
            groups.push(RegionSummary {
                region: region.clone(),
                total: 0,
                new_in_window: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[idx];
        group.total += 1;
        if record.date(field) > window_lower_bound {
            group.new_in_window += 1;
        }
    }

    if hide_zero_window_regions {
        groups.retain(|group| group.new_in_window > 0);
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

pub fn count_after(records: &[CaseRecord], threshold: SortableDate, field: DateField) -> usize {
    records
        .iter()
        .filter(|record| record.date(field) > threshold)
        .count()
}

/// Whole percent of `part` in `total`, a zero total counts as one.
pub fn percent(part: usize, total: usize) -> String {
    format!("{:.0}", part as f64 / total.max(1) as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::case::CaseDetails;

    fn case(region: Option<&str>, occurred: &str, inserted: &str) -> CaseRecord {
        CaseRecord {
            id: occurred.to_string(),
            region: region.map(str::to_string),
            occurred: SortableDate::parse(occurred).unwrap(),
            inserted: SortableDate::parse(inserted).unwrap(),
            source: None,
            details: CaseDetails::Dead,
        }
    }

    fn bound(raw: &str) -> SortableDate {
        SortableDate::parse(raw).unwrap()
    }

    #[test]
    fn test_single_region_window() {
        let cases = vec![
            case(Some("HUS"), "2021-01-10 10:00:00", "2021-01-10 12:00:00"),
            case(Some("HUS"), "2021-01-01 10:00:00", "2021-01-01 12:00:00"),
        ];
        let summary = aggregate_by_region(
            &cases,
            bound("2021-01-05 00:00:00"),
            DateField::Occurred,
            false,
            &RegionTable::default(),
        );
        assert_eq!(
            summary,
            vec![RegionSummary {
                region: "HUS".to_string(),
                total: 2,
                new_in_window: 1,
            }]
        );
    }

    #[test]
    fn test_totals_and_sorting() {
        let cases = vec![
            case(Some("Lappi"), "2021-01-01 10:00:00", "2021-01-01 10:00:00"),
            case(None, "2021-01-02 10:00:00", "2021-01-02 10:00:00"),
            case(Some("HUS"), "2021-01-03 10:00:00", "2021-01-03 10:00:00"),
            case(Some("hus"), "2021-01-04 10:00:00", "2021-01-04 10:00:00"),
            case(Some(""), "2021-01-05 10:00:00", "2021-01-05 10:00:00"),
            case(Some("HUS"), "2021-01-06 10:00:00", "2021-01-06 10:00:00"),
            case(Some("Pohjois-Pohjanmaa"), "2021-01-06 10:00:00", "2021-01-06 10:00:00"),
        ];
        let summary = aggregate_by_region(
            &cases,
            bound("2021-01-03 12:00:00"),
            DateField::Occurred,
            false,
            &RegionTable::default(),
        );

        let names: Vec<&str> = summary.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(names, vec!["HUS", "Unknown", "Lappi", "P-Pohjanmaa"]);
        assert_eq!(summary.iter().map(|s| s.total).sum::<usize>(), cases.len());
        assert!(summary.windows(2).all(|w| w[0].total >= w[1].total));
        assert_eq!(summary[0].new_in_window, 2);
        assert_eq!(summary[1].new_in_window, 1);
        assert_eq!(summary[2].new_in_window, 0);
    }

    #[test]
    fn test_hide_zero_window_regions() {
        let cases = vec![
            case(Some("Lappi"), "2021-01-01 10:00:00", "2021-01-01 10:00:00"),
            case(Some("Lappi"), "2021-01-01 11:00:00", "2021-01-01 11:00:00"),
            case(Some("Kainuu"), "2021-01-01 10:00:00", "2021-01-07 10:00:00"),
        ];
        let summary = aggregate_by_region(
            &cases,
            bound("2021-01-05 00:00:00"),
            DateField::Inserted,
            true,
            &RegionTable::default(),
        );
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].region, "Kainuu");
        assert_eq!(summary[0].new_in_window, 1);
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate_by_region(
            &[],
            bound("2021-01-05 00:00:00"),
            DateField::Occurred,
            false,
            &RegionTable::default(),
        );
        assert!(summary.is_empty());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), "33");
        assert_eq!(percent(0, 0), "0");
        assert_eq!(percent(2, 3), "67");
    }
}
