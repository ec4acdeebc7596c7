use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::{
    case::{CaseCategory, CaseDetails, CaseRecord},
    chart::ChartLink,
    errors::ReportError,
    notificator::Notificator,
    operation::OperationRecord,
    vaccination::VaccinationRecord,
};
use timewindow::SortableDate;

use crate::store::StatsStore;

pub fn at(raw: &str) -> NaiveDateTime {
    SortableDate::parse(raw).unwrap().date_time()
}

pub fn case(category: CaseCategory, region: &str, occurred: &str, inserted: &str) -> CaseRecord {
    let details = match category {
        CaseCategory::Confirmed => CaseDetails::Confirmed {
            infection_source: None,
            infection_source_country: None,
        },
        CaseCategory::Dead => CaseDetails::Dead,
        CaseCategory::Recovered => CaseDetails::Recovered,
    };
    CaseRecord {
        id: format!("{}-{}-{}", category, region, occurred),
        region: Some(region.to_string()),
        occurred: SortableDate::parse(occurred).unwrap(),
        inserted: SortableDate::parse(inserted).unwrap(),
        source: None,
        details,
    }
}

pub fn operation(name: &str, main_type: &str, last_run: &str) -> OperationRecord {
    OperationRecord {
        name: name.to_string(),
        main_type: main_type.to_string(),
        last_run: at(last_run),
    }
}

/// In-memory store that counts every read and records every write.
#[derive(Default)]
pub struct FakeStore {
    pub operations: Vec<OperationRecord>,
    pub cases: Vec<CaseRecord>,
    pub vaccinations: Vec<VaccinationRecord>,
    pub charts: Vec<ChartLink>,
    pub subscribers: Mutex<Vec<Notificator>>,
    pub(crate) reads: AtomicUsize,
    pub(crate) writes: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn subscriber_list(&self) -> Vec<Notificator> {
        self.subscribers.lock().unwrap().clone()
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self, entry: String) {
        self.writes.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl StatsStore for FakeStore {
    async fn latest_operation(&self, main_type: &str) -> Result<OperationRecord, ReportError> {
        self.read();
        let ops = self
            .operations
            .iter()
            .filter(|op| op.main_type == main_type)
            .cloned()
            .collect();
        OperationRecord::latest(ops)
            .ok_or_else(|| ReportError::OperationNotFound(main_type.to_string()))
    }

    async fn cases(
        &self,
        category: CaseCategory,
        source: Option<&str>,
    ) -> Result<Vec<CaseRecord>, ReportError> {
        self.read();
        Ok(self
            .cases
            .iter()
            .filter(|case| case.category() == category)
            .filter(|case| {
                source.map_or(true, |source| case.source.as_deref() == Some(source))
            })
            .cloned()
            .collect())
    }

    async fn vaccinations(
        &self,
        area: &str,
        lookback_days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<VaccinationRecord>, ReportError> {
        self.read();
        let since = timewindow::sortable_now(now, -lookback_days, Some(chrono::NaiveTime::MIN));
        Ok(self
            .vaccinations
            .iter()
            .filter(|record| record.area == area && record.date >= since)
            .cloned()
            .collect())
    }

    async fn chart_link(&self, name: &str) -> Result<ChartLink, ReportError> {
        self.read();
        self.charts
            .iter()
            .find(|link| link.chart_name == name)
            .cloned()
            .ok_or_else(|| ReportError::ChartNotFound(name.to_string()))
    }

    async fn mark_chart_used(&self, link: &ChartLink) -> Result<(), ReportError> {
        self.write(format!("chart:{}", link.chart_name));
        Ok(())
    }

    async fn subscribers(&self, origin: &str) -> Result<Vec<Notificator>, ReportError> {
        self.read();
        Ok(self
            .subscriber_list()
            .into_iter()
            .filter(|n| n.origin == origin && n.is_active)
            .collect())
    }

    async fn subscriber(
        &self,
        chat_id: i64,
        origin: &str,
    ) -> Result<Option<Notificator>, ReportError> {
        self.read();
        Ok(self
            .subscriber_list()
            .into_iter()
            .find(|n| n.chat_id == chat_id && n.origin == origin))
    }

    async fn upsert_subscriber(&self, record: &Notificator) -> Result<(), ReportError> {
        self.write(format!("subscriber:{}", record.chat_id));
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|n| !(n.chat_id == record.chat_id && n.origin == record.origin));
        subscribers.push(record.clone());
        Ok(())
    }

    async fn record_operation_run(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<(), ReportError> {
        self.write(format!("operation:{}:{}", name, SortableDate::new(now)));
        Ok(())
    }
}
