use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::{
    case::{CaseCategory, CaseRecord},
    chart::ChartLink,
    errors::ReportError,
    notificator::Notificator,
    operation::OperationRecord,
    vaccination::VaccinationRecord,
};
use storage::Storage;

/// Storage collaborator of the report engine.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Fails with `OperationNotFound` when no active operation of the type exists.
    async fn latest_operation(&self, main_type: &str) -> Result<OperationRecord, ReportError>;

    async fn cases(
        &self,
        category: CaseCategory,
        source: Option<&str>,
    ) -> Result<Vec<CaseRecord>, ReportError>;

    /// Oldest first.
    async fn vaccinations(
        &self,
        area: &str,
        lookback_days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<VaccinationRecord>, ReportError>;

    async fn chart_link(&self, name: &str) -> Result<ChartLink, ReportError>;

    async fn mark_chart_used(&self, link: &ChartLink) -> Result<(), ReportError>;

    /// Active subscriptions only.
    async fn subscribers(&self, origin: &str) -> Result<Vec<Notificator>, ReportError>;

    async fn subscriber(
        &self,
        chat_id: i64,
        origin: &str,
    ) -> Result<Option<Notificator>, ReportError>;

    async fn upsert_subscriber(&self, record: &Notificator) -> Result<(), ReportError>;

    async fn record_operation_run(&self, name: &str, now: NaiveDateTime)
        -> Result<(), ReportError>;
}

#[async_trait]
impl StatsStore for Storage {
    async fn latest_operation(&self, main_type: &str) -> Result<OperationRecord, ReportError> {
        self.operations
            .latest(main_type)
            .await?
            .ok_or_else(|| ReportError::OperationNotFound(main_type.to_string()))
    }

    async fn cases(
        &self,
        category: CaseCategory,
        source: Option<&str>,
    ) -> Result<Vec<CaseRecord>, ReportError> {
        Ok(self.cases.find(category, source).await?)
    }

    async fn vaccinations(
        &self,
        area: &str,
        lookback_days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<VaccinationRecord>, ReportError> {
        Ok(self.vaccinations.since(area, lookback_days, now).await?)
    }

    async fn chart_link(&self, name: &str) -> Result<ChartLink, ReportError> {
        self.charts
            .get(name)
            .await?
            .ok_or_else(|| ReportError::ChartNotFound(name.to_string()))
    }

    async fn mark_chart_used(&self, link: &ChartLink) -> Result<(), ReportError> {
        Ok(self.charts.mark_used(&link.chart_name).await?)
    }

    async fn subscribers(&self, origin: &str) -> Result<Vec<Notificator>, ReportError> {
        Ok(self.notificators.active(origin).await?)
    }

    async fn subscriber(
        &self,
        chat_id: i64,
        origin: &str,
    ) -> Result<Option<Notificator>, ReportError> {
        Ok(self.notificators.get(chat_id, origin).await?)
    }

    async fn upsert_subscriber(&self, record: &Notificator) -> Result<(), ReportError> {
        Ok(self.notificators.upsert(record).await?)
    }

    async fn record_operation_run(
        &self,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<(), ReportError> {
        Ok(self.operations.record_run(name, now).await?)
    }
}
