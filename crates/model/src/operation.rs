use chrono::NaiveDateTime;

/// Names of the background jobs whose last run gates reports.
pub const LOADER_OPERATION: &str = "coronaloader";
pub const ALERT_OPERATION: &str = "notifynewcases";

/// Last successful run of a named background job, in naive UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub name: String,
    pub main_type: String,
    pub last_run: NaiveDateTime,
}

impl OperationRecord {
    /// The authoritative record among several active ones: latest run wins.
    pub fn latest(operations: Vec<OperationRecord>) -> Option<OperationRecord> {
        operations.into_iter().max_by_key(|op| op.last_run)
    }
}
