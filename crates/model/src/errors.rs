use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Common error: {0}")]
    Eyre(#[from] eyre::Error),
    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),
    #[error("No operations found: {0}")]
    OperationNotFound(String),
    #[error("Chart link not found: {0}")]
    ChartNotFound(String),
    #[error("No subscribers for {0}")]
    NoSubscribers(String),
}
