use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bucket month {0} is not the first day of a month")]
    MonthNotAnchored(NaiveDate),
}

pub type Result<T> = std::result::Result<T, ModelError>;
