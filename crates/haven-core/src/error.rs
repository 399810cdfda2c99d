use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("timeframe must be one of: week, month, year (got {0:?})")]
    InvalidTimeFrame(String),
}
