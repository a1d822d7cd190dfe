pub mod account_repository;
pub mod listen_repository;
pub mod user_repository;

use crate::{DbError, Result};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub(crate) fn parse_uuid(column: &'static str, row_id: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::decode(column, row_id, e.to_string()))
}

pub(crate) fn from_epoch_millis(
    column: &'static str,
    row_id: &str,
    millis: i64,
) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DbError::decode(column, row_id, format!("timestamp out of range: {millis}")))
}
