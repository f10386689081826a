//! Cookie persistence - save and load cookies to/from disk.
//!
//! A jar file is a JSON array of [`CookieRecord`]s. `expiry` is `null` or an
//! RFC 3339 timestamp string.

use crate::base::neterror::NetError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::OffsetDateTime;

/// Serializable representation of a cookie for persistence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub subdomains: bool,
    pub path: String,
    pub secure: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expiry: Option<OffsetDateTime>,
}

/// Read every record from a jar file.
pub async fn read_records(path: &Path) -> Result<Vec<CookieRecord>, NetError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| NetError::cookie_store_io(path.display().to_string(), e))?;

    serde_json::from_str(&json).map_err(|e| NetError::cookie_invalid_data(e.to_string()))
}

/// Replace the contents of a jar file with `records`.
pub async fn write_records(path: &Path, records: &[CookieRecord]) -> Result<(), NetError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| NetError::cookie_invalid_data(e.to_string()))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| NetError::cookie_store_io(path.display().to_string(), e))
}
