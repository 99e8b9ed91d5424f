//! CSV serialization of result sets for download endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;

/// Serialize rows to CSV text with a header derived from the row type. The
/// output carries every column of the row set, filtered and derived columns
/// included.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::Internal(format!("CSV serialization failed: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV serialization failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV output not UTF-8: {e}")))
}

/// Download filename embedding the export date, e.g. `inventory_20180401.csv`.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y%m%d"))
}
