use tracing::debug;

use super::{RegisterFigures, SUMMARY_COLUMNS, guard_text};
use crate::error::{EngineError, EngineResult};
use crate::models::{MonthContext, PayrollRecord};

fn export_error(err: impl std::fmt::Display) -> EngineError {
    EngineError::RegisterExport {
        message: err.to_string(),
    }
}

/// Renders computed records as a register CSV for `month`.
///
/// Rows keep the order of `records` and are numbered from 1. Day cells
/// carry canonical tokens, so unmarked days export as empty cells.
///
/// # Errors
///
/// - `ShapeMismatch` if a record was computed for a month of different length
/// - `RegisterExport` if the CSV writer fails
pub fn export_register(records: &[PayrollRecord], month: &MonthContext) -> EngineResult<String> {
    let days = month.days_in_month();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(month.day_headers());
    writer.write_record(&header).map_err(export_error)?;

    for (idx, record) in records.iter().enumerate() {
        if record.attendance.len() != days as usize {
            return Err(EngineError::ShapeMismatch {
                expected: days as usize,
                actual: record.attendance.len(),
            });
        }

        let profile = &record.profile;
        let mut row = Vec::with_capacity(header.len());
        row.push((idx + 1).to_string());
        row.push(guard_text(&profile.emp_id));
        row.push(guard_text(profile.epf_no.as_deref().unwrap_or_default()));
        row.push(guard_text(profile.esi_no.as_deref().unwrap_or_default()));
        row.push(guard_text(&profile.name));
        row.push(profile.gross.to_string());
        row.extend(
            RegisterFigures::from_record(record)
                .to_cells()
                .iter()
                .map(|value| value.to_string()),
        );
        row.extend(record.attendance.iter().map(|code| code.token().to_string()));

        writer.write_record(&row).map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    let csv = String::from_utf8(bytes).map_err(export_error)?;

    debug!(
        year = month.year(),
        month = month.month(),
        rows = records.len(),
        "Register exported"
    );

    Ok(csv)
}
