use std::io::Read;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{RegisterFigures, RegisterRow, SUMMARY_COLUMNS, unguard_text};
use crate::calculation::{aggregate, classify, epf_contribution, esi_contribution, is_recognized};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeProfile, MonthContext};

const FIGURES_OFFSET: usize = 6;

fn import_error(line: u64, message: impl Into<String>) -> EngineError {
    EngineError::RegisterImport {
        line,
        message: message.into(),
    }
}

fn csv_error(err: csv::Error) -> EngineError {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
    import_error(line, err.to_string())
}

fn parse_amount(raw: &str, column: &str, line: u64) -> EngineResult<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw)
        .map_err(|_| import_error(line, format!("column '{}': invalid number '{}'", column, raw)))
}

fn optional_text(raw: &str) -> Option<String> {
    let value = unguard_text(raw.trim());
    (!value.is_empty()).then(|| value.to_string())
}

/// Reads a register CSV back into profiles, attendance and figures.
///
/// The header must carry the summary columns followed by one column per day
/// of `month`. Opening casual leave is not a register column, so it is
/// inferred from the paid casual leave: when fewer days were paid than the
/// codes took, the paid figure was the whole balance; otherwise the balance
/// is the larger of the configured default and the paid figure. Statutory
/// opt-outs are inferred from a zero contribution where the stated wages
/// would attract a non-zero one. A contribution that rounds to zero cannot
/// show an opt-out, so those profiles keep the default of applicable.
/// Unrecognized day tokens are kept as unmarked days and logged.
///
/// # Errors
///
/// Returns `RegisterImport` with the 1-based line number of the first
/// header or row that cannot be read.
pub fn import_register<R: Read>(
    reader: R,
    month: &MonthContext,
    config: &EngineConfig,
) -> EngineResult<Vec<RegisterRow>> {
    let days = month.days_in_month() as usize;
    let expected_columns = SUMMARY_COLUMNS.len() + days;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    if headers.len() != expected_columns {
        return Err(import_error(
            1,
            format!(
                "expected {} columns, found {}",
                expected_columns,
                headers.len()
            ),
        ));
    }
    for (idx, expected) in SUMMARY_COLUMNS.iter().enumerate() {
        let found = headers.get(idx).unwrap_or_default();
        if found != *expected {
            return Err(import_error(
                1,
                format!("column {} should be '{}', found '{}'", idx + 1, expected, found),
            ));
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        if record.len() != expected_columns {
            return Err(import_error(
                line,
                format!(
                    "expected {} columns, found {}",
                    expected_columns,
                    record.len()
                ),
            ));
        }
        let cell = |idx: usize| record.get(idx).unwrap_or_default();

        let serial = cell(0)
            .trim()
            .parse::<u32>()
            .map_err(|_| import_error(line, format!("invalid serial number '{}'", cell(0))))?;

        let emp_id = unguard_text(cell(1).trim()).to_string();
        if emp_id.is_empty() {
            return Err(import_error(line, "EmpID is empty"));
        }

        let gross = parse_amount(cell(5), SUMMARY_COLUMNS[5], line)?;

        let mut figure_cells = [Decimal::ZERO; 21];
        for (offset, slot) in figure_cells.iter_mut().enumerate() {
            let idx = FIGURES_OFFSET + offset;
            *slot = parse_amount(cell(idx), SUMMARY_COLUMNS[idx], line)?;
        }
        let figures = RegisterFigures::from_cells(figure_cells);

        let attendance: Vec<_> = (SUMMARY_COLUMNS.len()..expected_columns)
            .map(|idx| {
                let token = cell(idx);
                if !is_recognized(token) {
                    warn!(
                        line,
                        emp_id = %emp_id,
                        day = idx - SUMMARY_COLUMNS.len() + 1,
                        token = %token,
                        "Unrecognized attendance token treated as unmarked"
                    );
                }
                classify(token)
            })
            .collect();

        let mut profile = EmployeeProfile::new(emp_id, unguard_text(cell(4).trim()), gross);
        profile.epf_no = optional_text(cell(2));
        profile.esi_no = optional_text(cell(3));
        let row_error = |err: EngineError| import_error(line, err.to_string());
        let taken = aggregate(
            &attendance,
            Decimal::ZERO,
            month.days_in_month(),
            config.attendance(),
        )
        .map_err(row_error)?
        .casual_leave_taken;
        profile.opening_cl = if figures.casual_leave < taken {
            figures.casual_leave
        } else {
            config.attendance().default_opening_cl.max(figures.casual_leave)
        };
        profile.bonus = figures.bonus;
        profile.other_allowance = figures.other_allowance;
        profile.ot = figures.ot;
        profile.other_deduction = figures.other_deduction;

        let epf_due = epf_contribution(figures.basic, figures.da, config.epf())
            .map_err(row_error)?
            .employee;
        profile.epf_applicable = epf_due.is_zero() || !figures.epf.is_zero();
        let esi_due = esi_contribution(figures.earned_gross, config.esi())
            .map_err(row_error)?
            .employee;
        profile.esi_applicable = esi_due.is_zero() || !figures.esi.is_zero();

        rows.push(RegisterRow {
            serial,
            profile,
            attendance,
            figures,
        });
    }

    debug!(
        year = month.year(),
        month = month.month(),
        rows = rows.len(),
        "Register imported"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{classify_all, compute_payroll};
    use crate::models::{AttendanceCode, PayrollRecord};
    use crate::register::export_register;

    fn february() -> MonthContext {
        MonthContext::new(2025, 2).unwrap()
    }

    fn header() -> String {
        let mut cells: Vec<String> = SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect();
        cells.extend(february().day_headers());
        cells.join(",")
    }

    fn computed(profile: EmployeeProfile, tokens: Vec<&str>) -> PayrollRecord {
        compute_payroll(profile, classify_all(tokens), &february(), &EngineConfig::default())
            .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_codes_and_figures() {
        let config = EngineConfig::default();

        let mut tokens = vec!["P"; 28];
        tokens[0] = "WO";
        tokens[3] = "CL";
        tokens[4] = "HCL";
        tokens[5] = "A";
        tokens[6] = "PHW";
        tokens[7] = "";
        let mut asha = EmployeeProfile::new("E001", "Asha", Decimal::new(18000, 0));
        asha.epf_no = Some("TN/1".to_string());
        asha.esi_no = Some("3100".to_string());
        asha.bonus = Decimal::new(500, 0);
        asha.other_deduction = Decimal::new(250, 0);

        let mut ravi = EmployeeProfile::new("E002", "-Ravi", Decimal::new(19000, 0));
        ravi.esi_applicable = false;

        let records = vec![computed(asha, tokens), computed(ravi, vec!["P"; 28])];
        let csv = export_register(&records, &february()).unwrap();
        let rows = import_register(csv.as_bytes(), &february(), &config).unwrap();

        assert_eq!(rows.len(), 2);
        for (row, original) in rows.iter().zip(&records) {
            assert_eq!(row.attendance, original.attendance);
            assert_eq!(row.figures, RegisterFigures::from_record(original));

            let again = compute_payroll(
                row.profile.clone(),
                row.attendance.clone(),
                &february(),
                &config,
            )
            .unwrap();
            assert_eq!(RegisterFigures::from_record(&again), row.figures);
        }

        assert_eq!(rows[0].serial, 1);
        assert_eq!(rows[0].profile.epf_no.as_deref(), Some("TN/1"));
        assert_eq!(rows[1].profile.name, "-Ravi");
        assert_eq!(rows[1].profile.epf_no, None);
        assert!(!rows[1].profile.esi_applicable);
    }

    #[test]
    fn test_opening_cl_defaults_when_leave_was_fully_paid() {
        let csv = export_register(
            &[computed(
                EmployeeProfile::new("E001", "Asha", Decimal::new(20000, 0)),
                vec!["P"; 28],
            )],
            &february(),
        )
        .unwrap();
        let rows = import_register(csv.as_bytes(), &february(), &EngineConfig::default()).unwrap();
        assert_eq!(rows[0].profile.opening_cl, Decimal::new(8, 0));
    }

    #[test]
    fn test_overdrawn_leave_restores_opening_balance() {
        let config = EngineConfig::default();
        let mut tokens = vec!["P"; 28];
        for day in tokens.iter_mut().take(4) {
            *day = "CL";
        }
        let mut asha = EmployeeProfile::new("E001", "Asha", Decimal::new(25000, 0));
        asha.opening_cl = Decimal::new(2, 0);
        let original = computed(asha, tokens);
        assert_eq!(original.aggregation.loss_of_pay, Decimal::new(2, 0));

        let csv = export_register(std::slice::from_ref(&original), &february()).unwrap();
        let rows = import_register(csv.as_bytes(), &february(), &config).unwrap();
        assert_eq!(rows[0].profile.opening_cl, Decimal::new(2, 0));

        let again = compute_payroll(
            rows[0].profile.clone(),
            rows[0].attendance.clone(),
            &february(),
            &config,
        )
        .unwrap();
        assert_eq!(again.aggregation.loss_of_pay, Decimal::new(2, 0));
        assert_eq!(again.aggregation.payable_days, Decimal::new(26, 0));
        assert_eq!(again.breakdown, original.breakdown);
        assert_eq!(RegisterFigures::from_record(&again), rows[0].figures);
    }

    #[test]
    fn test_contributions_rounding_to_zero_keep_flags() {
        let config = EngineConfig::default();
        let mut tokens = vec!["A"; 28];
        tokens[0] = "P";
        let records = vec![
            computed(EmployeeProfile::new("E001", "Tiny", Decimal::new(10, 0)), tokens.clone()),
            computed(EmployeeProfile::new("E002", "Tinier", Decimal::ONE), tokens),
        ];
        assert!(records[0].breakdown.esi_applicable);
        assert!(records[0].breakdown.esi.is_zero());
        assert!(records[1].breakdown.epf.is_zero());

        let csv = export_register(&records, &february()).unwrap();
        let rows = import_register(csv.as_bytes(), &february(), &config).unwrap();

        for (row, original) in rows.iter().zip(&records) {
            assert!(row.profile.epf_applicable);
            assert!(row.profile.esi_applicable);
            let again = compute_payroll(
                row.profile.clone(),
                row.attendance.clone(),
                &february(),
                &config,
            )
            .unwrap();
            assert_eq!(again.breakdown, original.breakdown);
        }
    }

    #[test]
    fn test_quoted_identity_cells_survive() {
        let profile = EmployeeProfile::new("'=E001", "'Asha", Decimal::new(20000, 0));
        let csv = export_register(&[computed(profile, vec!["P"; 28])], &february()).unwrap();
        let rows = import_register(csv.as_bytes(), &february(), &EngineConfig::default()).unwrap();
        assert_eq!(rows[0].profile.emp_id, "'=E001");
        assert_eq!(rows[0].profile.name, "'Asha");
    }

    #[test]
    fn test_lowercase_worked_holiday_and_unknown_tokens() {
        let mut days = vec!["P"; 28];
        days[0] = "pH";
        days[1] = "XYZ";
        let figures = vec!["0"; 21].join(",");
        let csv = format!(
            "{}\n1,E001,,,Asha,20000,{},{}\n",
            header(),
            figures,
            days.join(",")
        );

        let rows = import_register(csv.as_bytes(), &february(), &EngineConfig::default()).unwrap();
        assert_eq!(rows[0].attendance[0], AttendanceCode::WorkedPaidHoliday);
        assert_eq!(rows[0].attendance[1], AttendanceCode::Empty);
        assert_eq!(rows[0].attendance[2], AttendanceCode::Present);
    }

    #[test]
    fn test_wrong_header_width_reports_line_one() {
        let csv = "S.No,EmpID\n1,E001\n";
        let result = import_register(csv.as_bytes(), &february(), &EngineConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::RegisterImport { line: 1, .. })
        ));
    }

    #[test]
    fn test_renamed_summary_column_rejected() {
        let csv = header().replacen("Net Salary", "Net Pay", 1);
        let result = import_register(csv.as_bytes(), &february(), &EngineConfig::default());
        match result {
            Err(EngineError::RegisterImport { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("Net Salary"));
            }
            other => panic!("expected RegisterImport, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_reports_row_line() {
        let days = vec!["P"; 28].join(",");
        let good = vec!["0"; 21].join(",");
        let mut bad = vec!["0"; 21];
        bad[7] = "12,5x";
        let csv = format!(
            "{}\n1,E001,,,Asha,20000,{},{}\n2,E002,,,Ravi,20000,{},{}\n",
            header(),
            good,
            days,
            bad.iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(","),
            days
        );

        let result = import_register(csv.as_bytes(), &february(), &EngineConfig::default());
        match result {
            Err(EngineError::RegisterImport { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("Earned Gross"));
            }
            other => panic!("expected RegisterImport, got {:?}", other),
        }
    }

    #[test]
    fn test_figures_beyond_decimal_range_report_row_line() {
        let days = vec!["P"; 28].join(",");
        let mut figures = vec!["0"; 21];
        figures[8] = "79228162514264337593543950335";
        figures[9] = "79228162514264337593543950335";
        let csv = format!(
            "{}\n1,E001,,,Asha,20000,{},{}\n",
            header(),
            figures.join(","),
            days
        );

        let result = import_register(csv.as_bytes(), &february(), &EngineConfig::default());
        match result {
            Err(EngineError::RegisterImport { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("overflow"));
            }
            other => panic!("expected RegisterImport, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_rejected() {
        let csv = format!("{}\n1,E001,,,Asha\n", header());
        let result = import_register(csv.as_bytes(), &february(), &EngineConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::RegisterImport { line: 2, .. })
        ));
    }
}
