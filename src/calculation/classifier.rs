//! Attendance token classification.
//!
//! This module maps raw register tokens onto the closed [`AttendanceCode`]
//! vocabulary. Importers and the HTTP layer route every cell through here
//! before aggregation.

use crate::models::AttendanceCode;

/// Classifies a raw attendance token.
///
/// Total: surrounding whitespace is ignored, matching is case-sensitive, and
/// anything outside the vocabulary (including blank) is `Empty`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::classify;
/// use payroll_engine::models::AttendanceCode;
///
/// assert_eq!(classify("P"), AttendanceCode::Present);
/// assert_eq!(classify(" CL "), AttendanceCode::CasualLeave);
/// assert_eq!(classify("pH"), AttendanceCode::WorkedPaidHoliday);
/// assert_eq!(classify("p"), AttendanceCode::Empty);
/// ```
pub fn classify(token: &str) -> AttendanceCode {
    match token.trim() {
        "P" => AttendanceCode::Present,
        "A" => AttendanceCode::Absent,
        "CL" => AttendanceCode::CasualLeave,
        "HCL" => AttendanceCode::HalfCasualLeave,
        "HP" => AttendanceCode::HalfPresent,
        "HL" => AttendanceCode::HalfLeave,
        "WO" => AttendanceCode::WeekOff,
        "WW" => AttendanceCode::WorkedWeekOff,
        "PH" => AttendanceCode::PaidHoliday,
        "pH" | "PHW" => AttendanceCode::WorkedPaidHoliday,
        "OD" => AttendanceCode::OnDuty,
        "WFH" => AttendanceCode::WorkFromHome,
        _ => AttendanceCode::Empty,
    }
}

/// Returns true when `token` is blank or one of the known tokens.
///
/// Used by importers to flag cells that [`classify`] silently turns into
/// `Empty`.
pub fn is_recognized(token: &str) -> bool {
    let trimmed = token.trim();
    trimmed.is_empty() || classify(trimmed) != AttendanceCode::Empty
}

/// Classifies a whole row of tokens, preserving order.
pub fn classify_all<I, S>(tokens: I) -> Vec<AttendanceCode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| classify(token.as_ref()))
        .collect()
}
