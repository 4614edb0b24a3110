//! Attendance code model.
//!
//! This module defines the closed [`AttendanceCode`] vocabulary. Every
//! consumer (aggregation, reporting, register export) matches on this type
//! rather than on raw spreadsheet strings.

use serde::{Deserialize, Serialize};

/// The semantic category of one calendar day in an attendance record.
///
/// Serializes as its canonical register token.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceCode;
///
/// assert_eq!(AttendanceCode::CasualLeave.token(), "CL");
/// assert_eq!(serde_json::to_string(&AttendanceCode::WeekOff).unwrap(), "\"WO\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceCode {
    /// Worked a full day (`P`).
    #[serde(rename = "P")]
    Present,
    /// Unpaid absence (`A`).
    #[serde(rename = "A")]
    Absent,
    /// Full day of casual leave (`CL`).
    #[serde(rename = "CL")]
    CasualLeave,
    /// Half day of casual leave (`HCL`).
    #[serde(rename = "HCL")]
    HalfCasualLeave,
    /// Worked half a day, other half unpaid (`HP`).
    #[serde(rename = "HP")]
    HalfPresent,
    /// Half day of unpaid leave, other half worked (`HL`).
    #[serde(rename = "HL")]
    HalfLeave,
    /// Weekly off (`WO`).
    #[serde(rename = "WO")]
    WeekOff,
    /// Worked on the weekly off (`WW`).
    #[serde(rename = "WW")]
    WorkedWeekOff,
    /// Paid holiday (`PH`).
    #[serde(rename = "PH")]
    PaidHoliday,
    /// Half-paid holiday variant (`PHW`, also written `pH`).
    #[serde(rename = "PHW", alias = "pH")]
    WorkedPaidHoliday,
    /// On official duty away from site (`OD`).
    #[serde(rename = "OD")]
    OnDuty,
    /// Worked from home (`WFH`).
    #[serde(rename = "WFH")]
    WorkFromHome,
    /// Day not yet marked.
    #[serde(rename = "")]
    Empty,
}

impl AttendanceCode {
    /// Every code, in register legend order.
    pub const ALL: [AttendanceCode; 13] = [
        AttendanceCode::Present,
        AttendanceCode::Absent,
        AttendanceCode::CasualLeave,
        AttendanceCode::HalfCasualLeave,
        AttendanceCode::HalfPresent,
        AttendanceCode::HalfLeave,
        AttendanceCode::WeekOff,
        AttendanceCode::WorkedWeekOff,
        AttendanceCode::PaidHoliday,
        AttendanceCode::WorkedPaidHoliday,
        AttendanceCode::OnDuty,
        AttendanceCode::WorkFromHome,
        AttendanceCode::Empty,
    ];

    /// Returns the canonical register token for this code.
    pub fn token(self) -> &'static str {
        match self {
            AttendanceCode::Present => "P",
            AttendanceCode::Absent => "A",
            AttendanceCode::CasualLeave => "CL",
            AttendanceCode::HalfCasualLeave => "HCL",
            AttendanceCode::HalfPresent => "HP",
            AttendanceCode::HalfLeave => "HL",
            AttendanceCode::WeekOff => "WO",
            AttendanceCode::WorkedWeekOff => "WW",
            AttendanceCode::PaidHoliday => "PH",
            AttendanceCode::WorkedPaidHoliday => "PHW",
            AttendanceCode::OnDuty => "OD",
            AttendanceCode::WorkFromHome => "WFH",
            AttendanceCode::Empty => "",
        }
    }
}

impl std::fmt::Display for AttendanceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<&str> = AttendanceCode::ALL.iter().map(|c| c.token()).collect();
        assert_eq!(tokens.len(), AttendanceCode::ALL.len());
    }

    #[test]
    fn test_serialize_uses_token() {
        assert_eq!(
            serde_json::to_string(&AttendanceCode::WorkFromHome).unwrap(),
            "\"WFH\""
        );
        assert_eq!(serde_json::to_string(&AttendanceCode::Empty).unwrap(), "\"\"");
    }

    #[test]
    fn test_deserialize_accepts_half_paid_holiday_alias() {
        let code: AttendanceCode = serde_json::from_str("\"pH\"").unwrap();
        assert_eq!(code, AttendanceCode::WorkedPaidHoliday);
        let code: AttendanceCode = serde_json::from_str("\"PHW\"").unwrap();
        assert_eq!(code, AttendanceCode::WorkedPaidHoliday);
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(AttendanceCode::HalfCasualLeave.to_string(), "HCL");
    }
}
