//! Configuration types for payroll policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the named
//! defaults the engine falls back to when no directory is supplied.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Share of earned gross paid as basic salary, in percent.
pub const DEFAULT_BASIC_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Share of earned gross paid as dearness allowance, in percent.
pub const DEFAULT_DA_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Share of earned gross paid as house rent allowance, in percent.
pub const DEFAULT_HRA_PERCENT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Opening casual-leave balance used when a profile does not carry one.
pub const DEFAULT_OPENING_CL: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// EPF employee contribution rate, in percent.
pub const DEFAULT_EPF_EMPLOYEE_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
/// EPF employer contribution rate, in percent.
pub const DEFAULT_EPF_EMPLOYER_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
/// Statutory EPF wage ceiling applied to basic + DA.
pub const DEFAULT_EPF_WAGE_CEILING: Decimal = Decimal::from_parts(15000, 0, 0, false, 0);

/// ESI applies only while earned gross stays below this amount.
pub const DEFAULT_ESI_WAGE_CEILING: Decimal = Decimal::from_parts(21000, 0, 0, false, 0);
/// ESI employee contribution rate, in percent (0.75).
pub const DEFAULT_ESI_EMPLOYEE_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 2);
/// ESI employer contribution rate, in percent (3.25).
pub const DEFAULT_ESI_EMPLOYER_RATE: Decimal = Decimal::from_parts(325, 0, 0, false, 2);

/// Percentage split of earned gross into basic, DA and HRA.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalarySplit {
    /// Basic salary share, in percent.
    pub basic_percent: Decimal,
    /// Dearness allowance share, in percent.
    pub da_percent: Decimal,
    /// House rent allowance share, in percent. HRA is paid as the remainder
    /// of earned gross, so this value is only checked for consistency.
    pub hra_percent: Decimal,
}

impl Default for SalarySplit {
    fn default() -> Self {
        Self {
            basic_percent: DEFAULT_BASIC_PERCENT,
            da_percent: DEFAULT_DA_PERCENT,
            hra_percent: DEFAULT_HRA_PERCENT,
        }
    }
}

/// Where the non-leave half of a half-day code is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayRemainder {
    /// The other half is a worked half day.
    Present,
    /// The other half is unpaid.
    LossOfPay,
    /// The other half is not counted in any bucket.
    Excluded,
}

/// Policy knobs for turning attendance codes into day counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendancePolicy {
    /// Opening casual-leave balance for profiles imported without one.
    pub default_opening_cl: Decimal,
    /// Bucket for the non-leave half of `HCL`.
    pub half_casual_leave_remainder: HalfDayRemainder,
    /// Bucket for the non-holiday half of `PHW`.
    pub worked_paid_holiday_remainder: HalfDayRemainder,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            default_opening_cl: DEFAULT_OPENING_CL,
            half_casual_leave_remainder: HalfDayRemainder::Present,
            worked_paid_holiday_remainder: HalfDayRemainder::Present,
        }
    }
}

/// Treatment of fixed deductions for a month with no payable days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZeroAttendancePolicy {
    /// When true, professional tax and other deduction are still charged.
    pub apply_fixed_deductions: bool,
}

/// Configuration from payroll.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PayrollPolicy {
    /// Earnings split.
    pub salary_split: SalarySplit,
    /// Attendance counting policy.
    pub attendance: AttendancePolicy,
    /// Zero-attendance deduction policy.
    #[serde(default)]
    pub zero_attendance: ZeroAttendancePolicy,
}

/// Employee Provident Fund rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EpfConfig {
    /// Employee share, in percent of the capped wage.
    pub employee_rate: Decimal,
    /// Employer share, in percent of the capped wage.
    pub employer_rate: Decimal,
    /// Ceiling applied to basic + DA before the rates.
    pub wage_ceiling: Decimal,
}

impl Default for EpfConfig {
    fn default() -> Self {
        Self {
            employee_rate: DEFAULT_EPF_EMPLOYEE_RATE,
            employer_rate: DEFAULT_EPF_EMPLOYER_RATE,
            wage_ceiling: DEFAULT_EPF_WAGE_CEILING,
        }
    }
}

/// Employee State Insurance rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EsiConfig {
    /// Earned gross must be strictly below this for ESI to apply.
    pub wage_ceiling: Decimal,
    /// Employee share, in percent of earned gross.
    pub employee_rate: Decimal,
    /// Employer share, in percent of earned gross.
    pub employer_rate: Decimal,
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            wage_ceiling: DEFAULT_ESI_WAGE_CEILING,
            employee_rate: DEFAULT_ESI_EMPLOYEE_RATE,
            employer_rate: DEFAULT_ESI_EMPLOYER_RATE,
        }
    }
}

/// Configuration from statutory.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatutoryConfig {
    /// EPF section.
    pub epf: EpfConfig,
    /// ESI section.
    pub esi: EsiConfig,
}

/// A single professional-tax band.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfessionalTaxSlab {
    /// Inclusive lower bound on monthly earned gross.
    pub from: Decimal,
    /// Monthly tax charged inside this band.
    pub amount: Decimal,
}

/// Configuration from professional_tax.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfessionalTaxConfig {
    /// Bands in ascending order of `from`, starting at zero.
    pub slabs: Vec<ProfessionalTaxSlab>,
}

impl ProfessionalTaxConfig {
    /// Returns the tax for the band that contains `earned_gross`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ProfessionalTaxConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let table = ProfessionalTaxConfig::default();
    /// assert_eq!(table.lookup(Decimal::new(14999, 0)), Decimal::ZERO);
    /// assert_eq!(table.lookup(Decimal::new(15000, 0)), Decimal::new(150, 0));
    /// assert_eq!(table.lookup(Decimal::new(25000, 0)), Decimal::new(200, 0));
    /// ```
    pub fn lookup(&self, earned_gross: Decimal) -> Decimal {
        self.slabs
            .iter()
            .rev()
            .find(|slab| slab.from <= earned_gross)
            .map(|slab| slab.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for ProfessionalTaxConfig {
    fn default() -> Self {
        Self {
            slabs: vec![
                ProfessionalTaxSlab {
                    from: Decimal::ZERO,
                    amount: Decimal::ZERO,
                },
                ProfessionalTaxSlab {
                    from: Decimal::new(15000, 0),
                    amount: Decimal::new(150, 0),
                },
                ProfessionalTaxSlab {
                    from: Decimal::new(20000, 0),
                    amount: Decimal::new(200, 0),
                },
            ],
        }
    }
}

/// The complete engine configuration.
///
/// Aggregates the three policy tables. `EngineConfig::default()` matches
/// the tables shipped under `config/default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    payroll: PayrollPolicy,
    statutory: StatutoryConfig,
    professional_tax: ProfessionalTaxConfig,
}

impl EngineConfig {
    /// Creates a validated EngineConfig from its component parts.
    pub fn new(
        payroll: PayrollPolicy,
        statutory: StatutoryConfig,
        professional_tax: ProfessionalTaxConfig,
    ) -> EngineResult<Self> {
        let config = Self {
            payroll,
            statutory,
            professional_tax,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the salary split.
    pub fn salary_split(&self) -> &SalarySplit {
        &self.payroll.salary_split
    }

    /// Returns the attendance counting policy.
    pub fn attendance(&self) -> &AttendancePolicy {
        &self.payroll.attendance
    }

    /// Returns the zero-attendance deduction policy.
    pub fn zero_attendance(&self) -> &ZeroAttendancePolicy {
        &self.payroll.zero_attendance
    }

    /// Returns the EPF rates.
    pub fn epf(&self) -> &EpfConfig {
        &self.statutory.epf
    }

    /// Returns the ESI rates.
    pub fn esi(&self) -> &EsiConfig {
        &self.statutory.esi
    }

    /// Returns the professional-tax table.
    pub fn professional_tax(&self) -> &ProfessionalTaxConfig {
        &self.professional_tax
    }

    fn validate(&self) -> EngineResult<()> {
        let split = self.salary_split();
        for (name, value) in [
            ("basic_percent", split.basic_percent),
            ("da_percent", split.da_percent),
            ("hra_percent", split.hra_percent),
        ] {
            if value.is_sign_negative() {
                return Err(invalid(format!("salary_split.{} is negative", name)));
            }
        }
        let total = split.basic_percent + split.da_percent + split.hra_percent;
        if total != Decimal::ONE_HUNDRED {
            return Err(invalid(format!(
                "salary split must total 100 percent, got {}",
                total
            )));
        }

        if self.attendance().default_opening_cl.is_sign_negative() {
            return Err(invalid("attendance.default_opening_cl is negative"));
        }

        let epf = self.epf();
        let esi = self.esi();
        for (name, value) in [
            ("epf.employee_rate", epf.employee_rate),
            ("epf.employer_rate", epf.employer_rate),
            ("epf.wage_ceiling", epf.wage_ceiling),
            ("esi.employee_rate", esi.employee_rate),
            ("esi.employer_rate", esi.employer_rate),
            ("esi.wage_ceiling", esi.wage_ceiling),
        ] {
            if value.is_sign_negative() {
                return Err(invalid(format!("{} is negative", name)));
            }
        }

        let slabs = &self.professional_tax.slabs;
        match slabs.first() {
            Some(first) if first.from.is_zero() => {}
            _ => return Err(invalid("professional tax slabs must start at 0")),
        }
        for pair in slabs.windows(2) {
            if pair[1].from <= pair[0].from {
                return Err(invalid(
                    "professional tax slabs must be in strictly ascending order",
                ));
            }
        }
        if slabs.iter().any(|slab| slab.amount.is_sign_negative()) {
            return Err(invalid("professional tax amount is negative"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
