//! Salary computation.
//!
//! This module derives the full earnings and deductions breakdown from an
//! employee profile and the month's aggregated attendance. Every monetary
//! step goes through [`crate::calculation::decimal`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::decimal::{add, divide, multiply, percentage, subtract, sum};
use crate::config::{EngineConfig, EpfConfig, EsiConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AggregationResult, EmployeeProfile, EmployerContributions, PayrollBreakdown};

/// EPF amounts for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpfContribution {
    /// Basic + DA capped at the wage ceiling.
    pub wage: Decimal,
    /// Employee share, deducted from net pay.
    pub employee: Decimal,
    /// Employer share, reported only.
    pub employer: Decimal,
}

/// ESI amounts for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsiContribution {
    /// Whether earned gross fell under the ceiling.
    pub applicable: bool,
    /// Employee share, deducted from net pay.
    pub employee: Decimal,
    /// Employer share, reported only.
    pub employer: Decimal,
}

impl EsiContribution {
    fn none() -> Self {
        Self {
            applicable: false,
            employee: Decimal::ZERO,
            employer: Decimal::ZERO,
        }
    }
}

/// Computes EPF on basic + DA, capped at the statutory wage ceiling.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::epf_contribution;
/// use payroll_engine::config::EpfConfig;
/// use rust_decimal::Decimal;
///
/// let epf = epf_contribution(Decimal::new(14000, 0), Decimal::new(6000, 0), &EpfConfig::default())
///     .unwrap();
/// assert_eq!(epf.wage, Decimal::new(15000, 0));
/// assert_eq!(epf.employee, Decimal::new(1800, 0));
/// ```
pub fn epf_contribution(
    basic: Decimal,
    da: Decimal,
    config: &EpfConfig,
) -> EngineResult<EpfContribution> {
    let wage = add(basic, da)?.min(config.wage_ceiling);
    Ok(EpfContribution {
        wage,
        employee: percentage(wage, config.employee_rate)?,
        employer: percentage(wage, config.employer_rate)?,
    })
}

/// Computes ESI on earned gross when it is below the ESI wage ceiling.
///
/// A month with no earned gross carries no ESI.
pub fn esi_contribution(
    earned_gross: Decimal,
    config: &EsiConfig,
) -> EngineResult<EsiContribution> {
    if earned_gross <= Decimal::ZERO || earned_gross >= config.wage_ceiling {
        return Ok(EsiContribution::none());
    }
    Ok(EsiContribution {
        applicable: true,
        employee: percentage(earned_gross, config.employee_rate)?,
        employer: percentage(earned_gross, config.employer_rate)?,
    })
}

/// Computes the salary breakdown for one employee and month.
///
/// # Rules
///
/// - `earned_gross = gross * payable_days / days_in_month`
/// - `basic` and `da` are configured percentages of earned gross; `hra` is
///   the remainder, so the three add back to earned gross exactly
/// - `total_earnings = basic + da + hra + bonus + other_allowance + ot`
/// - EPF on `min(basic + da, ceiling)`, skipped when the profile opts out
/// - ESI on earned gross while under the ESI ceiling, skipped when the
///   profile opts out
/// - Professional tax from the configured slabs
/// - `net_salary = total_earnings - total_deduction`, never clamped
///
/// With zero payable days, professional tax and other deduction are charged
/// only when the zero-attendance policy says so.
///
/// # Errors
///
/// - `ShapeMismatch` if the aggregation was built for a different month length
/// - `DivisionByZero` if `days_in_month` is 0
/// - `Overflow` if an amount leaves the decimal range
pub fn compute_salary(
    profile: &EmployeeProfile,
    aggregation: &AggregationResult,
    days_in_month: u32,
    config: &EngineConfig,
) -> EngineResult<PayrollBreakdown> {
    if aggregation.total_days != days_in_month {
        return Err(EngineError::ShapeMismatch {
            expected: days_in_month as usize,
            actual: aggregation.total_days as usize,
        });
    }

    let earned_gross = divide(
        multiply(profile.gross, aggregation.payable_days)?,
        Decimal::from(days_in_month),
    )?;

    let split = config.salary_split();
    let basic = percentage(earned_gross, split.basic_percent)?;
    let da = percentage(earned_gross, split.da_percent)?;
    let hra = subtract(earned_gross, add(basic, da)?)?;

    let total_earnings = sum([
        basic,
        da,
        hra,
        profile.bonus,
        profile.other_allowance,
        profile.ot,
    ])?;

    let epf = if profile.epf_applicable {
        epf_contribution(basic, da, config.epf())?
    } else {
        EpfContribution {
            wage: Decimal::ZERO,
            employee: Decimal::ZERO,
            employer: Decimal::ZERO,
        }
    };

    let esi = if profile.esi_applicable {
        esi_contribution(earned_gross, config.esi())?
    } else {
        EsiContribution::none()
    };

    let fixed_deductions_apply =
        !aggregation.payable_days.is_zero() || config.zero_attendance().apply_fixed_deductions;
    let (prof_tax, other_deduction) = if fixed_deductions_apply {
        (
            config.professional_tax().lookup(earned_gross),
            profile.other_deduction,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let total_deduction = sum([epf.employee, esi.employee, prof_tax, other_deduction])?;
    let net_salary = subtract(total_earnings, total_deduction)?;

    debug!(
        emp_id = %profile.emp_id,
        payable_days = %aggregation.payable_days,
        earned_gross = %earned_gross,
        net_salary = %net_salary,
        "Computed salary"
    );

    Ok(PayrollBreakdown {
        earned_gross,
        basic,
        da,
        hra,
        bonus: profile.bonus,
        other_allowance: profile.other_allowance,
        ot: profile.ot,
        total_earnings,
        epf_wage: epf.wage,
        epf: epf.employee,
        esi_applicable: esi.applicable,
        esi: esi.employee,
        prof_tax,
        other_deduction,
        total_deduction,
        net_salary,
        employer_contributions: EmployerContributions {
            epf: epf.employer,
            esi: esi.employer,
        },
    })
}
