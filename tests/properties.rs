//! Property-based tests for the payroll engine.
//!
//! Covers the invariants that must hold for any month and any mix of
//! attendance codes:
//! 1. Every day lands in exactly one bucket or is unmarked
//! 2. Payable days never exceed the month
//! 3. Marking an absence as worked never lowers payable days
//! 4. The salary split always sums to earned gross
//! 5. Computation is deterministic
//! 6. Money rounding is idempotent and bounded

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::decimal::{round_money, sum};
use payroll_engine::calculation::{aggregate, classify, compute_payroll};
use payroll_engine::config::{AttendancePolicy, EngineConfig};
use payroll_engine::models::{AttendanceCode, EmployeeProfile, MonthContext};

fn month_strategy() -> impl Strategy<Value = MonthContext> {
    (2000i32..2100, 1u32..=12).prop_map(|(year, month)| MonthContext::new(year, month).unwrap())
}

fn code_strategy() -> impl Strategy<Value = AttendanceCode> {
    prop::sample::select(AttendanceCode::ALL.to_vec())
}

/// A month together with one code per day.
fn month_with_codes() -> impl Strategy<Value = (MonthContext, Vec<AttendanceCode>)> {
    month_strategy().prop_flat_map(|month| {
        let days = month.days_in_month() as usize;
        (Just(month), prop::collection::vec(code_strategy(), days))
    })
}

fn money_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn opening_cl_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=40).prop_map(|halves| Decimal::new(halves * 5, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_every_day_is_accounted_once(
        (month, codes) in month_with_codes(),
        opening_cl in opening_cl_strategy(),
    ) {
        let days = month.days_in_month();
        let result = aggregate(&codes, opening_cl, days, &AttendancePolicy::default()).unwrap();

        let accounted = result.accounted_days() + Decimal::from(result.unmarked_days);
        prop_assert_eq!(accounted, Decimal::from(days));
        prop_assert!(result.payable_days <= Decimal::from(days));
        prop_assert!(result.payable_days >= Decimal::ZERO);
        prop_assert!(result.casual_leave <= result.opening_cl);
        prop_assert_eq!(result.closing_cl, result.opening_cl - result.casual_leave_taken);
    }

    #[test]
    fn prop_marking_absence_worked_never_lowers_payable(
        (month, codes) in month_with_codes(),
        replacement in prop::sample::select(vec![
            AttendanceCode::Present,
            AttendanceCode::PaidHoliday,
            AttendanceCode::WeekOff,
            AttendanceCode::OnDuty,
        ]),
        opening_cl in opening_cl_strategy(),
    ) {
        let days = month.days_in_month();
        let policy = AttendancePolicy::default();
        let before = aggregate(&codes, opening_cl, days, &policy).unwrap();

        let improved: Vec<AttendanceCode> = codes
            .iter()
            .map(|&code| if code == AttendanceCode::Absent { replacement } else { code })
            .collect();
        let after = aggregate(&improved, opening_cl, days, &policy).unwrap();

        prop_assert!(after.payable_days >= before.payable_days);
    }

    #[test]
    fn prop_salary_split_sums_to_earned_gross(
        (month, codes) in month_with_codes(),
        gross in money_strategy(),
        bonus in money_strategy(),
    ) {
        let mut profile = EmployeeProfile::new("E001", "Property", gross);
        profile.bonus = bonus;
        let record = compute_payroll(profile, codes, &month, &EngineConfig::default()).unwrap();
        let b = &record.breakdown;

        prop_assert_eq!(sum([b.basic, b.da, b.hra]).unwrap(), b.earned_gross);
        prop_assert!(b.earned_gross <= gross);
        prop_assert_eq!(b.net_salary, b.total_earnings - b.total_deduction);
        prop_assert!(b.epf_wage <= EngineConfig::default().epf().wage_ceiling);
        for amount in [b.earned_gross, b.basic, b.da, b.hra, b.epf, b.esi, b.net_salary] {
            prop_assert_eq!(amount, round_money(amount));
        }
    }

    #[test]
    fn prop_compute_is_deterministic(
        (month, codes) in month_with_codes(),
        gross in money_strategy(),
    ) {
        let config = EngineConfig::default();
        let profile = EmployeeProfile::new("E001", "Property", gross);

        let first = compute_payroll(profile.clone(), codes.clone(), &month, &config).unwrap();
        let second = compute_payroll(profile, codes, &month, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_round_money_is_idempotent_and_close(
        units in -1_000_000_000i64..1_000_000_000,
        scale in 0u32..8,
    ) {
        let value = Decimal::new(units, scale);
        let rounded = round_money(value);

        prop_assert_eq!(round_money(rounded), rounded);
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn prop_classify_ignores_surrounding_whitespace(
        code in code_strategy(),
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let padded = format!("{}{}{}", left, code.token(), right);
        prop_assert_eq!(classify(&padded), code);
    }
}
