//! Payroll calculation functionality.
//!
//! This module computes the full payroll breakdown for one employee and one
//! period: income lines on realized hours, employee deductions on the
//! capped contribution base, and employer contributions on the
//! compensation basis.
//!
//! The two quantities are kept distinct throughout: wage components are
//! computed on realized pay, while employer-funded benefits are computed on
//! the contractual basis so overtime and surcharges never inflate them.
//! Conflating the two is the most common source of compliance error.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Bonus, ContributionCategory, ContributionLine, DeductionCategory, DeductionLine, Employee,
    IncomeCategory, IncomeLine, PayrollBreakdown, PeriodTotals,
};

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Applies a percentage to a base, rounded to two decimal places.
fn pct(base: Decimal, percentage: Decimal) -> Decimal {
    (base * percentage / ONE_HUNDRED).round_dp(2)
}

/// Calculates the full payroll breakdown for one employee and one period.
///
/// # Derivation
///
/// - The hourly rate comes from the normalized compensation basis: a daily
///   rate divides by the legal daily hours, a monthly salary by the
///   192-hour payroll month.
/// - Regular and overtime pay price the period's hour totals; the night
///   surcharge pays an extra fraction of the hourly rate for night hours
///   already priced under regular/overtime.
/// - The transport allowance is a flat amount, owed only while the
///   monthly-equivalent base is at or below the eligibility ceiling.
/// - Employee deductions (health, pension, solidarity above the threshold)
///   apply to the contribution base: realized income minus the non-wage
///   transport allowance, capped at the legal multiple of the minimum wage.
/// - Employer contributions apply to the monthly-equivalent basis, with
///   the ARL rate selected by the employee's risk class; severance
///   interest applies to the severance line itself.
///
/// The result is a pure function of its inputs: no identifiers, clocks or
/// ambient state are consulted, so identical inputs produce byte-identical
/// serialized output.
///
/// # Errors
///
/// - `InvalidEmployee` when no compensation basis can be resolved.
/// - `CalculationError` when the totals belong to a different employee.
///
/// # Examples
///
/// ```no_run
/// use nomina_engine::calculation::calculate_payroll;
/// use nomina_engine::config::RateTableLoader;
/// use nomina_engine::models::{
///     CompensationSpec, Employee, EmploymentStatus, PayrollPeriod, PeriodTotals, RiskClass,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = RateTableLoader::load("./config/colombia").unwrap();
/// let table = loader.table_for_year(2024).unwrap();
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Carlos Restrepo".to_string(),
///     position: "soldador".to_string(),
///     department: "estructuras".to_string(),
///     compensation: CompensationSpec::from_salary(Decimal::from_str("1920000").unwrap()),
///     risk_class: RiskClass::V,
///     status: EmploymentStatus::Active,
/// };
///
/// let period = PayrollPeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
/// };
/// let totals = PeriodTotals::new("emp_001", period);
///
/// let breakdown = calculate_payroll(&employee, &totals, &[], table).unwrap();
/// assert_eq!(breakdown.net_pay, breakdown.total_income - breakdown.total_deductions);
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    totals: &PeriodTotals,
    bonuses: &[Bonus],
    table: &RateTable,
) -> EngineResult<PayrollBreakdown> {
    if totals.employee_id != employee.id {
        return Err(EngineError::CalculationError {
            message: format!(
                "period totals belong to '{}', not '{}'",
                totals.employee_id, employee.id
            ),
        });
    }

    let basis = employee.compensation_basis()?;
    let hourly_rate = basis.hourly_rate(table.workday.legal_daily_hours);
    let monthly_equivalent = basis.monthly_equivalent();

    // Income lines on realized hours.
    let mut income = Vec::new();

    income.push(IncomeLine {
        category: IncomeCategory::Regular,
        hours: Some(totals.regular_hours),
        rate: Some(hourly_rate),
        amount: (hourly_rate * totals.regular_hours).round_dp(2),
    });

    if totals.overtime_hours > Decimal::ZERO {
        let overtime_rate = hourly_rate * table.workday.overtime_multiplier;
        income.push(IncomeLine {
            category: IncomeCategory::Overtime,
            hours: Some(totals.overtime_hours),
            rate: Some(overtime_rate),
            amount: (overtime_rate * totals.overtime_hours).round_dp(2),
        });
    }

    if totals.night_hours > Decimal::ZERO {
        let surcharge_rate = hourly_rate * table.workday.night_surcharge;
        income.push(IncomeLine {
            category: IncomeCategory::NightSurcharge,
            hours: Some(totals.night_hours),
            rate: Some(surcharge_rate),
            amount: (surcharge_rate * totals.night_hours).round_dp(2),
        });
    }

    let transport_eligible = monthly_equivalent <= table.transport_ceiling();
    if transport_eligible {
        income.push(IncomeLine {
            category: IncomeCategory::TransportAllowance,
            hours: None,
            rate: None,
            amount: table.transport_allowance.amount,
        });
    }

    for bonus in bonuses {
        income.push(IncomeLine {
            category: IncomeCategory::Bonus,
            hours: None,
            rate: None,
            amount: bonus.amount,
        });
    }

    let total_income: Decimal = income.iter().map(|l| l.amount).sum();

    // Employee deductions on the capped contribution base. The transport
    // allowance is non-wage and never contributes.
    let transport_amount = if transport_eligible {
        table.transport_allowance.amount
    } else {
        Decimal::ZERO
    };
    let contribution_base = (total_income - transport_amount)
        .max(Decimal::ZERO)
        .min(table.contribution_base_cap());

    let deduction_rates = &table.employee_deductions;
    let mut deductions = vec![
        DeductionLine {
            category: DeductionCategory::Health,
            base: contribution_base,
            percentage: deduction_rates.health_pct,
            amount: pct(contribution_base, deduction_rates.health_pct),
        },
        DeductionLine {
            category: DeductionCategory::Pension,
            base: contribution_base,
            percentage: deduction_rates.pension_pct,
            amount: pct(contribution_base, deduction_rates.pension_pct),
        },
    ];

    if monthly_equivalent > table.solidarity_threshold() {
        deductions.push(DeductionLine {
            category: DeductionCategory::Solidarity,
            base: contribution_base,
            percentage: deduction_rates.solidarity_pct,
            amount: pct(contribution_base, deduction_rates.solidarity_pct),
        });
    }

    let total_deductions: Decimal = deductions.iter().map(|l| l.amount).sum();

    // Employer contributions on the compensation basis, never on realized
    // pay.
    let rates = &table.employer_contributions;
    let severance_amount = pct(monthly_equivalent, rates.severance_pct);
    let arl_pct = rates.arl.rate_for(employee.risk_class);

    let contributions = vec![
        ContributionLine {
            category: ContributionCategory::Health,
            base: monthly_equivalent,
            percentage: rates.health_pct,
            amount: pct(monthly_equivalent, rates.health_pct),
        },
        ContributionLine {
            category: ContributionCategory::Pension,
            base: monthly_equivalent,
            percentage: rates.pension_pct,
            amount: pct(monthly_equivalent, rates.pension_pct),
        },
        ContributionLine {
            category: ContributionCategory::Arl,
            base: monthly_equivalent,
            percentage: arl_pct,
            amount: pct(monthly_equivalent, arl_pct),
        },
        ContributionLine {
            category: ContributionCategory::Severance,
            base: monthly_equivalent,
            percentage: rates.severance_pct,
            amount: severance_amount,
        },
        ContributionLine {
            category: ContributionCategory::SeveranceInterest,
            base: severance_amount,
            percentage: rates.severance_interest_pct,
            amount: pct(severance_amount, rates.severance_interest_pct),
        },
        ContributionLine {
            category: ContributionCategory::ServiceBonus,
            base: monthly_equivalent,
            percentage: rates.service_bonus_pct,
            amount: pct(monthly_equivalent, rates.service_bonus_pct),
        },
        ContributionLine {
            category: ContributionCategory::Vacation,
            base: monthly_equivalent,
            percentage: rates.vacation_pct,
            amount: pct(monthly_equivalent, rates.vacation_pct),
        },
        ContributionLine {
            category: ContributionCategory::Sena,
            base: monthly_equivalent,
            percentage: rates.parafiscales.sena_pct,
            amount: pct(monthly_equivalent, rates.parafiscales.sena_pct),
        },
        ContributionLine {
            category: ContributionCategory::Icbf,
            base: monthly_equivalent,
            percentage: rates.parafiscales.icbf_pct,
            amount: pct(monthly_equivalent, rates.parafiscales.icbf_pct),
        },
        ContributionLine {
            category: ContributionCategory::CompensationFund,
            base: monthly_equivalent,
            percentage: rates.parafiscales.compensation_fund_pct,
            amount: pct(monthly_equivalent, rates.parafiscales.compensation_fund_pct),
        },
    ];

    let total_contributions: Decimal = contributions.iter().map(|l| l.amount).sum();

    Ok(PayrollBreakdown {
        employee_id: employee.id.clone(),
        period: totals.period,
        basis,
        hourly_rate,
        income,
        total_income,
        deductions,
        total_deductions,
        contributions,
        total_contributions,
        net_pay: total_income - total_deductions,
        employer_total_cost: total_income + total_contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::table_2024;
    use crate::models::{CompensationSpec, EmploymentStatus, PayrollPeriod, RiskClass};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march_period() -> PayrollPeriod {
        PayrollPeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    fn welder(compensation: CompensationSpec) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Carlos Restrepo".to_string(),
            position: "soldador".to_string(),
            department: "estructuras".to_string(),
            compensation,
            risk_class: RiskClass::V,
            status: EmploymentStatus::Active,
        }
    }

    fn totals(regular: &str, overtime: &str, night: &str) -> PeriodTotals {
        let mut t = PeriodTotals::new("emp_001", march_period());
        t.regular_hours = dec(regular);
        t.overtime_hours = dec(overtime);
        t.night_hours = dec(night);
        t.elapsed_hours = dec(regular) + dec(overtime);
        t.days_worked = 10;
        t
    }

    // ==========================================================================
    // Ten plain days on a 1,920,000 salary: hourly 10,000, transport owed.
    // ==========================================================================
    #[test]
    fn test_plain_period_on_monthly_salary() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        assert_eq!(breakdown.hourly_rate, dec("10000"));
        assert_eq!(
            breakdown.income_amount(IncomeCategory::Regular),
            dec("730000")
        );
        assert_eq!(breakdown.transport_allowance(), dec("162000"));
        assert_eq!(breakdown.total_income, dec("892000"));

        // Deductions apply to income minus the non-wage transport allowance.
        let health = breakdown.deduction(DeductionCategory::Health).unwrap();
        assert_eq!(health.base, dec("730000"));
        assert_eq!(health.amount, dec("29200"));
        let pension = breakdown.deduction(DeductionCategory::Pension).unwrap();
        assert_eq!(pension.amount, dec("29200"));
        assert!(breakdown.deduction(DeductionCategory::Solidarity).is_none());

        assert_eq!(breakdown.total_deductions, dec("58400"));
        assert_eq!(breakdown.net_pay, dec("833600"));
    }

    #[test]
    fn test_employer_contributions_computed_on_basis() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        let check = |category, expected: &str| {
            let line = breakdown.contribution(category).unwrap();
            assert_eq!(line.amount, dec(expected), "{:?}", category);
        };

        check(ContributionCategory::Health, "163200");
        check(ContributionCategory::Pension, "230400");
        // Risk class V welder: 6.96%.
        check(ContributionCategory::Arl, "133632");
        check(ContributionCategory::Severance, "159936");
        check(ContributionCategory::SeveranceInterest, "1599.36");
        check(ContributionCategory::ServiceBonus, "159936");
        check(ContributionCategory::Vacation, "80064");
        check(ContributionCategory::Sena, "38400");
        check(ContributionCategory::Icbf, "57600");
        check(ContributionCategory::CompensationFund, "76800");

        assert_eq!(breakdown.total_contributions, dec("1101567.36"));
        assert_eq!(breakdown.employer_total_cost, dec("1993567.36"));
    }

    #[test]
    fn test_overtime_and_night_pay_on_realized_hours() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "1.7", "7"), &[], &table).unwrap();

        // 10,000 x 1.7 x 1.25
        assert_eq!(
            breakdown.income_amount(IncomeCategory::Overtime),
            dec("21250")
        );
        // 10,000 x 7 x 0.35, layered on hours already paid above.
        assert_eq!(
            breakdown.income_amount(IncomeCategory::NightSurcharge),
            dec("24500")
        );
    }

    #[test]
    fn test_overtime_never_inflates_employer_contributions() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));

        let plain = calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();
        let heavy =
            calculate_payroll(&employee, &totals("73", "20", "30"), &[], &table).unwrap();

        assert!(heavy.total_income > plain.total_income);
        assert_eq!(heavy.contributions, plain.contributions);
    }

    #[test]
    fn test_daily_rate_basis() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_daily_rate(dec("73000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        assert_eq!(breakdown.hourly_rate, dec("10000"));
        // Monthly equivalent 2,190,000 is under the 2,600,000 ceiling.
        assert_eq!(breakdown.transport_allowance(), dec("162000"));
        let health = breakdown.contribution(ContributionCategory::Health).unwrap();
        assert_eq!(health.base, dec("2190000"));
    }

    #[test]
    fn test_high_earner_loses_transport_and_owes_solidarity() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("6000000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        assert_eq!(breakdown.transport_allowance(), dec("0"));

        // 6,000,000 exceeds 4x the 1,300,000 minimum wage.
        let solidarity = breakdown.deduction(DeductionCategory::Solidarity).unwrap();
        assert_eq!(solidarity.percentage, dec("1"));
        assert_eq!(solidarity.base, breakdown.total_income);
    }

    #[test]
    fn test_salary_at_threshold_owes_no_solidarity() {
        let table = table_2024();
        // Exactly 4x minimum wage: the levy starts strictly above.
        let employee = welder(CompensationSpec::from_salary(dec("5200000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        assert!(breakdown.deduction(DeductionCategory::Solidarity).is_none());
    }

    #[test]
    fn test_bonuses_pass_through_unchanged() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));
        let bonuses = vec![Bonus {
            description: "altura".to_string(),
            amount: dec("150000"),
        }];

        let with_bonus =
            calculate_payroll(&employee, &totals("73", "0", "0"), &bonuses, &table).unwrap();
        let without =
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table).unwrap();

        assert_eq!(
            with_bonus.income_amount(IncomeCategory::Bonus),
            dec("150000")
        );
        assert_eq!(
            with_bonus.total_income,
            without.total_income + dec("150000")
        );
    }

    #[test]
    fn test_contribution_base_is_capped() {
        let table = table_2024();
        // 40,000,000 monthly: the deduction base caps at 25 minimum wages.
        let employee = welder(CompensationSpec::from_salary(dec("40000000")));
        let mut t = totals("192", "0", "0");
        t.elapsed_hours = dec("192");

        let breakdown = calculate_payroll(&employee, &t, &[], &table).unwrap();

        let health = breakdown.deduction(DeductionCategory::Health).unwrap();
        assert_eq!(health.base, dec("32500000"));
    }

    #[test]
    fn test_identical_inputs_produce_identical_output() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));

        let first = calculate_payroll(&employee, &totals("73", "1.7", "7"), &[], &table).unwrap();
        let second = calculate_payroll(&employee, &totals("73", "1.7", "7"), &[], &table).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_employer_total_cost_covers_income() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_daily_rate(dec("60000")));

        let breakdown =
            calculate_payroll(&employee, &totals("36.5", "4", "12"), &[], &table).unwrap();

        assert!(breakdown.employer_total_cost >= breakdown.total_income);
        assert_eq!(
            breakdown.employer_total_cost,
            breakdown.total_income + breakdown.total_contributions
        );
    }

    #[test]
    fn test_net_pay_reconstructs_from_lines() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("2500000")));

        let breakdown =
            calculate_payroll(&employee, &totals("73", "5.5", "14"), &[], &table).unwrap();

        let income: Decimal = breakdown.income.iter().map(|l| l.amount).sum();
        let deductions: Decimal = breakdown.deductions.iter().map(|l| l.amount).sum();
        assert_eq!(breakdown.net_pay, income - deductions);
    }

    #[test]
    fn test_mismatched_totals_are_rejected() {
        let table = table_2024();
        let employee = welder(CompensationSpec::from_salary(dec("1920000")));
        let mut t = totals("73", "0", "0");
        t.employee_id = "emp_999".to_string();

        match calculate_payroll(&employee, &t, &[], &table) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("emp_999"));
            }
            other => panic!("Expected CalculationError, got {:?}", other.map(|b| b.net_pay)),
        }
    }

    #[test]
    fn test_employee_without_compensation_fails() {
        let table = table_2024();
        let employee = welder(CompensationSpec {
            salary_base: None,
            daily_rate: None,
            monthly_salary: None,
            hourly_rate: None,
        });

        assert!(matches!(
            calculate_payroll(&employee, &totals("73", "0", "0"), &[], &table),
            Err(EngineError::InvalidEmployee { .. })
        ));
    }
}
