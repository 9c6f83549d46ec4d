//! Text report of a [`TaxSummary`].
//!
//! All values are rounded half-up to two places here and nowhere else.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::{
    TaxSummary,
    calculations::{BracketSlice, DeductionKind, common::round_half_up},
};

/// Formats a [`TaxSummary`] for the terminal.
pub struct TaxReport<'a> {
    summary: &'a TaxSummary,
    breakdown: bool,
}

impl<'a> TaxReport<'a> {
    pub fn new(summary: &'a TaxSummary) -> Self {
        Self {
            summary,
            breakdown: false,
        }
    }

    /// Also show intermediate values and the per-bracket slices.
    pub fn with_breakdown(
        mut self,
        breakdown: bool,
    ) -> Self {
        self.breakdown = breakdown;
        self
    }

    fn write_breakdown(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.summary;
        let deduction = match s.taxable.deduction_kind {
            DeductionKind::Standard => "Standard Deduction",
            DeductionKind::Itemized => "Itemized Deductions",
        };

        line(f, "Filing Status", s.input.filing_status.label())?;
        amount(f, "Total Income", s.input.total_income)?;
        amount(
            f,
            "Above-the-Line Deductions",
            s.input.total_income - s.adjusted_gross_income,
        )?;
        amount(f, "Adjusted Gross Income", s.adjusted_gross_income)?;
        amount(f, deduction, s.taxable.deduction_used)?;
        amount(f, "Taxable Income", s.taxable.taxable_income)?;
        writeln!(f)?;

        writeln!(f, "Federal Brackets:")?;
        for slice in &s.federal.slices {
            bracket(f, slice)?;
        }
        if !s.federal.untaxed_income.is_zero() {
            amount(f, "Income Above Last Bracket", s.federal.untaxed_income)?;
        }
        amount(f, "Tax Before Credits", s.federal.tax_before_credits)?;
        amount(f, "Credits", s.federal.credits)?;
        amount(f, "Federal Income Tax", s.federal.federal_income_tax)?;
        writeln!(f)?;

        amount(f, "Social Security Tax", s.fica.social_security)?;
        amount(f, "Medicare Tax", s.fica.medicare)?;
        amount(f, "Medicare Surtax", s.fica.medicare_surtax)?;
        amount(f, "Total FICA", s.fica.total)?;
        writeln!(f)?;

        amount(f, "State Taxable Income", s.state.state_taxable_income)?;
        line(f, "Effective Tax Rate", &percent(s.effective_rate))?;
        writeln!(f)
    }
}

impl fmt::Display for TaxReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.breakdown {
            self.write_breakdown(f)?;
        }

        let s = self.summary;
        writeln!(f, "Total Federal Tax Owed: {}", money(s.federal_total))?;
        writeln!(f, "Total State Tax Owed: {}", money(s.state.state_tax))?;
        writeln!(f, "Total Tax Owed: {}", money(s.total_tax))?;
        writeln!(f)?;
        writeln!(f, "Take Home Pay: {}", money(s.take_home_pay))
    }
}

/// Two-place display of a money value, e.g. `18000.00`.
fn money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "{:<28}{:>16}", format!("{label}:"), value)
}

fn amount(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Decimal,
) -> fmt::Result {
    line(f, label, &money(value))
}

fn bracket(
    f: &mut fmt::Formatter<'_>,
    slice: &BracketSlice,
) -> fmt::Result {
    let span = match slice.upper {
        Some(upper) => format!("{} - {}", money(slice.lower), money(upper)),
        None => format!("{} and up", money(slice.lower)),
    };
    writeln!(
        f,
        "  {:>7} on {}: {} -> {}",
        percent(slice.rate),
        span,
        money(slice.taxed_amount),
        money(slice.tax)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{
        FilingStatus, TaxCalculator, TaxInput,
        calculations::{CalculationPolicy, TopBracketPolicy},
    };
    use tax_data::TaxTablesLoader;

    fn summary(
        income: Decimal,
        status: FilingStatus,
        policy: CalculationPolicy,
    ) -> TaxSummary {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../csv_files");
        let tables = TaxTablesLoader::load_from_dir(dir).unwrap();
        TaxCalculator::new(&tables, policy)
            .calculate(&TaxInput {
                total_income: income,
                filing_status: status,
            })
            .unwrap()
    }

    #[test]
    fn test_totals_only() {
        let s = summary(dec!(100000), FilingStatus::Single, CalculationPolicy::default());

        assert_eq!(
            TaxReport::new(&s).to_string(),
            "Total Federal Tax Owed: 16624.00\n\
             Total State Tax Owed: 3900.00\n\
             Total Tax Owed: 20524.00\n\
             \n\
             Take Home Pay: 79476.00\n"
        );
    }

    #[test]
    fn test_rounds_for_display_only() {
        let s = summary(
            dec!(1200000),
            FilingStatus::MarriedFilingJointly,
            CalculationPolicy::default(),
        );

        let report = TaxReport::new(&s).to_string();

        assert_eq!(s.federal.federal_income_tax, dec!(383480.25));
        assert!(report.contains("Total Tax Owed: 479248.45\n"));
        assert!(report.contains("Take Home Pay: 720751.55\n"));
    }

    #[test]
    fn test_breakdown_shows_slices_and_rate() {
        let s = summary(dec!(100000), FilingStatus::Single, CalculationPolicy::default());

        let report = TaxReport::new(&s).with_breakdown(true).to_string();

        assert!(report.contains("Adjusted Gross Income:"));
        assert!(report.contains("   10.00% on 0.00 - 11925.00: 11925.00 -> 1192.50\n"));
        assert!(report.contains("   22.00% on 48475.00 - 103350.00: 24525.00 -> 5395.50\n"));
        assert!(report.contains("20.52%"));
        assert!(!report.contains("Income Above Last Bracket"));
        assert!(report.ends_with("Take Home Pay: 79476.00\n"));
    }

    #[test]
    fn test_breakdown_open_ended_and_capped() {
        let unbounded = summary(
            dec!(1200000),
            FilingStatus::MarriedFilingJointly,
            CalculationPolicy::default(),
        );
        let capped = summary(
            dec!(1200000),
            FilingStatus::MarriedFilingJointly,
            CalculationPolicy {
                top_bracket: TopBracketPolicy::Capped,
                ..CalculationPolicy::default()
            },
        );

        let unbounded = TaxReport::new(&unbounded).with_breakdown(true).to_string();
        let capped = TaxReport::new(&capped).with_breakdown(true).to_string();

        assert!(unbounded.contains("   37.00% on 1000000.00 and up: 158000.00 -> 58460.00\n"));
        assert!(!capped.contains("and up"));
        assert!(capped.contains("Income Above Last Bracket:"));
        assert!(capped.contains("158000.00"));
    }
}
