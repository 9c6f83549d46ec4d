//! The full take-home pay calculation.
//!
//! # Pipeline
//!
//! | Step | Value                                                    |
//! |------|----------------------------------------------------------|
//! | 1    | AGI = total income - above-the-line deductions           |
//! | 2    | Taxable income = AGI - max(standard, itemized)           |
//! | 3    | Federal income tax = bracket tax - credits               |
//! | 4    | FICA = Social Security + Medicare + Medicare surtax      |
//! | 5    | Federal total = Line 3 + Line 4                          |
//! | 6    | State tax = (AGI - personal exemption) * flat rate       |
//! | 7    | Total tax = Line 5 + Line 6                              |
//! | 8    | Take-home pay = total income - Line 7                    |
//!
//! FICA (step 4) works from gross income and does not depend on steps 1-3.
//! No value is rounded or clamped along the way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::agi::adjusted_gross_income;
use crate::calculations::federal::{FederalTaxEngine, FederalTaxResult, TopBracketPolicy};
use crate::calculations::fica::{FicaEngine, FicaResult};
use crate::calculations::state::{StateTaxResult, state_tax};
use crate::calculations::taxable_income::{TaxableIncome, taxable_income};
use crate::{FilingStatus, SurtaxPolicy, TaxError, TaxTables, ValidationError};

/// Per-run input collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub total_income: Decimal,
    pub filing_status: FilingStatus,
}

/// Choices for the two places where the table data can be read more than one way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationPolicy {
    pub surtax: SurtaxPolicy,
    pub top_bracket: TopBracketPolicy,
}

/// Everything the pipeline computed, from AGI to take-home pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub input: TaxInput,
    pub adjusted_gross_income: Decimal,
    pub taxable: TaxableIncome,
    pub federal: FederalTaxResult,
    pub fica: FicaResult,
    pub state: StateTaxResult,
    /// Federal income tax plus FICA.
    pub federal_total: Decimal,
    pub total_tax: Decimal,
    pub take_home_pay: Decimal,
    /// Total tax as a fraction of total income; zero when income is zero.
    pub effective_rate: Decimal,
}

/// Runs the pipeline against one set of tables.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    tables: &'a TaxTables,
    policy: CalculationPolicy,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(
        tables: &'a TaxTables,
        policy: CalculationPolicy,
    ) -> Self {
        Self { tables, policy }
    }

    /// Calculates federal, FICA, and state tax and the resulting take-home pay.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NegativeIncome`] if total income is below zero
    /// - [`crate::ConfigError::MissingKey`] if the surtax table has no
    ///   threshold for the filing status
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> Result<TaxSummary, TaxError> {
        if input.total_income < Decimal::ZERO {
            return Err(ValidationError::NegativeIncome(input.total_income).into());
        }

        let tables = self.tables;
        let status = input.filing_status;

        let agi = adjusted_gross_income(input.total_income, &tables.above_the_line_deductions);
        debug!(agi = %agi, "adjusted gross income calculated");

        let standard_deduction = tables.standard_deductions.amount_for(status);
        let taxable = taxable_income(agi, standard_deduction, &tables.itemized_deductions);
        debug!(
            deduction_kind = ?taxable.deduction_kind,
            deduction_used = %taxable.deduction_used,
            taxable_income = %taxable.taxable_income,
            "taxable income calculated"
        );

        let federal = FederalTaxEngine::new(&tables.federal_brackets, self.policy.top_bracket)
            .calculate(taxable.taxable_income, &tables.credits);

        let fica = FicaEngine::new(
            &tables.fica_rates,
            &tables.surtax_thresholds,
            tables.ss_wage_base,
            self.policy.surtax,
        )
        .calculate(input.total_income, status)?;

        let state = state_tax(agi, &tables.state_tax);
        debug!(state_tax = %state.state_tax, "state tax calculated");

        let federal_total = federal.federal_income_tax + fica.total;
        let total_tax = federal_total + state.state_tax;
        let take_home_pay = input.total_income - total_tax;
        let effective_rate = if input.total_income.is_zero() {
            Decimal::ZERO
        } else {
            total_tax / input.total_income
        };

        debug!(
            total_tax = %total_tax,
            take_home_pay = %take_home_pay,
            "take-home pay calculated"
        );

        Ok(TaxSummary {
            input: *input,
            adjusted_gross_income: agi,
            taxable,
            federal,
            fica,
            state,
            federal_total,
            total_tax,
            take_home_pay,
            effective_rate,
        })
    }
}
