//! Interactive questions for values not given on the command line.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use tax_core::FilingStatus;
use tracing::debug;

use crate::utils::parse_amount;

/// Asks questions on `output` and reads one answer per line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    /// Asks for the year's total income.
    pub fn income(&mut self) -> Result<Decimal> {
        let answer = self.ask("Enter total income for the year (e.g. 50,000.00): ")?;
        Ok(parse_amount("income", &answer)?)
    }

    /// Shows the filing status menu and reads the choice.
    ///
    /// Accepts the menu number or the short code (`S`, `MFJ`, `MFS`, `HOH`).
    pub fn filing_status(&mut self) -> Result<FilingStatus> {
        writeln!(self.output, "Filing status:")?;
        for status in FilingStatus::ALL {
            writeln!(
                self.output,
                "  {}) {} ({})",
                status.ordinal(),
                status.label(),
                status.as_str()
            )?;
        }
        let answer = self.ask("Enter filing status [1-4]: ")?;
        Ok(answer.parse::<FilingStatus>()?)
    }

    fn ask(
        &mut self,
        question: &str,
    ) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            )
            .into());
        }
        let answer = line.trim().to_string();
        debug!(question, answer = %answer, "prompt answered");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::io::Cursor;
    use tax_core::ValidationError;

    use crate::utils::InputError;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_income_with_thousands_separator() {
        let mut p = prompter("85,000.50\n");

        assert_eq!(p.income().unwrap(), dec!(85000.50));
        assert_eq!(
            String::from_utf8(p.output).unwrap(),
            "Enter total income for the year (e.g. 50,000.00): "
        );
    }

    #[test]
    fn test_income_not_a_number() {
        let mut p = prompter("lots\n");

        let err = p.income().unwrap_err();

        assert!(err.downcast_ref::<InputError>().is_some());
    }

    #[test]
    fn test_filing_status_menu_and_choice() {
        let mut p = prompter("2\n");

        assert_eq!(p.filing_status().unwrap(), FilingStatus::MarriedFilingJointly);

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("  1) Single (S)\n"));
        assert!(shown.contains("  4) Head of Household (HOH)\n"));
    }

    #[test]
    fn test_filing_status_by_code() {
        let mut p = prompter("hoh\n");

        assert_eq!(p.filing_status().unwrap(), FilingStatus::HeadOfHousehold);
    }

    #[test]
    fn test_filing_status_out_of_range() {
        let mut p = prompter("7\n");

        let err = p.filing_status().unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidFilingStatus("7".to_string()))
        );
    }

    #[test]
    fn test_closed_input_is_io_error() {
        let mut p = prompter("");

        let err = p.income().unwrap_err();

        assert_eq!(
            err.downcast_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::UnexpectedEof)
        );
    }
}
