use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when user input cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no {field} entered")]
    Empty { field: &'static str },

    #[error("invalid {field} '{input}': {source}")]
    InvalidDecimal {
        field: &'static str,
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes input for decimal parsing: trims whitespace, a leading `$`,
/// and commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .replace(',', "")
}

/// Parses a user-entered amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an optional
/// leading `$`. Unlike table values, empty input is an error rather than zero.
pub fn parse_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, InputError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(InputError::Empty { field });
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        InputError::InvalidDecimal {
            field,
            input: s.trim().to_string(),
            source: e,
        }
    })
}
