use paint_core::{BuildingCondition, Scope};
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned for an unrecognized enum keyword.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} '{input}', expected one of: {expected}")]
pub struct ParseChoiceError {
    kind: &'static str,
    input: String,
    expected: &'static str,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a building condition keyword, case-insensitively.
pub fn parse_condition(s: &str) -> Result<BuildingCondition, ParseChoiceError> {
    BuildingCondition::parse(&s.trim().to_ascii_uppercase()).ok_or_else(|| ParseChoiceError {
        kind: "condition",
        input: s.to_string(),
        expected: "new, old",
    })
}

/// Parses a scope keyword, case-insensitively.
pub fn parse_scope(s: &str) -> Result<Scope, ParseChoiceError> {
    Scope::parse(&s.trim().to_ascii_uppercase()).ok_or_else(|| ParseChoiceError {
        kind: "scope",
        input: s.to_string(),
        expected: "interior, exterior, both",
    })
}
