//! CLI error types and input parsing.

use thiserror::Error;

/// Errors raised by the CLI layer itself (the codec below is total and
/// never fails).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// The word argument was not a 32-bit value.
    #[error("invalid command word '{0}': expected a 32-bit value like 0x10701A01")]
    InvalidWord(String),
}

/// Parse a command word given as hex (`0x...`) or decimal; underscores
/// are allowed as digit separators.
pub fn parse_word(input: &str) -> Result<u32, CliError> {
    let cleaned = input.trim().replace('_', "");
    let parsed = match cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => cleaned.parse(),
    };
    parsed.map_err(|_| CliError::InvalidWord(input.to_string()))
}
