//! Common validation utilities.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Maximum length of a currency symbol in characters.
const MAX_CURRENCY_SYMBOL_CHARS: usize = 8;

/// Validates a group currency symbol: non-empty, at most 8 characters,
/// no whitespace.
pub fn validate_currency_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.is_empty() {
        let mut err = ValidationError::new("currency_symbol_empty");
        err.message = Some("Currency symbol must not be empty".into());
        return Err(err);
    }
    if symbol.chars().count() > MAX_CURRENCY_SYMBOL_CHARS {
        let mut err = ValidationError::new("currency_symbol_length");
        err.message = Some("Currency symbol must be at most 8 characters".into());
        return Err(err);
    }
    if symbol.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("currency_symbol_whitespace");
        err.message = Some("Currency symbol must not contain whitespace".into());
        return Err(err);
    }
    Ok(())
}

/// Validates an invite expiry: when given, it must lie in the future.
pub fn validate_valid_until(valid_until: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *valid_until > Utc::now() {
        Ok(())
    } else {
        let mut err = ValidationError::new("valid_until_past");
        err.message = Some("Expiry must lie in the future".into());
        Err(err)
    }
}
