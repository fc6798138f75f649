// Validation utilities module
// Custom checks for the rules the validator derive cannot express

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Maximum number of fractional digits accepted in a price
pub const PRICE_MAX_DECIMALS: u32 = 2;

pub const PRICE_NOT_POSITIVE_MESSAGE: &str = "El precio debe ser mayor a 0.";
pub const PRICE_TOO_PRECISE_MESSAGE: &str = "El precio solo puede tener hasta dos decimales.";
pub const PRICE_TOO_LARGE_MESSAGE: &str = "El precio no puede superar 9999999999.99.";

/// Largest price the `NUMERIC(12, 2)` column can hold
pub const PRICE_MAX: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validates that a required text field is not empty or whitespace only
pub fn validate_not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error_with_message("required", message))
    } else {
        Ok(())
    }
}

/// Validates that price is strictly positive
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        Err(error_with_message("price_must_be_positive", PRICE_NOT_POSITIVE_MESSAGE))
    } else {
        Ok(())
    }
}

/// Validates that price fits the stored precision
pub fn validate_price_range(price: &Decimal) -> Result<(), ValidationError> {
    if *price > PRICE_MAX {
        Err(error_with_message("price_too_large", PRICE_TOO_LARGE_MESSAGE))
    } else {
        Ok(())
    }
}

/// Validates that price has at most two significant fractional digits
/// Trailing zeros are ignored, so 10.100 passes and 10.123 does not
pub fn validate_price_scale(price: &Decimal) -> Result<(), ValidationError> {
    if price.round_dp(PRICE_MAX_DECIMALS) != *price {
        Err(error_with_message("price_too_precise", PRICE_TOO_PRECISE_MESSAGE))
    } else {
        Ok(())
    }
}

/// Picks a single human-readable reason out of a derive validation result
///
/// Fields are visited in name order so the reported reason is stable when
/// several fields fail at once.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields
        .into_iter()
        .filter_map(|field| field_errors.get(field).and_then(|errs| errs.first()))
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Valor inválido: {}", err.code),
        })
        .next()
        .unwrap_or_else(|| "Datos inválidos.".to_string())
}
