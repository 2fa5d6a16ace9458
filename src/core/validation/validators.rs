//! Reusable field validators
//!
//! These are plugged into `#[validate(custom(function = ...))]` attributes on
//! entities, patches and request payloads.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validator: decimal must be zero or positive
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(error("non_negative", "must not be negative"))
    } else {
        Ok(())
    }
}

/// Validator: string must contain at least one non-whitespace character
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("not_blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// Validator: an optional lower bound must not exceed an optional upper bound
pub fn ordered_bounds(
    min: Option<&Decimal>,
    max: Option<&Decimal>,
) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(error(
            "ordered_bounds",
            "minimum cost must not exceed maximum cost",
        )),
        _ => Ok(()),
    }
}
