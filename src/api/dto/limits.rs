//! Upper bounds matching the column types in `migrations/`.
//!
//! Used as `custom` validators so the lower-bound messages stay separate.

use std::borrow::Cow;

use validator::ValidationError;

/// `VARCHAR(255)` columns.
pub const TEXT_MAX_CHARS: usize = 255;
/// `VARCHAR(360)` email columns.
pub const EMAIL_MAX_CHARS: usize = 360;
/// Largest value of a `NUMERIC(10, 2)` price.
pub const PRICE_MAX: f64 = 99_999_999.99;

pub fn fits_text(value: &str) -> Result<(), ValidationError> {
    at_most_chars(value, TEXT_MAX_CHARS)
}

pub fn fits_email(value: &str) -> Result<(), ValidationError> {
    at_most_chars(value, EMAIL_MAX_CHARS)
}

pub fn fits_price(value: impl std::borrow::Borrow<f64>) -> Result<(), ValidationError> {
    let value = *value.borrow();
    // compared after rounding to cents, as stored
    if (value * 100.0).round() / 100.0 > PRICE_MAX {
        return Err(ValidationError::new("range").with_message(Cow::Owned(format!(
            "Must be less than or equal to {PRICE_MAX:.2}."
        ))));
    }
    Ok(())
}

fn at_most_chars(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new("length")
            .with_message(Cow::Owned(format!("Longer than maximum length {max}."))));
    }
    Ok(())
}
