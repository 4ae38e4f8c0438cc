//! Payload checks applied by the request layer before calling a repository.

use rust_decimal::Decimal;

use super::errors::{ModelError, ModelResult};

/// Longest accepted company handle
pub const MAX_HANDLE_LEN: usize = 25;

pub fn handle(value: &str) -> ModelResult<()> {
    let well_formed = !value.is_empty()
        && value.len() <= MAX_HANDLE_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ModelError::validation(format!(
            "handle must be 1-{} lowercase letters, digits or hyphens",
            MAX_HANDLE_LEN
        )))
    }
}

pub fn non_blank(field: &str, value: &str) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{} can not be empty", field)));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: Option<i32>) -> ModelResult<()> {
    match value {
        Some(n) if n < 0 => Err(ModelError::validation(format!(
            "{} can not be negative",
            field
        ))),
        _ => Ok(()),
    }
}

pub fn http_url(field: &str, value: Option<&str>) -> ModelResult<()> {
    match value {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            ModelError::validation(format!("{} must be an http(s) URL", field)),
        ),
        _ => Ok(()),
    }
}

pub fn fraction(field: &str, value: Option<Decimal>) -> ModelResult<()> {
    match value {
        Some(d) if d < Decimal::ZERO || d > Decimal::ONE => Err(ModelError::validation(
            format!("{} must be between 0 and 1", field),
        )),
        _ => Ok(()),
    }
}
