//! Input validation for scan codes, names, quotas, and withdrawal quantities.
//!
//! Every rejection is an [`Error::Validation`] whose message can be shown to the user as-is.

use crate::{
    core::policy::{MAX_NAME_LEN, MAX_QUOTA, MAX_SCAN_CODE_LEN, MAX_WITHDRAWAL},
    errors::{Error, Result},
};

/// Trims a scan code and checks that it is present and at most 50 characters.
pub fn validate_scan_code(scan_code: &str) -> Result<String> {
    let trimmed = scan_code.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Employee ID is required."));
    }
    if trimmed.chars().count() > MAX_SCAN_CODE_LEN {
        return Err(Error::validation(format!(
            "Employee ID cannot exceed {MAX_SCAN_CODE_LEN} characters."
        )));
    }
    Ok(trimmed.to_string())
}

/// Trims a display name and checks that it is present and at most 255 characters.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Employee name is required."));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Error::validation(format!(
            "Employee name cannot exceed {MAX_NAME_LEN} characters."
        )));
    }
    Ok(trimmed.to_string())
}

/// Checks an administrator-assigned quota is within 0..=50.
pub fn validate_quota(quota: i32) -> Result<i32> {
    if quota < 0 {
        return Err(Error::validation("Remaining quota cannot be negative."));
    }
    if quota > MAX_QUOTA {
        return Err(Error::validation(format!(
            "Remaining quota cannot exceed {MAX_QUOTA} gallons."
        )));
    }
    Ok(quota)
}

/// Checks a withdrawal quantity is within 1..=10.
pub fn validate_quantity(quantity: i32) -> Result<i32> {
    if !(1..=MAX_WITHDRAWAL).contains(&quantity) {
        return Err(Error::validation(format!(
            "Quantity must be between 1 and {MAX_WITHDRAWAL} gallons."
        )));
    }
    Ok(quantity)
}
