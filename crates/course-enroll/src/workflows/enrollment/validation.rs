use super::domain::ApplicationInput;

/// Reason an application form cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Phone number must be exactly 10 digits")]
    PhoneFormat,
    #[error("Address is required")]
    AddressRequired,
    #[error("City is required")]
    CityRequired,
    #[error("State is required")]
    StateRequired,
    #[error("Pincode must be exactly 6 digits")]
    PincodeFormat,
    #[error("Age is required")]
    AgeRequired,
    #[error("Age must be a number between 1 and 120")]
    AgeOutOfRange,
}

pub const PHONE_DIGITS: usize = 10;
pub const PINCODE_DIGITS: usize = 6;
pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;

/// Check the form and report the last failing rule.
///
/// Every rule runs and a later failure replaces an earlier one, so an input that is
/// missing both its name and its pincode reports the pincode.
pub fn validate(input: &ApplicationInput) -> Result<(), ValidationError> {
    let mut error = None;

    if is_blank(&input.name) {
        error = Some(ValidationError::NameRequired);
    }
    if is_blank(&input.phone) {
        error = Some(ValidationError::PhoneRequired);
    }
    if !is_digits(&input.phone, PHONE_DIGITS) {
        error = Some(ValidationError::PhoneFormat);
    }
    if is_blank(&input.address) {
        error = Some(ValidationError::AddressRequired);
    }
    if is_blank(&input.city) {
        error = Some(ValidationError::CityRequired);
    }
    if is_blank(&input.state) {
        error = Some(ValidationError::StateRequired);
    }
    if !is_digits(&input.pincode, PINCODE_DIGITS) {
        error = Some(ValidationError::PincodeFormat);
    }
    if is_blank(&input.age) {
        error = Some(ValidationError::AgeRequired);
    }
    if !age_in_range(&input.age) {
        error = Some(ValidationError::AgeOutOfRange);
    }

    match error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn age_in_range(value: &str) -> bool {
    value
        .trim()
        .parse::<i64>()
        .map(|age| (MIN_AGE..=MAX_AGE).contains(&age))
        .unwrap_or(false)
}
