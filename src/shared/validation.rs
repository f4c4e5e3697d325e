use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Everything that is not an ASCII digit.
    /// - "0812-3456 789" -> "08123456789"
    /// - "+62 812 3456" -> "628123456"
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Strip a WhatsApp number down to its digits
pub fn normalize_whatsapp(input: &str) -> String {
    NON_DIGIT_REGEX.replace_all(input, "").into_owned()
}

/// `None` for empty or whitespace-only input, otherwise the input unchanged
pub fn blank_to_none(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Validator hook rejecting empty or whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
