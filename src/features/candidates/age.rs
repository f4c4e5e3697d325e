//! Whole-year age from a birth date.

use chrono::{Datelike, Local, NaiveDate};

/// Completed years between `birth` and `today`.
///
/// Year difference, minus one when `(month, day)` of `today` is still before
/// the birthday. Dates are plain calendar dates; no timezone shifting.
/// A birth date in the future yields a negative value.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Local wall-clock date used for "now"
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
