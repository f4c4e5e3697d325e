use crate::core::error::{AppError, Result};

/// Holds a form's `submitting` flag for one write.
///
/// The flag is cleared on drop, which also runs when the submit future is
/// cancelled mid-await.
pub struct SubmitGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> SubmitGuard<'a> {
    /// Set the flag, or fail with `Conflict` when it is already set
    pub fn acquire(flag: &'a mut bool, form: &str) -> Result<Self> {
        if *flag {
            return Err(AppError::Conflict(format!(
                "A {} submission is already in progress",
                form
            )));
        }
        *flag = true;
        Ok(Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
