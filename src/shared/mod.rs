pub mod constants;
pub mod submit_guard;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
