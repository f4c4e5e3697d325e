mod saran;

pub use saran::{Saran, SaranPayload};
