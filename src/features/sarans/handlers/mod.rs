mod saran_handler;

pub use saran_handler::*;
