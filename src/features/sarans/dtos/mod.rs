mod saran_dto;

pub use saran_dto::*;
