mod saran_service;

pub use saran_service::SaranService;
