pub mod dtos;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::SaranService;
