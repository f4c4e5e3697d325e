pub mod age;
pub mod dtos;
pub mod filter;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CandidateService;
