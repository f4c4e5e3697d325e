//! Data Access Gateway for the hosted backend.
//!
//! All candidate and saran persistence goes through [`DataGateway`]; the
//! production implementation talks to the hosted Postgres database.

mod data_gateway;
mod error;
#[cfg(test)]
pub mod fake;
mod postgres;

pub use data_gateway::DataGateway;
pub use error::GatewayError;
pub use postgres::PgGateway;
