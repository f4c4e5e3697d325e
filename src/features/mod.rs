pub mod candidates;
pub mod dashboard;
pub mod sarans;
