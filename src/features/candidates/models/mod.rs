mod candidate;
mod options;

pub use candidate::{Candidate, CandidatePayload};
pub use options::{Blok, Gender, JobStatus, MaritalStatus, ParseOptionError, Role};
