mod candidate_service;

pub use candidate_service::{CandidateService, CandidateSubmission};
