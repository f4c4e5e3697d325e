use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::candidates::age;
use crate::features::candidates::models::{Blok, Candidate, Gender};

/// Blok/gender constraint on the candidate list; `None` means "Semua"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CandidateFilter {
    pub blok: Option<Blok>,
    pub gender: Option<Gender>,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.blok.map_or(true, |blok| candidate.blok == blok)
            && self.gender.map_or(true, |gender| candidate.gender == gender)
    }
}

/// Candidates passing both constraints, in their original order
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    filter: &CandidateFilter,
) -> Vec<&'a Candidate> {
    candidates.iter().filter(|c| filter.matches(c)).collect()
}

/// Rounded mean age of candidates with a computable (non-negative) age.
///
/// Birth dates in the future are excluded; an empty set yields 0.
pub fn average_age(candidates: &[Candidate], today: chrono::NaiveDate) -> i32 {
    let ages: Vec<i32> = candidates
        .iter()
        .map(|c| age::calculate_age(c.tanggal_lahir, today))
        .filter(|umur| *umur > -1)
        .collect();

    if ages.is_empty() {
        return 0;
    }
    let sum: i64 = ages.iter().map(|umur| *umur as i64).sum();
    (sum as f64 / ages.len() as f64).round() as i32
}

/// Candidate count for every blok, including bloks with zero candidates
pub fn count_by_blok(candidates: &[Candidate]) -> Vec<(Blok, usize)> {
    Blok::ALL
        .iter()
        .map(|blok| {
            let count = candidates.iter().filter(|c| c.blok == *blok).count();
            (*blok, count)
        })
        .collect()
}
