use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::candidates::dtos::CandidateResponseDto;
use crate::features::candidates::filter::CandidateFilter;
use crate::features::candidates::models::Blok;
use crate::features::sarans::dtos::SaranResponseDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlokCountDto {
    pub blok: Blok,
    pub count: i64,
}

/// Header statistics, always over the full candidate list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_candidates: i64,
    /// Rounded mean age; 0 when no candidate has a valid age
    pub average_age: i32,
    /// Every blok in display order, including bloks with no candidates
    pub candidates_per_blok: Vec<BlokCountDto>,
    pub total_sarans: i64,
}

/// Everything the election page renders in one snapshot.
///
/// Either list is empty when its collection could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub summary: DashboardSummaryDto,
    pub filter: CandidateFilter,
    pub candidates: Vec<CandidateResponseDto>,
    pub sarans: Vec<SaranResponseDto>,
}
