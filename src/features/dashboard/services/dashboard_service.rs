use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::config::FormVariant;
use crate::features::candidates::age;
use crate::features::candidates::dtos::CandidateResponseDto;
use crate::features::candidates::filter::CandidateFilter;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::state::ViewState;
use crate::features::sarans::dtos::SaranResponseDto;
use crate::modules::gateway::DataGateway;

/// Service for the public election dashboard
pub struct DashboardService {
    gateway: Arc<dyn DataGateway>,
    variant: FormVariant,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn DataGateway>, variant: FormVariant) -> Self {
        Self { gateway, variant }
    }

    /// Best-effort snapshot: never fails, a collection that cannot be
    /// fetched comes back empty
    pub async fn snapshot(&self, filter: CandidateFilter) -> DashboardDto {
        let mut state = self.load().await;
        state.set_blok_filter(filter.blok);
        state.set_gender_filter(filter.gender);
        let today = age::today();

        let candidates = state
            .filtered_candidates()
            .into_iter()
            .cloned()
            .map(|c| CandidateResponseDto::from_candidate(c, today))
            .collect();

        DashboardDto {
            summary: summarize(&state, today),
            filter: state.filter,
            candidates,
            sarans: state
                .sarans
                .into_iter()
                .map(SaranResponseDto::from)
                .collect(),
        }
    }

    pub async fn summary(&self) -> DashboardSummaryDto {
        let state = self.load().await;
        summarize(&state, age::today())
    }

    async fn load(&self) -> ViewState {
        let mut state = ViewState::new(self.variant);
        state.reload(&*self.gateway).await;
        state
    }
}

fn summarize(state: &ViewState, today: NaiveDate) -> DashboardSummaryDto {
    DashboardSummaryDto {
        total_candidates: state.candidates.len() as i64,
        average_age: state.average_age(today),
        candidates_per_blok: state
            .count_by_blok()
            .into_iter()
            .map(|(blok, count)| BlokCountDto {
                blok,
                count: count as i64,
            })
            .collect(),
        total_sarans: state.sarans.len() as i64,
    }
}
