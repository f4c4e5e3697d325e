//! View state for the election page.
//!
//! One explicit struct owns the raw lists, tab, filters, modal forms and
//! detail selection. Mutating submits go through the owned forms and are
//! followed by a full reload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::config::FormVariant;
use crate::core::error::{AppError, Result};
use crate::features::candidates::filter::{
    average_age, count_by_blok, filter_candidates, CandidateFilter,
};
use crate::features::candidates::form::CandidateForm;
use crate::features::candidates::models::{Blok, Candidate, Gender};
use crate::features::sarans::form::SaranForm;
use crate::features::sarans::models::Saran;
use crate::modules::gateway::DataGateway;
use crate::modules::storage::ObjectStorage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Kandidat,
    Saran,
}

// The HTTP dashboard only reloads, filters and summarizes; the tab, modal
// and detail state is exercised by the page flow tests.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone)]
pub struct ViewState {
    pub candidates: Vec<Candidate>,
    pub sarans: Vec<Saran>,
    loading: bool,
    pub active_tab: ActiveTab,
    pub filter: CandidateFilter,
    pub candidate_form: CandidateForm,
    pub saran_form: SaranForm,
    selected_candidate: Option<Uuid>,
}

impl ViewState {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            candidates: Vec::new(),
            sarans: Vec::new(),
            loading: false,
            active_tab: ActiveTab::default(),
            filter: CandidateFilter::default(),
            candidate_form: CandidateForm::new(variant),
            saran_form: SaranForm::new(),
            selected_candidate: None,
        }
    }

    /// Refetch both collections concurrently.
    ///
    /// Each collection recovers independently: a failed fetch is logged and
    /// leaves that list empty while the other keeps its fresh result.
    pub async fn reload(&mut self, gateway: &dyn DataGateway) {
        self.loading = true;
        let (candidates, sarans) =
            tokio::join!(gateway.list_candidates(), gateway.list_sarans());

        self.candidates = candidates.unwrap_or_else(|e| {
            error!("Failed to fetch candidates: {}", e);
            Vec::new()
        });
        self.sarans = sarans.unwrap_or_else(|e| {
            error!("Failed to fetch sarans: {}", e);
            Vec::new()
        });
        self.loading = false;

        if self
            .selected_candidate
            .is_some_and(|id| !self.candidates.iter().any(|c| c.id == id))
        {
            self.selected_candidate = None;
        }
        debug!(
            "Reloaded {} candidates and {} sarans",
            self.candidates.len(),
            self.sarans.len()
        );
    }

    // ========================================================================
    // Filters and derived statistics
    // ========================================================================

    pub fn filtered_candidates(&self) -> Vec<&Candidate> {
        filter_candidates(&self.candidates, &self.filter)
    }

    pub fn set_blok_filter(&mut self, blok: Option<Blok>) {
        self.filter.blok = blok;
    }

    pub fn set_gender_filter(&mut self, gender: Option<Gender>) {
        self.filter.gender = gender;
    }

    /// Mean age over all candidates, not just the filtered ones
    pub fn average_age(&self, today: NaiveDate) -> i32 {
        average_age(&self.candidates, today)
    }

    pub fn count_by_blok(&self) -> Vec<(Blok, usize)> {
        count_by_blok(&self.candidates)
    }

}

#[cfg_attr(not(test), allow(dead_code))]
impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn reset_filters(&mut self) {
        self.filter = CandidateFilter::default();
    }

    // ========================================================================
    // Detail view
    // ========================================================================

    pub fn open_detail(&mut self, id: Uuid) -> Option<&Candidate> {
        let candidate = self.candidates.iter().find(|c| c.id == id)?;
        self.selected_candidate = Some(id);
        Some(candidate)
    }

    pub fn close_detail(&mut self) {
        self.selected_candidate = None;
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        let id = self.selected_candidate?;
        self.candidates.iter().find(|c| c.id == id)
    }

    // ========================================================================
    // Candidate form
    // ========================================================================

    /// Open the candidate form empty, or for editing a loaded candidate
    pub fn open_candidate_form(&mut self, id: Option<Uuid>) -> Result<()> {
        match id {
            None => self.candidate_form.open(None),
            Some(id) => {
                let candidate = self
                    .candidates
                    .iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", id)))?;
                self.candidate_form.open(Some(candidate))
            }
        }
    }

    /// Submit the candidate form; on success reload then close the modal
    pub async fn submit_candidate_form(
        &mut self,
        gateway: &dyn DataGateway,
        storage: &dyn ObjectStorage,
    ) -> Result<Candidate> {
        let candidate = self.candidate_form.submit(gateway, storage).await?;
        self.reload(gateway).await;
        self.candidate_form.close();
        Ok(candidate)
    }

    /// Delete the candidate open in the edit form
    pub async fn delete_candidate(&mut self, gateway: &dyn DataGateway) -> Result<Uuid> {
        let id = self.candidate_form.delete(gateway).await?;
        self.reload(gateway).await;
        self.candidate_form.close();
        Ok(id)
    }

    // ========================================================================
    // Saran form
    // ========================================================================

    pub fn open_saran_form(&mut self) {
        self.saran_form.open();
    }

    /// Submit the saran form. Empty content leaves everything untouched.
    pub async fn submit_saran_form(&mut self, gateway: &dyn DataGateway) -> Result<Option<Saran>> {
        let saran = self.saran_form.submit(gateway).await?;
        if saran.is_some() {
            self.reload(gateway).await;
            self.saran_form.close();
        }
        Ok(saran)
    }
}
