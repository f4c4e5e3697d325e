use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::config::FormVariant;
use crate::core::error::{AppError, Result};
use crate::features::candidates::dtos::{CandidateResponseDto, OptionsDto};
use crate::features::candidates::filter::{filter_candidates, CandidateFilter};
use crate::features::candidates::form::{CandidateForm, ImageKind, ImageUpload};
use crate::features::candidates::models::Candidate;
use crate::modules::gateway::DataGateway;
use crate::modules::storage::ObjectStorage;

/// One submitted candidate form: raw text inputs plus selected files
#[derive(Debug, Clone, Default)]
pub struct CandidateSubmission {
    pub fields: Vec<(String, String)>,
    pub foto_profil: Option<ImageUpload>,
    pub ktp: Option<ImageUpload>,
}

impl CandidateSubmission {
    fn apply_to(self, form: &mut CandidateForm) -> Result<()> {
        for (name, value) in self.fields {
            form.draft.set_field(&name, value)?;
        }
        if let Some(image) = self.foto_profil {
            form.attach(ImageKind::FotoProfil, image);
        }
        if let Some(image) = self.ktp {
            form.attach(ImageKind::Ktp, image);
        }
        Ok(())
    }
}

/// Service for candidate registration and browsing
pub struct CandidateService {
    gateway: Arc<dyn DataGateway>,
    storage: Arc<dyn ObjectStorage>,
    variant: FormVariant,
}

impl CandidateService {
    pub fn new(
        gateway: Arc<dyn DataGateway>,
        storage: Arc<dyn ObjectStorage>,
        variant: FormVariant,
    ) -> Self {
        Self {
            gateway,
            storage,
            variant,
        }
    }

    pub fn options(&self) -> OptionsDto {
        OptionsDto::all()
    }

    /// List candidates newest first, narrowed by blok and gender
    pub async fn list(&self, filter: &CandidateFilter) -> Result<Vec<CandidateResponseDto>> {
        let candidates = self.gateway.list_candidates().await?;
        Ok(filter_candidates(&candidates, filter)
            .into_iter()
            .cloned()
            .map(CandidateResponseDto::from)
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CandidateResponseDto> {
        self.find(id).await.map(CandidateResponseDto::from)
    }

    /// Register a new candidate
    pub async fn create(&self, submission: CandidateSubmission) -> Result<CandidateResponseDto> {
        let mut form = CandidateForm::new(self.variant);
        form.open(None)?;
        submission.apply_to(&mut form)?;

        let candidate = form.submit(&*self.gateway, &*self.storage).await?;
        Ok(candidate.into())
    }

    /// Edit an existing candidate.
    ///
    /// Fields missing from the submission keep their stored values; the
    /// whole record is then written back.
    pub async fn update(
        &self,
        id: Uuid,
        submission: CandidateSubmission,
    ) -> Result<CandidateResponseDto> {
        self.ensure_editable()?;
        let existing = self.find(id).await?;

        let mut form = CandidateForm::new(self.variant);
        form.open(Some(&existing))?;
        submission.apply_to(&mut form)?;

        let candidate = form.submit(&*self.gateway, &*self.storage).await?;
        Ok(candidate.into())
    }

    /// Delete by id without reading the record first, so rows that no
    /// longer parse can still be removed
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.ensure_editable()?;
        self.gateway.delete_candidate(id).await?;

        info!("Candidate deleted: id={}", id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Candidate> {
        self.gateway
            .get_candidate(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", id)))
    }

    fn ensure_editable(&self) -> Result<()> {
        if !self.variant.allows_edit() {
            return Err(AppError::Forbidden(
                "Candidates cannot be edited in this deployment".to_string(),
            ));
        }
        Ok(())
    }
}
