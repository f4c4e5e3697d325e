use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::sarans::dtos::{CreateSaranDto, SaranResponseDto};
use crate::features::sarans::form::{SaranDraft, SaranForm};
use crate::modules::gateway::DataGateway;

/// Service for resident suggestions
pub struct SaranService {
    gateway: Arc<dyn DataGateway>,
}

impl SaranService {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    /// All sarans, newest first
    pub async fn list(&self) -> Result<Vec<SaranResponseDto>> {
        let sarans = self.gateway.list_sarans().await?;
        Ok(sarans.into_iter().map(SaranResponseDto::from).collect())
    }

    pub async fn create(&self, dto: CreateSaranDto) -> Result<SaranResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut form = SaranForm::new();
        form.open();
        form.draft = SaranDraft {
            author_name: dto.author_name.unwrap_or_default(),
            content: dto.content,
        };

        match form.submit(&*self.gateway).await? {
            Some(saran) => Ok(saran.into()),
            None => Err(AppError::Validation(
                "Saran tidak boleh kosong".to_string(),
            )),
        }
    }
}
