use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::sarans::models::Saran;

/// Request DTO for submitting a saran
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSaranDto {
    /// Defaults to "Warga" when blank or missing
    #[validate(length(max = 255, message = "Nama maksimal 255 karakter"))]
    #[schema(example = "Pak Joko")]
    pub author_name: Option<String>,
    #[validate(length(max = 5000, message = "Saran maksimal 5000 karakter"))]
    #[schema(example = "Mohon lampu jalan di blok N diperbaiki")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaranResponseDto {
    pub id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Saran> for SaranResponseDto {
    fn from(s: Saran) -> Self {
        Self {
            id: s.id,
            author_name: s.author_name,
            content: s.content,
            created_at: s.created_at,
        }
    }
}
