use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppMultipart;
use crate::features::candidates::dtos::{
    CandidateFormDto, CandidateQuery, CandidateResponseDto, OptionsDto,
};
use crate::features::candidates::form::{ImageKind, ImageUpload};
use crate::features::candidates::services::{CandidateService, CandidateSubmission};
use crate::shared::constants::{ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE};
use crate::shared::types::ApiResponse;

/// Check if an image MIME type is accepted. Parameters such as
/// `; charset=binary` are ignored.
pub fn is_image_type_allowed(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_MIME_TYPES.contains(&essence.as_str())
}

/// Read a candidate form from multipart/form-data.
///
/// `foto_profil` and `ktp` are file parts; every other part is a text
/// field. A file part with no content counts as "no file selected".
async fn read_submission(mut multipart: Multipart) -> Result<CandidateSubmission> {
    let mut submission = CandidateSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match ImageKind::from_field(&field_name) {
            Some(kind) => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field.file_name().unwrap_or("").to_string();

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                if data.is_empty() {
                    continue;
                }
                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "File {} too large. Maximum size is {} MB",
                        kind.label(),
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }
                if !is_image_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "File type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_MIME_TYPES.join(", ")
                    )));
                }

                let upload = ImageUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                };
                match kind {
                    ImageKind::FotoProfil => submission.foto_profil = Some(upload),
                    ImageKind::Ktp => submission.ktp = Some(upload),
                }
            }
            None => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
                })?;
                submission.fields.push((field_name, text));
            }
        }
    }

    Ok(submission)
}

/// Option lists for the candidate form and filter bar
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "candidates",
    responses(
        (status = 200, description = "All option lists", body = ApiResponse<OptionsDto>),
    )
)]
pub async fn get_options(
    State(service): State<Arc<CandidateService>>,
) -> Json<ApiResponse<OptionsDto>> {
    Json(ApiResponse::ok(service.options()))
}

/// List candidates, newest first
#[utoipa::path(
    get,
    path = "/api/candidates",
    tag = "candidates",
    params(CandidateQuery),
    responses(
        (status = 200, description = "Filtered candidates", body = ApiResponse<Vec<CandidateResponseDto>>),
        (status = 400, description = "Unknown blok or gender"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_candidates(
    State(service): State<Arc<CandidateService>>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<ApiResponse<Vec<CandidateResponseDto>>>> {
    let filter = query.to_filter()?;
    let candidates = service.list(&filter).await?;
    Ok(Json(ApiResponse::list(candidates)))
}

/// Get candidate detail
#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    tag = "candidates",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = ApiResponse<CandidateResponseDto>),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn get_candidate(
    State(service): State<Arc<CandidateService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CandidateResponseDto>>> {
    let candidate = service.get(id).await?;
    Ok(Json(ApiResponse::ok(candidate)))
}

/// Register a candidate
#[utoipa::path(
    post,
    path = "/api/candidates",
    tag = "candidates",
    request_body(
        content = CandidateFormDto,
        content_type = "multipart/form-data",
        description = "Candidate fields with optional profile photo and KTP scan",
    ),
    responses(
        (status = 201, description = "Candidate registered", body = ApiResponse<CandidateResponseDto>),
        (status = 400, description = "Invalid field or file"),
        (status = 502, description = "Image upload failed")
    )
)]
pub async fn create_candidate(
    State(service): State<Arc<CandidateService>>,
    AppMultipart(multipart): AppMultipart,
) -> Result<(StatusCode, Json<ApiResponse<CandidateResponseDto>>)> {
    let submission = read_submission(multipart).await?;
    let candidate = service.create(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            Some(candidate),
            "Kandidat berhasil didaftarkan",
        )),
    ))
}

/// Edit a candidate
#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    tag = "candidates",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body(
        content = CandidateFormDto,
        content_type = "multipart/form-data",
        description = "Changed fields; omitted fields keep their stored values",
    ),
    responses(
        (status = 200, description = "Candidate updated", body = ApiResponse<CandidateResponseDto>),
        (status = 400, description = "Invalid field or file"),
        (status = 403, description = "Editing is disabled"),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn update_candidate(
    State(service): State<Arc<CandidateService>>,
    Path(id): Path<Uuid>,
    AppMultipart(multipart): AppMultipart,
) -> Result<Json<ApiResponse<CandidateResponseDto>>> {
    let submission = read_submission(multipart).await?;
    let candidate = service.update(id, submission).await?;
    Ok(Json(ApiResponse::with_message(
        Some(candidate),
        "Kandidat berhasil diperbarui",
    )))
}

/// Delete a candidate
#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    tag = "candidates",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate deleted"),
        (status = 403, description = "Deleting is disabled"),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn delete_candidate(
    State(service): State<Arc<CandidateService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::with_message(None, "Kandidat berhasil dihapus")))
}
