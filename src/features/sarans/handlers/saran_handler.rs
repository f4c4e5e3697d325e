use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::sarans::dtos::{CreateSaranDto, SaranResponseDto};
use crate::features::sarans::services::SaranService;
use crate::shared::types::ApiResponse;

/// List sarans, newest first
#[utoipa::path(
    get,
    path = "/api/sarans",
    tag = "sarans",
    responses(
        (status = 200, description = "All sarans", body = ApiResponse<Vec<SaranResponseDto>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_sarans(
    State(service): State<Arc<SaranService>>,
) -> Result<Json<ApiResponse<Vec<SaranResponseDto>>>> {
    let sarans = service.list().await?;
    Ok(Json(ApiResponse::list(sarans)))
}

/// Submit a saran
#[utoipa::path(
    post,
    path = "/api/sarans",
    tag = "sarans",
    request_body = CreateSaranDto,
    responses(
        (status = 201, description = "Saran submitted", body = ApiResponse<SaranResponseDto>),
        (status = 400, description = "Empty content or invalid body")
    )
)]
pub async fn create_saran(
    State(service): State<Arc<SaranService>>,
    AppJson(dto): AppJson<CreateSaranDto>,
) -> Result<(StatusCode, Json<ApiResponse<SaranResponseDto>>)> {
    let saran = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            Some(saran),
            "Terima kasih atas saran Anda",
        )),
    ))
}
