use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::candidates::dtos::CandidateQuery;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get the full election page snapshot
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(CandidateQuery),
    responses(
        (status = 200, description = "Summary, filtered candidates and sarans", body = ApiResponse<DashboardDto>),
        (status = 400, description = "Unknown blok or gender")
    )
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<ApiResponse<DashboardDto>>> {
    let filter = query.to_filter()?;
    let data = service.snapshot(filter).await;
    Ok(Json(ApiResponse::ok(data)))
}

/// Get dashboard header statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Json<ApiResponse<DashboardSummaryDto>> {
    let summary = service.summary().await;
    Json(ApiResponse::ok(summary))
}
