use utoipa::{Modify, OpenApi};

use crate::features::candidates::{
    dtos as candidates_dtos, filter::CandidateFilter, handlers as candidates_handlers,
    models as candidates_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::sarans::{dtos as sarans_dtos, handlers as sarans_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Candidates
        candidates_handlers::get_options,
        candidates_handlers::list_candidates,
        candidates_handlers::get_candidate,
        candidates_handlers::create_candidate,
        candidates_handlers::update_candidate,
        candidates_handlers::delete_candidate,
        // Sarans
        sarans_handlers::list_sarans,
        sarans_handlers::create_saran,
        // Dashboard
        dashboard_handlers::get_dashboard,
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Options
            candidates_models::Blok,
            candidates_models::Role,
            candidates_models::Gender,
            candidates_models::MaritalStatus,
            candidates_models::JobStatus,
            candidates_dtos::OptionsDto,
            ApiResponse<candidates_dtos::OptionsDto>,
            // Candidates
            CandidateFilter,
            candidates_dtos::CandidateFormDto,
            candidates_dtos::CandidateResponseDto,
            ApiResponse<candidates_dtos::CandidateResponseDto>,
            ApiResponse<Vec<candidates_dtos::CandidateResponseDto>>,
            // Sarans
            sarans_dtos::CreateSaranDto,
            sarans_dtos::SaranResponseDto,
            ApiResponse<sarans_dtos::SaranResponseDto>,
            ApiResponse<Vec<sarans_dtos::SaranResponseDto>>,
            // Dashboard
            dashboard_dtos::BlokCountDto,
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::DashboardDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<dashboard_dtos::DashboardDto>,
        )
    ),
    tags(
        (name = "candidates", description = "RT/RW candidate registration and listing"),
        (name = "sarans", description = "Resident suggestions (append-only)"),
        (name = "Dashboard", description = "Election page snapshot and statistics"),
    ),
    info(
        title = "Rukun Regensi API",
        version = "0.1.0",
        description = "API documentation for the Rukun Regensi RT/RW election",
    )
)]
pub struct ApiDoc;

/// Overrides the generated info block with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
