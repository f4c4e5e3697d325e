use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create public dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::core::config::FormVariant;
    use crate::features::candidates::models::{Blok, Gender};
    use crate::modules::gateway::fake::FakeGateway;
    use crate::shared::test_helpers::candidate_payload;

    fn server() -> (Arc<FakeGateway>, TestServer) {
        let gateway = Arc::new(FakeGateway::new());
        let service = Arc::new(DashboardService::new(
            gateway.clone(),
            FormVariant::Editable,
        ));
        (gateway, TestServer::new(routes(service)).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_with_filter() {
        let (gateway, server) = server();
        gateway.fake_add_candidate(candidate_payload(Blok::M, Gender::Perempuan, 1985, 5, 5));
        gateway.fake_add_candidate(candidate_payload(Blok::M, Gender::LakiLaki, 1986, 5, 5));
        gateway.fake_add_saran("Warga", "Halo");

        let response = server
            .get("/api/dashboard")
            .add_query_param("gender", "Perempuan")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["candidates"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["filter"]["gender"], "Perempuan");
        assert_eq!(body["data"]["summary"]["total_candidates"], 2);
        assert_eq!(body["data"]["sarans"][0]["content"], "Halo");
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_gender() {
        let (_, server) = server();

        server
            .get("/api/dashboard")
            .add_query_param("gender", "L")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_when_candidates_unavailable() {
        let (gateway, server) = server();
        gateway.fake_add_candidate(candidate_payload(Blok::K, Gender::LakiLaki, 1980, 1, 1));
        gateway.fake_fail_candidate_reads(true);

        let response = server.get("/api/dashboard/summary").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["total_candidates"], 0);
        assert_eq!(body["data"]["average_age"], 0);
        assert_eq!(body["data"]["candidates_per_blok"][0]["blok"], "K");
        assert_eq!(body["data"]["candidates_per_blok"][0]["count"], 0);
    }
}
