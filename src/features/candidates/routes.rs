use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::features::candidates::handlers;
use crate::features::candidates::services::CandidateService;

/// Create routes for the candidates feature
pub fn routes(service: Arc<CandidateService>, max_body_size: usize) -> Router {
    Router::new()
        .route("/api/options", get(handlers::get_options))
        .route(
            "/api/candidates",
            get(handlers::list_candidates).post(handlers::create_candidate),
        )
        .route(
            "/api/candidates/{id}",
            get(handlers::get_candidate)
                .put(handlers::update_candidate)
                .delete(handlers::delete_candidate),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::core::config::FormVariant;
    use crate::features::candidates::models::{Blok, Gender};
    use crate::modules::gateway::fake::FakeGateway;
    use crate::modules::storage::fake::FakeStorage;
    use crate::shared::test_helpers::{candidate_form, candidate_payload, PNG_BYTES};

    const BODY_LIMIT: usize = 25 * 1024 * 1024;

    fn server(variant: FormVariant) -> (Arc<FakeGateway>, Arc<FakeStorage>, TestServer) {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(FakeStorage::new());
        let service = Arc::new(CandidateService::new(
            gateway.clone(),
            storage.clone(),
            variant,
        ));
        let server = TestServer::new(routes(service, BODY_LIMIT)).unwrap();
        (gateway, storage, server)
    }

    #[tokio::test]
    async fn test_options_lists_every_enumeration() {
        let (_, _, server) = server(FormVariant::Editable);

        let response = server.get("/api/options").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["bloks"].as_array().unwrap().len(), 6);
        assert_eq!(body["data"]["genders"][0], "Laki-laki");
        assert_eq!(body["data"]["marital_statuses"][2], "Janda/Duda");
        assert_eq!(body["data"]["job_statuses"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_candidate_with_photo() {
        let (gateway, storage, server) = server(FormVariant::Editable);
        let form = candidate_form("Siti Aminah", "M").add_part(
            "foto_profil",
            Part::bytes(PNG_BYTES.to_vec())
                .file_name("siti.png")
                .mime_type("image/png"),
        );

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "Siti Aminah");
        assert_eq!(body["data"]["blok"], "M");
        assert_eq!(body["data"]["nomor_whatsapp"], "08123456789");
        assert_eq!(body["data"]["whatsapp_link"], "https://wa.me/08123456789");
        assert!(body["data"]["foto_profil_url"]
            .as_str()
            .unwrap()
            .contains("foto-profil/"));
        assert_eq!(storage.objects().len(), 1);
        assert_eq!(gateway.stored_candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_file_part_is_ignored() {
        let (_, storage, server) = server(FormVariant::Editable);
        let form = candidate_form("Budi", "K").add_part(
            "ktp",
            Part::bytes(Vec::new())
                .file_name("")
                .mime_type("application/octet-stream"),
        );

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        assert!(storage.objects().is_empty());
    }

    #[tokio::test]
    async fn test_image_content_type_with_parameters_is_accepted() {
        let (_, storage, server) = server(FormVariant::Editable);
        let form = candidate_form("Rina", "N").add_part(
            "ktp",
            Part::bytes(PNG_BYTES.to_vec())
                .file_name("ktp.png")
                .mime_type("image/png; charset=binary"),
        );

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(storage.objects().len(), 1);
    }

    #[tokio::test]
    async fn test_image_url_text_fields_are_ignored() {
        let (gateway, storage, server) = server(FormVariant::Editable);
        let form = candidate_form("Rina", "N")
            .add_text("foto_profil_url", "https://elsewhere.test/foto.jpg")
            .add_text("ktp_url", "https://elsewhere.test/ktp.jpg");

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["data"].get("foto_profil_url").map_or(true, Value::is_null));
        assert!(body["data"].get("ktp_url").map_or(true, Value::is_null));
        assert!(storage.objects().is_empty());
        assert_eq!(gateway.stored_candidates()[0].foto_profil_url, None);
    }

    #[tokio::test]
    async fn test_rejects_non_image_upload() {
        let (gateway, _, server) = server(FormVariant::Editable);
        let form = candidate_form("Budi", "K").add_part(
            "ktp",
            Part::bytes(b"%PDF-1.4".to_vec())
                .file_name("ktp.pdf")
                .mime_type("application/pdf"),
        );

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_malformed_date_and_blank_name() {
        let (gateway, _, server) = server(FormVariant::Editable);

        let bad_date = candidate_form("Budi", "K").add_text("tanggal_lahir", "01-01-1980");
        server
            .post("/api/candidates")
            .multipart(bad_date)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let blank_name = MultipartForm::new()
            .add_text("name", "  ")
            .add_text("blok", "K");
        server
            .post("/api/candidates")
            .multipart(blank_name)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_upload_returns_bad_gateway() {
        let (gateway, storage, server) = server(FormVariant::Editable);
        storage.fake_fail_uploads(true);
        let form = candidate_form("Budi", "K").add_part(
            "foto_profil",
            Part::bytes(PNG_BYTES.to_vec())
                .file_name("budi.png")
                .mime_type("image/png"),
        );

        let response = server.post("/api/candidates").multipart(form).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(gateway.stored_candidates().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_and_rejects_unknown_blok() {
        let (gateway, _, server) = server(FormVariant::Editable);
        gateway.fake_add_candidate(candidate_payload(Blok::K, Gender::LakiLaki, 1980, 1, 1));
        gateway.fake_add_candidate(candidate_payload(Blok::L, Gender::Perempuan, 1990, 1, 1));

        let response = server
            .get("/api/candidates")
            .add_query_param("blok", "L")
            .add_query_param("gender", "")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["gender"], "Perempuan");

        server
            .get("/api/candidates")
            .add_query_param("blok", "Z")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete_round() {
        let (gateway, _, server) = server(FormVariant::Editable);
        let existing =
            gateway.fake_add_candidate(candidate_payload(Blok::K, Gender::LakiLaki, 1980, 1, 1));
        let path = format!("/api/candidates/{}", existing.id);

        let update = MultipartForm::new().add_text("role", "RW");
        let response = server.put(&path).multipart(update).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["role"], "RW");
        assert_eq!(body["data"]["name"], existing.name.as_str());

        server.delete(&path).await.assert_status_ok();
        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_append_only_rejects_edit_and_delete() {
        let (gateway, _, server) = server(FormVariant::AppendOnly);
        let existing =
            gateway.fake_add_candidate(candidate_payload(Blok::K, Gender::LakiLaki, 1980, 1, 1));
        let path = format!("/api/candidates/{}", existing.id);

        server
            .put(&path)
            .multipart(MultipartForm::new().add_text("role", "RW"))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete(&path)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert_eq!(gateway.stored_candidates().len(), 1);
    }
}
