use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::features::candidates::models::{Candidate, CandidatePayload};
use crate::features::sarans::models::{Saran, SaranPayload};
use crate::modules::gateway::GatewayError;

/// Remote store over the `candidates` and `sarans` collections.
///
/// Listings are ordered newest first (`created_at` descending). Updates are
/// blind last-write-wins against the stored id.
#[async_trait]
pub trait DataGateway: Send + Sync + 'static {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, GatewayError>;

    async fn insert_candidate(&self, payload: &CandidatePayload)
        -> Result<Candidate, GatewayError>;

    /// Replace every writable field of the candidate at `id`
    async fn update_candidate(
        &self,
        id: Uuid,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError>;

    async fn delete_candidate(&self, id: Uuid) -> Result<(), GatewayError>;

    async fn list_sarans(&self) -> Result<Vec<Saran>, GatewayError>;

    async fn insert_saran(&self, payload: &SaranPayload) -> Result<Saran, GatewayError>;
}

#[async_trait]
impl<T: DataGateway + ?Sized> DataGateway for Arc<T> {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError> {
        (**self).list_candidates().await
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, GatewayError> {
        (**self).get_candidate(id).await
    }

    async fn insert_candidate(
        &self,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        (**self).insert_candidate(payload).await
    }

    async fn update_candidate(
        &self,
        id: Uuid,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        (**self).update_candidate(id, payload).await
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<(), GatewayError> {
        (**self).delete_candidate(id).await
    }

    async fn list_sarans(&self) -> Result<Vec<Saran>, GatewayError> {
        (**self).list_sarans().await
    }

    async fn insert_saran(&self, payload: &SaranPayload) -> Result<Saran, GatewayError> {
        (**self).insert_saran(payload).await
    }
}
