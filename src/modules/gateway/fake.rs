use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::features::candidates::models::{Candidate, CandidatePayload};
use crate::features::sarans::models::{Saran, SaranPayload};
use crate::modules::gateway::{DataGateway, GatewayError};

/// In-memory [`DataGateway`] with switchable failures for tests
pub struct FakeGateway {
    candidates: Mutex<Vec<Candidate>>,
    sarans: Mutex<Vec<Saran>>,
    clock: Mutex<DateTime<Utc>>,
    fail_candidate_reads: AtomicBool,
    fail_saran_reads: AtomicBool,
    fail_writes: AtomicBool,
    stall_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            candidates: Mutex::new(Vec::new()),
            sarans: Mutex::new(Vec::new()),
            clock: Mutex::new(Utc::now()),
            fail_candidate_reads: AtomicBool::new(false),
            fail_saran_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            stall_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seed a candidate directly, bypassing write accounting
    pub fn fake_add_candidate(&self, payload: CandidatePayload) -> Candidate {
        let candidate = payload.into_candidate(Uuid::new_v4(), self.tick());
        self.candidates.lock().unwrap().push(candidate.clone());
        candidate
    }

    pub fn fake_add_saran(&self, author_name: &str, content: &str) -> Saran {
        let saran = Saran {
            id: Uuid::new_v4(),
            author_name: author_name.to_string(),
            content: content.to_string(),
            created_at: self.tick(),
        };
        self.sarans.lock().unwrap().push(saran.clone());
        saran
    }

    pub fn fake_fail_candidate_reads(&self, fail: bool) {
        self.fail_candidate_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fake_fail_saran_reads(&self, fail: bool) {
        self.fail_saran_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fake_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Writes hang forever while set, without being counted
    pub fn fake_stall_writes(&self, stall: bool) {
        self.stall_writes.store(stall, Ordering::SeqCst);
    }

    /// Number of insert/update/delete calls that reached the store
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn stored_candidates(&self) -> Vec<Candidate> {
        self.candidates.lock().unwrap().clone()
    }

    pub fn stored_sarans(&self) -> Vec<Saran> {
        self.sarans.lock().unwrap().clone()
    }

    // Strictly increasing timestamps keep newest-first ordering deterministic
    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().unwrap();
        *clock += Duration::seconds(1);
        *clock
    }

    async fn begin_write(&self) -> Result<(), GatewayError> {
        if self.stall_writes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DataGateway for FakeGateway {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError> {
        if self.fail_candidate_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("candidates offline".to_string()));
        }
        let mut candidates = self.candidates.lock().unwrap().clone();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(candidates)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, GatewayError> {
        if self.fail_candidate_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("candidates offline".to_string()));
        }
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_candidate(
        &self,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        self.begin_write().await?;
        let candidate = payload.clone().into_candidate(Uuid::new_v4(), self.tick());
        self.candidates.lock().unwrap().push(candidate.clone());
        Ok(candidate)
    }

    async fn update_candidate(
        &self,
        id: Uuid,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        self.begin_write().await?;
        let mut candidates = self.candidates.lock().unwrap();
        let slot = candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        *slot = payload.clone().into_candidate(id, slot.created_at);
        Ok(slot.clone())
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<(), GatewayError> {
        self.begin_write().await?;
        let mut candidates = self.candidates.lock().unwrap();
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        if candidates.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    async fn list_sarans(&self) -> Result<Vec<Saran>, GatewayError> {
        if self.fail_saran_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("sarans offline".to_string()));
        }
        let mut sarans = self.sarans.lock().unwrap().clone();
        sarans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sarans)
    }

    async fn insert_saran(&self, payload: &SaranPayload) -> Result<Saran, GatewayError> {
        self.begin_write().await?;
        let saran = Saran {
            id: Uuid::new_v4(),
            author_name: payload.author_name.clone(),
            content: payload.content.clone(),
            created_at: self.tick(),
        };
        self.sarans.lock().unwrap().push(saran.clone());
        Ok(saran)
    }
}
