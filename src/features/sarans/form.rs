use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::core::error::{AppError, Result};
use crate::features::sarans::models::{Saran, SaranPayload};
use crate::modules::gateway::DataGateway;
use crate::shared::constants::DEFAULT_SARAN_AUTHOR;
use crate::shared::submit_guard::SubmitGuard;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaranDraft {
    pub author_name: String,
    pub content: String,
}

impl SaranDraft {
    fn to_payload(&self) -> SaranPayload {
        let author_name = if self.author_name.trim().is_empty() {
            DEFAULT_SARAN_AUTHOR.to_string()
        } else {
            self.author_name.clone()
        };
        SaranPayload {
            author_name,
            content: self.content.clone(),
        }
    }
}

/// Suggestion modal: `Closed` or `Open` with a draft
#[derive(Debug, Clone, Default)]
pub struct SaranForm {
    open: bool,
    pub draft: SaranDraft,
    submitting: bool,
}

impl SaranForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Insert the drafted saran.
    ///
    /// Whitespace-only content is not dispatched and yields `Ok(None)`.
    pub async fn submit(&mut self, gateway: &dyn DataGateway) -> Result<Option<Saran>> {
        if !self.open {
            return Err(AppError::BadRequest("Saran form is not open".to_string()));
        }
        if self.draft.content.trim().is_empty() {
            debug!("Skipping saran submit with empty content");
            return Ok(None);
        }

        let _submitting = SubmitGuard::acquire(&mut self.submitting, "saran")?;
        let result = gateway.insert_saran(&self.draft.to_payload()).await;

        match result {
            Ok(saran) => {
                info!("Saran saved: id={}", saran.id);
                Ok(Some(saran))
            }
            Err(e) => {
                error!("Failed to save saran: {}", e);
                Err(e.into())
            }
        }
    }
}

// Driven by the page controller only; HTTP submits use a throwaway form
#[cfg_attr(not(test), allow(dead_code))]
impl SaranForm {
    pub fn close(&mut self) {
        self.open = false;
        self.draft = SaranDraft::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}
