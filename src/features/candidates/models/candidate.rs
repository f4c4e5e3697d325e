use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{Blok, Gender, JobStatus, MaritalStatus, Role};
use crate::shared::validation::normalize_whatsapp;

/// A registered nomination as stored by the data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub nik: String,
    pub nomor_whatsapp: Option<String>,
    pub tanggal_lahir: NaiveDate,
    pub status_perkawinan: MaritalStatus,
    pub gender: Gender,
    pub blok: Blok,
    pub role: Role,
    pub status_pekerjaan: JobStatus,
    pub visi: String,
    pub misi: String,
    pub foto_profil_url: Option<String>,
    pub ktp_url: Option<String>,
    pub riwayat_organisasi: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Click-to-chat link, if the candidate left a number
    pub fn whatsapp_link(&self) -> Option<String> {
        self.nomor_whatsapp
            .as_deref()
            .map(normalize_whatsapp)
            .filter(|digits| !digits.is_empty())
            .map(|digits| format!("https://wa.me/{}", digits))
    }
}

/// Full field set written on insert and on (last-write-wins) update.
/// `id` and `created_at` are never part of a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePayload {
    pub name: String,
    pub nik: String,
    pub nomor_whatsapp: Option<String>,
    pub tanggal_lahir: NaiveDate,
    pub status_perkawinan: MaritalStatus,
    pub gender: Gender,
    pub blok: Blok,
    pub role: Role,
    pub status_pekerjaan: JobStatus,
    pub visi: String,
    pub misi: String,
    pub foto_profil_url: Option<String>,
    pub ktp_url: Option<String>,
    pub riwayat_organisasi: Option<String>,
}

#[cfg(test)]
impl CandidatePayload {
    /// Materialize the stored record for a freshly assigned id/timestamp
    pub fn into_candidate(self, id: Uuid, created_at: DateTime<Utc>) -> Candidate {
        Candidate {
            id,
            name: self.name,
            nik: self.nik,
            nomor_whatsapp: self.nomor_whatsapp,
            tanggal_lahir: self.tanggal_lahir,
            status_perkawinan: self.status_perkawinan,
            gender: self.gender,
            blok: self.blok,
            role: self.role,
            status_pekerjaan: self.status_pekerjaan,
            visi: self.visi,
            misi: self.misi,
            foto_profil_url: self.foto_profil_url,
            ktp_url: self.ktp_url,
            riwayat_organisasi: self.riwayat_organisasi,
            created_at,
        }
    }
}
