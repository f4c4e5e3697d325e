use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::candidates::age;
use crate::features::candidates::filter::CandidateFilter;
use crate::features::candidates::models::{
    Blok, Candidate, Gender, JobStatus, MaritalStatus, Role,
};

/// Candidate as shown in cards and the detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateResponseDto {
    pub id: Uuid,
    pub name: String,
    pub nik: String,
    pub nomor_whatsapp: Option<String>,
    /// Click-to-chat link built from the stored digits
    #[schema(example = "https://wa.me/08123456789")]
    pub whatsapp_link: Option<String>,
    pub tanggal_lahir: NaiveDate,
    /// Age today; negative for a birth date in the future
    pub umur: i32,
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

impl CandidateResponseDto {
    pub fn from_candidate(c: Candidate, today: NaiveDate) -> Self {
        Self {
            whatsapp_link: c.whatsapp_link(),
            umur: age::calculate_age(c.tanggal_lahir, today),
            id: c.id,
            name: c.name,
            nik: c.nik,
            nomor_whatsapp: c.nomor_whatsapp,
            tanggal_lahir: c.tanggal_lahir,
            status_perkawinan: c.status_perkawinan,
            gender: c.gender,
            blok: c.blok,
            role: c.role,
            status_pekerjaan: c.status_pekerjaan,
            visi: c.visi,
            misi: c.misi,
            foto_profil_url: c.foto_profil_url,
            ktp_url: c.ktp_url,
            riwayat_organisasi: c.riwayat_organisasi,
            created_at: c.created_at,
        }
    }
}

impl From<Candidate> for CandidateResponseDto {
    fn from(c: Candidate) -> Self {
        Self::from_candidate(c, age::today())
    }
}

/// Candidate list filters. Empty or missing means "Semua".
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CandidateQuery {
    /// Blok: K, L, M, N, O or P
    #[param(example = "K")]
    pub blok: Option<String>,
    /// Gender: "Laki-laki" or "Perempuan"
    #[param(example = "Perempuan")]
    pub gender: Option<String>,
}

impl CandidateQuery {
    /// Parse into a typed filter; unknown values are a validation error
    pub fn to_filter(&self) -> Result<CandidateFilter> {
        let blok = match self.blok.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<Blok>()?),
        };
        let gender = match self.gender.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<Gender>()?),
        };
        Ok(CandidateFilter { blok, gender })
    }
}

/// Option lists for building the form selects and filter bar
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptionsDto {
    pub bloks: Vec<Blok>,
    pub roles: Vec<Role>,
    pub genders: Vec<Gender>,
    pub marital_statuses: Vec<MaritalStatus>,
    pub job_statuses: Vec<JobStatus>,
}

impl OptionsDto {
    pub fn all() -> Self {
        Self {
            bloks: Blok::ALL.to_vec(),
            roles: Role::ALL.to_vec(),
            genders: Gender::ALL.to_vec(),
            marital_statuses: MaritalStatus::ALL.to_vec(),
            job_statuses: JobStatus::ALL.to_vec(),
        }
    }
}

/// Candidate form request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handlers read the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CandidateFormDto {
    #[schema(example = "Budi Santoso")]
    pub name: String,
    #[schema(example = "3201010101800001")]
    pub nik: String,
    /// Any formatting; only digits are stored
    #[schema(example = "0812-3456-789")]
    pub nomor_whatsapp: Option<String>,
    #[schema(example = "1980-01-01")]
    pub tanggal_lahir: String,
    #[schema(example = "Kawin")]
    pub status_perkawinan: String,
    #[schema(example = "Laki-laki")]
    pub gender: String,
    #[schema(example = "K")]
    pub blok: String,
    #[schema(example = "RT")]
    pub role: String,
    #[schema(example = "Bekerja")]
    pub status_pekerjaan: String,
    pub visi: Option<String>,
    pub misi: Option<String>,
    pub riwayat_organisasi: Option<String>,
    /// Profile photo (jpeg, png, gif or webp; max 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub foto_profil: Option<String>,
    /// KTP scan (jpeg, png, gif or webp; max 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub ktp: Option<String>,
}
