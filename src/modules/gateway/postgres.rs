use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::features::candidates::models::{Candidate, CandidatePayload, ParseOptionError};
use crate::features::sarans::models::{Saran, SaranPayload};
use crate::modules::gateway::{DataGateway, GatewayError};

const CANDIDATE_COLUMNS: &str = "id, name, nik, nomor_whatsapp, tanggal_lahir, status_perkawinan, \
     gender, blok, role, status_pekerjaan, visi, misi, foto_profil_url, ktp_url, \
     riwayat_organisasi, created_at";

const SARAN_COLUMNS: &str = "id, author_name, content, created_at";

/// Raw `candidates` row; option columns are plain text until checked
#[derive(Debug, Clone, FromRow)]
struct CandidateRow {
    id: Uuid,
    name: String,
    nik: String,
    nomor_whatsapp: Option<String>,
    tanggal_lahir: NaiveDate,
    status_perkawinan: String,
    gender: String,
    blok: String,
    role: String,
    status_pekerjaan: String,
    visi: String,
    misi: String,
    foto_profil_url: Option<String>,
    ktp_url: Option<String>,
    riwayat_organisasi: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = GatewayError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = move |e: ParseOptionError| {
            GatewayError::InvalidRecord(format!("candidate {}: {}", id, e))
        };

        Ok(Candidate {
            id,
            status_perkawinan: row.status_perkawinan.parse().map_err(invalid)?,
            gender: row.gender.parse().map_err(invalid)?,
            blok: row.blok.parse().map_err(invalid)?,
            role: row.role.parse().map_err(invalid)?,
            status_pekerjaan: row.status_pekerjaan.parse().map_err(invalid)?,
            name: row.name,
            nik: row.nik,
            nomor_whatsapp: row.nomor_whatsapp,
            tanggal_lahir: row.tanggal_lahir,
            visi: row.visi,
            misi: row.misi,
            foto_profil_url: row.foto_profil_url,
            ktp_url: row.ktp_url,
            riwayat_organisasi: row.riwayat_organisasi,
            created_at: row.created_at,
        })
    }
}

/// Rows outside the closed option lists are not candidates we can show.
/// They are logged and treated as absent so list and get agree.
fn readable(row: CandidateRow) -> Option<Candidate> {
    match Candidate::try_from(row) {
        Ok(candidate) => Some(candidate),
        Err(e) => {
            tracing::warn!("Skipping candidate row: {}", e);
            None
        }
    }
}

/// [`DataGateway`] backed by the hosted Postgres database
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataGateway for PgGateway {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM candidates ORDER BY created_at DESC",
            CANDIDATE_COLUMNS
        );
        let rows = sqlx::query_as::<_, CandidateRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list candidates: {:?}", e);
                GatewayError::from(e)
            })?;

        Ok(rows.into_iter().filter_map(readable).collect())
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, GatewayError> {
        let sql = format!("SELECT {} FROM candidates WHERE id = $1", CANDIDATE_COLUMNS);
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(readable))
    }

    async fn insert_candidate(
        &self,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        let sql = format!(
            r#"
            INSERT INTO candidates (
                name, nik, nomor_whatsapp, tanggal_lahir, status_perkawinan, gender, blok,
                role, status_pekerjaan, visi, misi, foto_profil_url, ktp_url, riwayat_organisasi
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        );
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(&payload.name)
            .bind(&payload.nik)
            .bind(&payload.nomor_whatsapp)
            .bind(payload.tanggal_lahir)
            .bind(payload.status_perkawinan.as_str())
            .bind(payload.gender.as_str())
            .bind(payload.blok.as_str())
            .bind(payload.role.as_str())
            .bind(payload.status_pekerjaan.as_str())
            .bind(&payload.visi)
            .bind(&payload.misi)
            .bind(&payload.foto_profil_url)
            .bind(&payload.ktp_url)
            .bind(&payload.riwayat_organisasi)
            .fetch_one(&self.pool)
            .await?;

        let candidate = Candidate::try_from(row)?;
        tracing::info!(
            "Candidate created: id={}, blok={}, role={}",
            candidate.id,
            candidate.blok,
            candidate.role
        );
        Ok(candidate)
    }

    async fn update_candidate(
        &self,
        id: Uuid,
        payload: &CandidatePayload,
    ) -> Result<Candidate, GatewayError> {
        let sql = format!(
            r#"
            UPDATE candidates SET
                name = $2, nik = $3, nomor_whatsapp = $4, tanggal_lahir = $5,
                status_perkawinan = $6, gender = $7, blok = $8, role = $9,
                status_pekerjaan = $10, visi = $11, misi = $12, foto_profil_url = $13,
                ktp_url = $14, riwayat_organisasi = $15
            WHERE id = $1
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        );
        let row = sqlx::query_as::<_, CandidateRow>(&sql)
            .bind(id)
            .bind(&payload.name)
            .bind(&payload.nik)
            .bind(&payload.nomor_whatsapp)
            .bind(payload.tanggal_lahir)
            .bind(payload.status_perkawinan.as_str())
            .bind(payload.gender.as_str())
            .bind(payload.blok.as_str())
            .bind(payload.role.as_str())
            .bind(payload.status_pekerjaan.as_str())
            .bind(&payload.visi)
            .bind(&payload.misi)
            .bind(&payload.foto_profil_url)
            .bind(&payload.ktp_url)
            .bind(&payload.riwayat_organisasi)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GatewayError::NotFound(id))?;

        tracing::info!("Candidate updated: id={}", id);
        Candidate::try_from(row)
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<(), GatewayError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::NotFound(id));
        }

        tracing::info!("Candidate deleted: id={}", id);
        Ok(())
    }

    async fn list_sarans(&self) -> Result<Vec<Saran>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM sarans ORDER BY created_at DESC",
            SARAN_COLUMNS
        );
        let sarans = sqlx::query_as::<_, Saran>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list sarans: {:?}", e);
                GatewayError::from(e)
            })?;

        Ok(sarans)
    }

    async fn insert_saran(&self, payload: &SaranPayload) -> Result<Saran, GatewayError> {
        let sql = format!(
            "INSERT INTO sarans (author_name, content) VALUES ($1, $2) RETURNING {}",
            SARAN_COLUMNS
        );
        let saran = sqlx::query_as::<_, Saran>(&sql)
            .bind(&payload.author_name)
            .bind(&payload.content)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("Saran created: id={}", saran.id);
        Ok(saran)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gender: &str, blok: &str) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            name: "Siti Aminah".to_string(),
            nik: "3276010101900001".to_string(),
            nomor_whatsapp: Some("081234567890".to_string()),
            tanggal_lahir: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            status_perkawinan: "Kawin".to_string(),
            gender: gender.to_string(),
            blok: blok.to_string(),
            role: "RW".to_string(),
            status_pekerjaan: "Bekerja".to_string(),
            visi: String::new(),
            misi: String::new(),
            foto_profil_url: None,
            ktp_url: None,
            riwayat_organisasi: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        use crate::features::candidates::models::{Blok, Gender, Role};

        let candidate = Candidate::try_from(row("Perempuan", "M")).unwrap();
        assert_eq!(candidate.gender, Gender::Perempuan);
        assert_eq!(candidate.blok, Blok::M);
        assert_eq!(candidate.role, Role::Rw);
    }

    #[test]
    fn test_row_with_unknown_option_is_rejected() {
        let err = Candidate::try_from(row("Perempuan", "Z")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRecord(ref msg) if msg.contains("'Z'")));
    }

    #[test]
    fn test_unreadable_row_is_treated_as_absent() {
        assert!(readable(row("Perempuan", "Z")).is_none());
        assert!(readable(row("Alien", "K")).is_none());
        assert!(readable(row("Laki-laki", "K")).is_some());
    }
}
