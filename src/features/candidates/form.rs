//! Candidate form controller.
//!
//! Holds the draft while the modal is open and turns it into gateway calls
//! on submit: optional image uploads first, then one insert or update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;
use validator::Validate;

use crate::core::config::FormVariant;
use crate::core::error::{AppError, Result};
use crate::features::candidates::age;
use crate::features::candidates::models::{
    Blok, Candidate, CandidatePayload, Gender, JobStatus, MaritalStatus, Role,
};
use crate::modules::gateway::DataGateway;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::{DEFAULT_IMAGE_EXTENSION, FOTO_PROFIL_FOLDER, KTP_FOLDER};
use crate::shared::submit_guard::SubmitGuard;
use crate::shared::validation::{blank_to_none, normalize_whatsapp, not_blank};

/// Format of `tanggal_lahir` in form input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mutable form values; what the resident is typing before anything is saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CandidateDraft {
    #[validate(
        custom(function = "not_blank", message = "Nama wajib diisi"),
        length(max = 255, message = "Nama maksimal 255 karakter")
    )]
    pub name: String,
    pub nik: String,
    /// Kept exactly as typed; digits are extracted only when saving
    pub nomor_whatsapp: String,
    pub tanggal_lahir: NaiveDate,
    pub status_perkawinan: MaritalStatus,
    pub gender: Gender,
    pub blok: Blok,
    pub role: Role,
    pub status_pekerjaan: JobStatus,
    pub visi: String,
    pub misi: String,
    pub foto_profil_url: String,
    pub ktp_url: String,
    pub riwayat_organisasi: String,
}

impl Default for CandidateDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            nik: String::new(),
            nomor_whatsapp: String::new(),
            tanggal_lahir: age::today(),
            status_perkawinan: MaritalStatus::default(),
            gender: Gender::default(),
            blok: Blok::default(),
            role: Role::default(),
            status_pekerjaan: JobStatus::default(),
            visi: String::new(),
            misi: String::new(),
            foto_profil_url: String::new(),
            ktp_url: String::new(),
            riwayat_organisasi: String::new(),
        }
    }
}

impl From<&Candidate> for CandidateDraft {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            nik: candidate.nik.clone(),
            nomor_whatsapp: candidate.nomor_whatsapp.clone().unwrap_or_default(),
            tanggal_lahir: candidate.tanggal_lahir,
            status_perkawinan: candidate.status_perkawinan,
            gender: candidate.gender,
            blok: candidate.blok,
            role: candidate.role,
            status_pekerjaan: candidate.status_pekerjaan,
            visi: candidate.visi.clone(),
            misi: candidate.misi.clone(),
            foto_profil_url: candidate.foto_profil_url.clone().unwrap_or_default(),
            ktp_url: candidate.ktp_url.clone().unwrap_or_default(),
            riwayat_organisasi: candidate.riwayat_organisasi.clone().unwrap_or_default(),
        }
    }
}

impl CandidateDraft {
    /// Apply one raw form input by field name.
    ///
    /// Returns `Ok(false)` for names that are not candidate fields. The image
    /// URLs are not settable here; they only change through an upload.
    pub fn set_field(&mut self, field: &str, value: String) -> Result<bool> {
        match field {
            "name" => self.name = value,
            "nik" => self.nik = value,
            "nomor_whatsapp" => self.nomor_whatsapp = value,
            "tanggal_lahir" => {
                self.tanggal_lahir = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
                    .map_err(|_| {
                        AppError::Validation(format!(
                            "'{}' is not a valid tanggal lahir (expected YYYY-MM-DD)",
                            value
                        ))
                    })?
            }
            "status_perkawinan" => self.status_perkawinan = value.parse()?,
            "gender" => self.gender = value.parse()?,
            "blok" => self.blok = value.parse()?,
            "role" => self.role = value.parse()?,
            "status_pekerjaan" => self.status_pekerjaan = value.parse()?,
            "visi" => self.visi = value,
            "misi" => self.misi = value,
            "riwayat_organisasi" => self.riwayat_organisasi = value,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Build the write record; WhatsApp is reduced to digits here and nowhere else
    fn to_payload(
        &self,
        foto_profil_url: Option<String>,
        ktp_url: Option<String>,
    ) -> CandidatePayload {
        CandidatePayload {
            name: self.name.trim().to_string(),
            nik: self.nik.trim().to_string(),
            nomor_whatsapp: blank_to_none(&normalize_whatsapp(&self.nomor_whatsapp)),
            tanggal_lahir: self.tanggal_lahir,
            status_perkawinan: self.status_perkawinan,
            gender: self.gender,
            blok: self.blok,
            role: self.role,
            status_pekerjaan: self.status_pekerjaan,
            visi: self.visi.clone(),
            misi: self.misi.clone(),
            foto_profil_url,
            ktp_url,
            riwayat_organisasi: blank_to_none(&self.riwayat_organisasi),
        }
    }
}

/// The two image slots on the candidate form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    FotoProfil,
    Ktp,
}

impl ImageKind {
    /// Bucket folder for this kind of image
    pub fn folder(&self) -> &'static str {
        match self {
            ImageKind::FotoProfil => FOTO_PROFIL_FOLDER,
            ImageKind::Ktp => KTP_FOLDER,
        }
    }

    /// Multipart field name carrying the file
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "foto_profil" => Some(ImageKind::FotoProfil),
            "ktp" => Some(ImageKind::Ktp),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageKind::FotoProfil => "foto profil",
            ImageKind::Ktp => "KTP",
        }
    }
}

/// A locally selected file waiting for submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Extension of the original filename, `jpg` when there is none
    pub fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => DEFAULT_IMAGE_EXTENSION,
        }
    }

    /// Fresh object key: `<folder>/<uuid>.<ext>`
    pub fn object_key(&self, kind: ImageKind) -> String {
        format!("{}/{}.{}", kind.folder(), Uuid::new_v4(), self.extension())
    }
}

/// Upload one image and return its public URL
async fn upload_image(
    storage: &dyn ObjectStorage,
    kind: ImageKind,
    image: &ImageUpload,
) -> Result<String> {
    let key = image.object_key(kind);
    storage
        .upload(&key, image.data.clone(), &image.content_type)
        .await?;
    debug!("Uploaded {} to '{}'", kind.label(), key);
    Ok(storage.public_url(&key))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(Uuid),
}

/// Candidate create/edit modal
#[derive(Debug, Clone)]
pub struct CandidateForm {
    variant: FormVariant,
    mode: FormMode,
    pub draft: CandidateDraft,
    foto_profil: Option<ImageUpload>,
    ktp: Option<ImageUpload>,
    submitting: bool,
}

impl CandidateForm {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            mode: FormMode::Closed,
            draft: CandidateDraft::default(),
            foto_profil: None,
            ktp: None,
            submitting: false,
        }
    }

    /// Open for create (`None`) or for editing an existing candidate.
    ///
    /// Create resets the draft to defaults; edit copies every field of the
    /// candidate and remembers its id. Pending files are always dropped.
    pub fn open(&mut self, candidate: Option<&Candidate>) -> Result<()> {
        match candidate {
            None => {
                self.draft = CandidateDraft::default();
                self.mode = FormMode::Create;
            }
            Some(candidate) => {
                if !self.variant.allows_edit() {
                    return Err(AppError::Forbidden(
                        "Candidates cannot be edited in this deployment".to_string(),
                    ));
                }
                self.draft = CandidateDraft::from(candidate);
                self.mode = FormMode::Edit(candidate.id);
            }
        }
        self.foto_profil = None;
        self.ktp = None;
        Ok(())
    }

    /// Select a new local file for one of the image slots
    pub fn attach(&mut self, kind: ImageKind, image: ImageUpload) {
        match kind {
            ImageKind::FotoProfil => self.foto_profil = Some(image),
            ImageKind::Ktp => self.ktp = Some(image),
        }
    }

    /// Persist the draft: insert in create mode, full update in edit mode.
    ///
    /// Fails without any gateway call when the form is closed, the draft is
    /// invalid, or another submit is still running. An upload failure aborts
    /// before the write. `submitting` is released on every exit path and the
    /// draft is left untouched so the resident can retry.
    pub async fn submit(
        &mut self,
        gateway: &dyn DataGateway,
        storage: &dyn ObjectStorage,
    ) -> Result<Candidate> {
        let mode = self.mode;
        if mode == FormMode::Closed {
            return Err(AppError::BadRequest(
                "Candidate form is not open".to_string(),
            ));
        }
        let _submitting = SubmitGuard::acquire(&mut self.submitting, "candidate")?;
        let result = Self::persist(
            mode,
            &self.draft,
            self.foto_profil.as_ref(),
            self.ktp.as_ref(),
            gateway,
            storage,
        )
        .await;

        if let Err(ref e) = result {
            error!("Failed to save candidate: {}", e);
        }
        result
    }

    async fn persist(
        mode: FormMode,
        draft: &CandidateDraft,
        foto_profil: Option<&ImageUpload>,
        ktp: Option<&ImageUpload>,
        gateway: &dyn DataGateway,
        storage: &dyn ObjectStorage,
    ) -> Result<Candidate> {
        draft
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let foto_profil_url = match foto_profil {
            Some(image) => Some(upload_image(storage, ImageKind::FotoProfil, image).await?),
            None => blank_to_none(&draft.foto_profil_url),
        };
        let ktp_url = match ktp {
            Some(image) => Some(upload_image(storage, ImageKind::Ktp, image).await?),
            None => blank_to_none(&draft.ktp_url),
        };

        let payload = draft.to_payload(foto_profil_url, ktp_url);
        let candidate = match mode {
            FormMode::Edit(id) => gateway.update_candidate(id, &payload).await?,
            _ => gateway.insert_candidate(&payload).await?,
        };

        info!(
            "Candidate saved: id={}, mode={:?}, blok={}",
            candidate.id, mode, candidate.blok
        );
        Ok(candidate)
    }
}

// Modal interactions driven by the page controller. The HTTP handlers open a
// fresh form per request and delete through the gateway directly.
#[cfg_attr(not(test), allow(dead_code))]
impl CandidateForm {
    /// Close the modal and reset the draft
    pub fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = CandidateDraft::default();
        self.foto_profil = None;
        self.ktp = None;
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Delete the candidate being edited. Only valid in edit mode.
    pub async fn delete(&mut self, gateway: &dyn DataGateway) -> Result<Uuid> {
        let id = match self.mode {
            FormMode::Edit(id) => id,
            _ => {
                return Err(AppError::BadRequest(
                    "Only a candidate opened for edit can be deleted".to_string(),
                ))
            }
        };
        let _submitting = SubmitGuard::acquire(&mut self.submitting, "candidate")?;
        let result = gateway.delete_candidate(id).await.map_err(AppError::from);

        match result {
            Ok(()) => Ok(id),
            Err(e) => {
                error!("Failed to delete candidate {}: {}", id, e);
                Err(e)
            }
        }
    }
}
