use axum_test::multipart::MultipartForm;
use chrono::{NaiveDate, Utc};
use fake::faker::name::en::Name;
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use uuid::Uuid;

use crate::features::candidates::form::{CandidateDraft, ImageUpload};
use crate::features::candidates::models::{
    Blok, Candidate, CandidatePayload, Gender, JobStatus, MaritalStatus, Role,
};
use crate::features::candidates::services::CandidateSubmission;

/// Smallest valid PNG: signature plus an IHDR chunk header
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52,
];

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn fake_nik() -> String {
    NumberWithFormat("################").fake()
}

pub fn candidate_payload(
    blok: Blok,
    gender: Gender,
    year: i32,
    month: u32,
    day: u32,
) -> CandidatePayload {
    CandidatePayload {
        name: Name().fake(),
        nik: fake_nik(),
        nomor_whatsapp: None,
        tanggal_lahir: date(year, month, day),
        status_perkawinan: MaritalStatus::Kawin,
        gender,
        blok,
        role: Role::Rt,
        status_pekerjaan: JobStatus::Bekerja,
        visi: "Lingkungan aman dan rukun".to_string(),
        misi: "Ronda malam bergilir".to_string(),
        foto_profil_url: None,
        ktp_url: None,
        riwayat_organisasi: None,
    }
}

pub fn candidate(blok: Blok, gender: Gender, year: i32, month: u32, day: u32) -> Candidate {
    candidate_payload(blok, gender, year, month, day).into_candidate(Uuid::new_v4(), Utc::now())
}

pub fn sample_draft() -> CandidateDraft {
    CandidateDraft {
        name: Name().fake(),
        nik: fake_nik(),
        tanggal_lahir: date(1985, 4, 21),
        blok: Blok::M,
        ..CandidateDraft::default()
    }
}

pub fn png_upload(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        data: PNG_BYTES.to_vec(),
    }
}

/// Service-level form submission with the required fields filled in
pub fn submission(name: &str, blok: &str) -> CandidateSubmission {
    CandidateSubmission {
        fields: vec![
            ("name".to_string(), name.to_string()),
            ("nik".to_string(), fake_nik()),
            ("tanggal_lahir".to_string(), "1985-04-21".to_string()),
            ("blok".to_string(), blok.to_string()),
            ("gender".to_string(), "Perempuan".to_string()),
        ],
        ..Default::default()
    }
}

/// Multipart candidate form as a browser would send it
pub fn candidate_form(name: &str, blok: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name.to_string())
        .add_text("nik", fake_nik())
        .add_text("nomor_whatsapp", "0812-3456-789")
        .add_text("tanggal_lahir", "1985-04-21")
        .add_text("status_perkawinan", "Belum Kawin")
        .add_text("gender", "Perempuan")
        .add_text("blok", blok.to_string())
        .add_text("role", "RT")
        .add_text("status_pekerjaan", "Pelajar/Mahasiswa")
        .add_text("visi", "Warga guyub")
        .add_text("misi", "Kerja bakti rutin")
}
