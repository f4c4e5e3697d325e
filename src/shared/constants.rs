/// Author stored for a saran submitted without a name
pub const DEFAULT_SARAN_AUTHOR: &str = "Warga";

// =============================================================================
// IMAGE UPLOADS
// =============================================================================

/// Bucket folder for candidate profile photos
pub const FOTO_PROFIL_FOLDER: &str = "foto-profil";

/// Bucket folder for candidate ID card (KTP) scans
pub const KTP_FOLDER: &str = "ktp";

/// Extension used when the uploaded filename has none
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Maximum size of a single uploaded image (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Image types accepted for profile photos and KTP scans
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];
