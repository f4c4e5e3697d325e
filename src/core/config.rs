use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
    pub election: ElectionConfig,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// S3/MinIO bucket holding candidate photos and ID scans
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint URL
    pub endpoint: String,
    /// Endpoint used when building public file URLs (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

/// Election rules that differ between deployments
#[derive(Debug, Clone)]
pub struct ElectionConfig {
    pub candidate_form: FormVariant,
}

/// Which candidate form a deployment runs.
///
/// `Editable` allows opening an existing candidate for edit and deleting it.
/// `AppendOnly` only ever inserts new candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVariant {
    #[default]
    Editable,
    AppendOnly,
}

impl FormVariant {
    pub fn allows_edit(&self) -> bool {
        matches!(self, FormVariant::Editable)
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormVariant::Editable => write!(f, "editable"),
            FormVariant::AppendOnly => write!(f, "append-only"),
        }
    }
}

impl FromStr for FormVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "editable" => Ok(FormVariant::Editable),
            "append-only" | "append_only" | "appendonly" => Ok(FormVariant::AppendOnly),
            other => Err(format!(
                "CANDIDATE_FORM_VARIANT must be 'editable' or 'append-only', got '{}'",
                other
            )),
        }
    }
}

/// Reads a setting by key. `std::env::var` in production, a map in tests.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn text(lookup: Lookup, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn non_empty(lookup: Lookup, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn number<T: FromStr>(lookup: Lookup, key: &str, default: T) -> Result<T, String> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // A missing .env is normal outside local development
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: could not read .env: {}", e);
            }
        }

        Self::load(&process_env)
    }

    fn load(lookup: Lookup) -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::load(lookup)?,
            database: DatabaseConfig::load(lookup)?,
            swagger: SwaggerConfig::load(lookup),
            storage: StorageConfig::load(lookup),
            election: ElectionConfig::load(lookup)?,
        })
    }
}

impl AppConfig {
    // Two 10MB images plus the text fields
    const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

    fn load(lookup: Lookup) -> Result<Self, String> {
        let cors_allowed_origins = text(lookup, "CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: text(lookup, "HOST", "127.0.0.1"),
            port: number(lookup, "PORT", 3000)?,
            cors_allowed_origins,
            max_request_body_size: number(lookup, "MAX_REQUEST_BODY_SIZE", Self::MAX_BODY_BYTES)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    fn load(lookup: Lookup) -> Result<Self, String> {
        let url = non_empty(lookup, "DATABASE_URL").ok_or("DATABASE_URL must be set")?;

        // A neighbourhood election sees a few dozen residents at most
        Ok(Self {
            url,
            max_connections: number(lookup, "DB_MAX_CONNECTIONS", 5)?,
            min_connections: number(lookup, "DB_MIN_CONNECTIONS", 1)?,
            acquire_timeout_secs: number(lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            idle_timeout_secs: number(lookup, "DB_IDLE_TIMEOUT_SECS", 600)?,
            max_lifetime_secs: number(lookup, "DB_MAX_LIFETIME_SECS", 1800)?,
        })
    }
}

impl SwaggerConfig {
    fn load(lookup: Lookup) -> Self {
        Self {
            username: non_empty(lookup, "SWAGGER_USERNAME"),
            password: non_empty(lookup, "SWAGGER_PASSWORD"),
            title: text(lookup, "SWAGGER_TITLE", "Rukun Regensi API"),
            version: text(lookup, "SWAGGER_VERSION", env!("CARGO_PKG_VERSION")),
            description: text(
                lookup,
                "SWAGGER_DESCRIPTION",
                "Pemilihan RT/RW Perumahan Sawangan Regensi",
            ),
        }
    }

    /// `user:pass` when both halves are configured.
    pub fn credentials(&self) -> Option<String> {
        let user = self.username.as_deref()?;
        let pass = self.password.as_deref()?;
        Some(format!("{}:{}", user, pass))
    }
}

impl StorageConfig {
    fn load(lookup: Lookup) -> Self {
        let endpoint = text(lookup, "STORAGE_ENDPOINT", "http://localhost:9000")
            .trim_end_matches('/')
            .to_string();
        let public_endpoint = non_empty(lookup, "STORAGE_PUBLIC_ENDPOINT")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| endpoint.clone());

        Self {
            endpoint,
            public_endpoint,
            access_key: text(lookup, "STORAGE_ACCESS_KEY", "minioadmin"),
            secret_key: text(lookup, "STORAGE_SECRET_KEY", "minioadmin"),
            bucket: text(lookup, "STORAGE_BUCKET", "rukun-regensi-uploads"),
            region: text(lookup, "STORAGE_REGION", "us-east-1"),
        }
    }
}

impl ElectionConfig {
    fn load(lookup: Lookup) -> Result<Self, String> {
        let candidate_form = match non_empty(lookup, "CANDIDATE_FORM_VARIANT") {
            Some(value) => value.parse()?,
            None => FormVariant::default(),
        };

        Ok(Self { candidate_form })
    }
}
