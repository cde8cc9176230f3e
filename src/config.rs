//! Environment-driven configuration
//!
//! All settings come from environment variables (a `.env` file is loaded by
//! the binary via `dotenvy` before this runs). The two credentials are
//! required; everything else has a default.

use crate::error::{Error, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub firestore: FirestoreConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig::default().from_env(),
            gemini: GeminiConfig::from_env()?,
            firestore: FirestoreConfig::from_env()?,
        })
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Cap on the multipart request body, which bounds the uploaded image
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            max_upload_bytes: 8 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Override defaults with environment variables if present
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("MATHSOLVER_HOST") {
            self.host = val;
        }

        if let Ok(val) = std::env::var("MATHSOLVER_PORT") {
            if let Ok(port) = val.parse() {
                self.port = port;
            }
        }

        if let Ok(val) = std::env::var("MATHSOLVER_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = val.parse() {
                self.max_upload_bytes = bytes;
            }
        }

        self
    }
}

/// Gemini inference client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent as the `x-goog-api-key` header
    pub api_key: SecretString,

    /// Model name, e.g. `gemini-1.5-flash`
    pub model: String,

    /// API origin, overridable for tests
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl GeminiConfig {
    /// Load configuration from environment variables
    ///
    /// `GOOGLE_API_KEY` is required; the rest fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| Error::Config("GOOGLE_API_KEY is not set".to_string()))?;

        let mut config = Self {
            api_key: SecretString::new(api_key),
            model: default_model(),
            base_url: default_gemini_base_url(),
            timeout_ms: 30_000,
        };

        if let Ok(val) = std::env::var("GEMINI_MODEL") {
            config.model = val;
        }

        if let Ok(val) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = val.trim_end_matches('/').to_string();
        }

        if let Ok(val) = std::env::var("GEMINI_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                config.timeout_ms = timeout;
            }
        }

        Ok(config)
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Firestore recorder configuration
///
/// The project id is not configured here; it is read from the service
/// account key file at startup.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Path to the service account JSON key file
    pub credentials_path: PathBuf,

    /// API origin, overridable for tests
    pub base_url: String,

    /// Collection that receives one document per submission
    pub collection: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_collection() -> String {
    "responses".to_string()
}

impl FirestoreConfig {
    /// Load configuration from environment variables
    ///
    /// `FIREBASE_CREDENTIALS` is required; the rest fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let credentials_path = std::env::var("FIREBASE_CREDENTIALS")
            .map_err(|_| Error::Config("FIREBASE_CREDENTIALS is not set".to_string()))?;

        let mut config = Self {
            credentials_path: PathBuf::from(credentials_path),
            base_url: default_firestore_base_url(),
            collection: default_collection(),
            timeout_ms: 10_000,
        };

        if let Ok(val) = std::env::var("FIRESTORE_BASE_URL") {
            config.base_url = val.trim_end_matches('/').to_string();
        }

        if let Ok(val) = std::env::var("FIRESTORE_COLLECTION") {
            config.collection = val;
        }

        if let Ok(val) = std::env::var("FIRESTORE_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                config.timeout_ms = timeout;
            }
        }

        Ok(config)
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
