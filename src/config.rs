use serde::Deserialize;
use std::time::Duration;

use crate::naming::NamingStrategy;

/// Main configuration for the media gateway
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
    /// S3 configuration
    pub s3: S3Config,
    /// Upload handling configuration
    #[serde(default)]
    pub upload: UploadConfig,
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name for logging
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// S3 storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// S3 bucket name holding the uploaded assets
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Backend endpoint as host:port (for MinIO, LocalStack, etc.)
    pub endpoint: Option<String>,
    /// Whether to reach the endpoint over TLS
    #[serde(default)]
    pub use_ssl: bool,
    /// Static access key for the backend
    pub access_key_id: Option<String>,
    /// Static secret key for the backend
    pub secret_access_key: Option<String>,
    /// Force path-style access (required for MinIO)
    #[serde(default = "default_true")]
    pub force_path_style: bool,
    /// Presigned URL expiration in seconds
    #[serde(default = "default_presigned_url_expiry_secs")]
    pub presigned_url_expiry_secs: u64,
}

impl S3Config {
    /// Full endpoint URL derived from the host:port and TLS flag.
    pub fn endpoint_url(&self) -> Option<String> {
        self.endpoint.as_ref().map(|host| {
            let scheme = if self.use_ssl { "https" } else { "http" };
            format!("{scheme}://{host}")
        })
    }
}

/// Upload handling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted upload payload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// How storage keys are derived from incoming filenames
    #[serde(default)]
    pub naming: NamingStrategy,
}

/// API configuration for the HTTP surface
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API listen address
    #[serde(default = "default_api_host")]
    pub host: String,
    /// API listen port
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Allowed CORS origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

// Default value functions
fn default_service_name() -> String {
    "media-gateway".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_presigned_url_expiry_secs() -> u64 {
    86400 // 24 hours
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024 // 100MB
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("service.name", "media-gateway")?
            .set_default("service.log_level", "info")?
            // Add config file if present
            .add_source(config::File::with_name("config/gateway").required(false))
            .add_source(config::File::with_name("/etc/media-gateway/gateway").required(false))
            // Override with environment variables
            // GATEWAY__S3__BUCKET -> s3.bucket
            .add_source(
                config::Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(Into::into)
    }

    /// Get presigned URL expiry as Duration
    pub fn presigned_url_expiry(&self) -> Duration {
        Duration::from_secs(self.s3.presigned_url_expiry_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            naming: NamingStrategy::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_presigned_url_expiry_secs(), 86400);
        assert_eq!(default_api_port(), 8080);
        assert!(default_true());
    }

    #[test]
    fn test_endpoint_url_scheme() {
        let mut s3 = S3Config {
            bucket: "assets".to_string(),
            region: default_region(),
            endpoint: Some("minio.local:9000".to_string()),
            use_ssl: false,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: true,
            presigned_url_expiry_secs: 86400,
        };

        assert_eq!(
            s3.endpoint_url().as_deref(),
            Some("http://minio.local:9000")
        );

        s3.use_ssl = true;
        assert_eq!(
            s3.endpoint_url().as_deref(),
            Some("https://minio.local:9000")
        );

        s3.endpoint = None;
        assert_eq!(s3.endpoint_url(), None);
    }
}
