//! Host configuration schema, loading and validation.
//!
//! # Design Decisions
//! - Config is immutable once the host is built
//! - All fields have defaults so `HostConfig::default()` matches the
//!   well-known production binding (HTTP 80, HTTPS 443, all interfaces)
//! - Validation separates syntactic (serde) from semantic checks

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HostError, HostResult};

/// Configuration for the API host.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    /// Plaintext listener address.
    pub http_bind: SocketAddr,

    /// Encrypted listener address. Only bound when `tls` is present.
    pub https_bind: SocketAddr,

    /// TLS material for the encrypted listener. Provisioning the material
    /// itself is a collaborator concern; absence disables the listener.
    pub tls: Option<TlsConfig>,

    /// Path to the logging configuration file. Absence selects the default
    /// provider chain; presence installs a file-driven, live-reloaded one.
    pub logging_config: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            http_bind: "0.0.0.0:80".parse().expect("valid literal address"),
            https_bind: "0.0.0.0:443".parse().expect("valid literal address"),
            tls: None,
            logging_config: None,
        }
    }
}

/// TLS material for the HTTPS listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

/// Load and validate a host configuration from a TOML file.
pub fn load(path: &Path) -> HostResult<HostConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| HostError::Configuration(format!("failed to read {}: {e}", path.display())))?;
    let config: HostConfig = toml::from_str(&content)
        .map_err(|e| HostError::Configuration(format!("failed to parse {}: {e}", path.display())))?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks that serde cannot express.
pub fn validate(config: &HostConfig) -> HostResult<()> {
    if config.tls.is_some() && config.http_bind == config.https_bind {
        return Err(HostError::Configuration(format!(
            "http_bind and https_bind are both {}",
            config.http_bind
        )));
    }

    if let Some(tls) = &config.tls {
        if !tls.cert_path.exists() {
            return Err(HostError::Configuration(format!(
                "certificate file not found: {}",
                tls.cert_path.display()
            )));
        }
        if !tls.key_path.exists() {
            return Err(HostError::Configuration(format!(
                "private key file not found: {}",
                tls.key_path.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_well_known_ports() {
        let config = HostConfig::default();
        assert_eq!(config.http_bind.port(), 80);
        assert_eq!(config.https_bind.port(), 443);
        assert!(config.tls.is_none());
        assert!(config.logging_config.is_none());
    }

    #[test]
    fn validate_rejects_missing_tls_material() {
        let config = HostConfig {
            tls: Some(TlsConfig {
                cert_path: PathBuf::from("/nonexistent/cert.pem"),
                key_path: PathBuf::from("/nonexistent/key.pem"),
            }),
            ..HostConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(HostError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_colliding_binds() {
        let config = HostConfig {
            https_bind: "0.0.0.0:80".parse().unwrap(),
            tls: Some(TlsConfig {
                cert_path: PathBuf::from("cert.pem"),
                key_path: PathBuf::from("key.pem"),
            }),
            ..HostConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(HostError::Configuration(_))
        ));
    }
}
