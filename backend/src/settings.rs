//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `CRM_*` environment variables over an optional
//! config file. [`CrmSettings`] is the raw, all-optional shape the loader
//! fills; [`CrmSettings::resolve`] applies defaults and validation and yields
//! the [`AppSettings`] the binary runs with.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::DEFAULT_TOKEN_TTL;
use crate::inbound::http::pictures::DEFAULT_MAX_UPLOAD_BYTES;
use crate::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_IMAGES_DIR: &str = "img";
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Errors raised while loading or validating settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    #[error("missing required setting {key}")]
    Missing { key: &'static str },
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Raw configuration as read by the loader.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRM")]
pub struct CrmSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: Option<String>,
    /// Listen address; defaults to all interfaces.
    pub host: Option<String>,
    /// Listen port; defaults to 8080.
    pub port: Option<u16>,
    /// Directory uploads are written to and `/static/` is served from.
    pub images_dir: Option<PathBuf>,
    /// Optional directory served at `/`.
    pub public_dir: Option<PathBuf>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Password for the seeded `Admin` account; no seeding when unset.
    pub admin_password: Option<String>,
    /// Largest accepted picture upload in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
}

/// Validated settings with defaults applied.
#[derive(Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt_secret: Zeroizing<String>,
    pub bind_addr: SocketAddr,
    pub images_dir: PathBuf,
    pub public_dir: Option<PathBuf>,
    pub bcrypt_cost: u32,
    pub admin_password: Option<Zeroizing<String>>,
    pub max_upload_bytes: usize,
    pub token_ttl: Duration,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("images_dir", &self.images_dir)
            .field("public_dir", &self.public_dir)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("admin_seeded", &self.admin_password.is_some())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, SettingsError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(SettingsError::Missing { key })
}

impl CrmSettings {
    /// Apply defaults and validate.
    pub fn resolve(self) -> Result<AppSettings, SettingsError> {
        let database_url = required(self.database_url, "database_url")?;
        let jwt_secret = Zeroizing::new(required(self.jwt_secret, "jwt_secret")?);

        let ip = match self.host.as_deref() {
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Some(host) => host.parse().map_err(|err: std::net::AddrParseError| {
                SettingsError::Invalid {
                    key: "host",
                    message: err.to_string(),
                }
            })?,
        };
        let bind_addr = SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT));

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(SettingsError::Invalid {
                key: "bcrypt_cost",
                message: format!("{bcrypt_cost} is outside 4..=31"),
            });
        }

        let max_upload_bytes = self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes == 0 {
            return Err(SettingsError::Invalid {
                key: "max_upload_bytes",
                message: "must be positive".to_owned(),
            });
        }

        let token_ttl_secs = self
            .token_ttl_secs
            .unwrap_or(DEFAULT_TOKEN_TTL.as_secs());
        if token_ttl_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "token_ttl_secs",
                message: "must be positive".to_owned(),
            });
        }

        Ok(AppSettings {
            database_url,
            jwt_secret,
            bind_addr,
            images_dir: self
                .images_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            public_dir: self.public_dir,
            bcrypt_cost,
            admin_password: self.admin_password.map(Zeroizing::new),
            max_upload_bytes,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

/// Load from process arguments and environment, then validate.
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    CrmSettings::load()
        .map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })?
        .resolve()
}
