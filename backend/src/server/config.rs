//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crm_backend::outbound::persistence::DbPool;
use crm_backend::settings::AppSettings;
use zeroize::Zeroizing;

/// Everything the server needs once settings are resolved and the database is
/// reachable.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) jwt_secret: Zeroizing<String>,
    pub(crate) token_ttl: Duration,
    pub(crate) bcrypt_cost: u32,
    pub(crate) images_dir: PathBuf,
    pub(crate) public_dir: Option<PathBuf>,
    pub(crate) max_upload_bytes: usize,
    pub(crate) admin_password: Option<Zeroizing<String>>,
}

impl ServerConfig {
    /// Build the configuration from validated settings and a live pool.
    #[must_use]
    pub fn new(settings: AppSettings, db_pool: DbPool) -> Self {
        let AppSettings {
            database_url: _,
            jwt_secret,
            bind_addr,
            images_dir,
            public_dir,
            bcrypt_cost,
            admin_password,
            max_upload_bytes,
            token_ttl,
        } = settings;
        Self {
            bind_addr,
            db_pool,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
            images_dir,
            public_dir,
            max_upload_bytes,
            admin_password,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
