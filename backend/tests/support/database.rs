//! A migrated temporary database plus the runtime used to drive it.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use tokio::runtime::Runtime;

use crm_backend::outbound::persistence::{DbPool, PoolConfig};

use super::{provision_template_database, shared_cluster};

/// Database handle for one test. Dropping it drops the database.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    /// Clone the migrated template and open a small pool against it.
    ///
    /// Must be called outside a Tokio runtime; the cluster helpers block.
    pub fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster)?;

        let config = PoolConfig::new(database.url().to_string())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            _database: database,
        })
    }

    /// Drive `future` to completion on this database's runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
