//! Liveness of the database and media storage.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use vidhub_core::traits::storage::StorageProvider;
use vidhub_database::DatabasePool;

/// Dependency status reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub storage: &'static str,
}

impl HealthReport {
    /// Whether every dependency is reachable.
    pub fn is_healthy(&self) -> bool {
        self.status == "OK"
    }
}

/// Probes backing services.
#[derive(Debug, Clone)]
pub struct HealthService {
    db: DatabasePool,
    storage: Arc<dyn StorageProvider>,
}

impl HealthService {
    /// Creates a new health service.
    pub fn new(db: DatabasePool, storage: Arc<dyn StorageProvider>) -> Self {
        Self { db, storage }
    }

    /// Probe the database and storage.
    pub async fn check(&self) -> HealthReport {
        let database = match self.db.health_check().await {
            Ok(true) => true,
            Ok(false) => false,
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                false
            }
        };
        let storage = match self.storage.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                false
            }
        };
        HealthReport::from_checks(database, storage)
    }
}

impl HealthReport {
    fn from_checks(database: bool, storage: bool) -> Self {
        let label = |up: bool| if up { "connected" } else { "unavailable" };
        Self {
            status: if database && storage { "OK" } else { "DEGRADED" },
            database: label(database),
            storage: label(storage),
        }
    }
}
