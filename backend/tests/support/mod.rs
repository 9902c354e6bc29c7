//! Shared helpers for the backend integration suites.

pub mod cluster_skip;

use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};

pub use cluster_skip::handle_cluster_setup_failure;

fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the library spawns threads; the shared cluster
        // singleton serialises callers.
        unsafe {
            std::env::set_var("PG_PASSWORD", "bookbyte_embedded_test");
        }
    }
}

/// Process-wide embedded cluster.
pub fn shared_cluster() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
}

/// Fresh, empty database on the shared cluster; dropped with the guard.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster().map_err(|err| err.to_string())?;
    cluster
        .temporary_database(format!("bookbyte_test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create temporary database: {err:?}"))
}
