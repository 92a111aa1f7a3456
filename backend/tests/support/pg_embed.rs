//! Embedded PostgreSQL for the Diesel adapter tests.
//!
//! One cluster is shared by the whole test binary. A template database
//! carrying the embedded migrations is created once per migration set; each
//! test then gets a private clone of it, so rows never leak between tests.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default. When
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset, both are pointed at unique
//! directories under the target directory for the duration of the bootstrap.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use standup::outbound::persistence::MIGRATIONS;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_PREFIX: &str = "standup_template";
const CLONE_RETRIES: usize = 5;
const CLONE_RETRY_DELAY: Duration = Duration::from_millis(500);

fn lock(cell: &'static OnceLock<Mutex<()>>) -> MutexGuard<'static, ()> {
    cell.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner())
}

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"));
    let base = target
        .join("pg-embed")
        .join(format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

/// The cluster shared by every test in this binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _bootstrap = lock(&BOOTSTRAP_LOCK);
    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };
    shared_cluster_handle().map_err(|err| format!("{err:?}"))
}

fn template_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_PREFIX}_{short}"))
}

/// Create the migrated template unless an earlier test already did.
fn ensure_template(cluster: &ClusterHandle) -> Result<String, String> {
    let name = template_name()?;
    let _template = lock(&TEMPLATE_LOCK);
    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        let mut conn =
            PgConnection::establish(&url).map_err(|err| format!("connect to template: {err}"))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(name)
}

/// A private, migrated database for one test.
pub fn fresh_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let mut last_error = String::new();
    for attempt in 1..=CLONE_RETRIES {
        let cloned = ensure_template(cluster).and_then(|template| {
            cluster
                .temporary_database_from_template(
                    format!("test_{}", Uuid::new_v4()).as_str(),
                    template.as_str(),
                )
                .map_err(|err| format!("clone template: {err:?}"))
        });
        match cloned {
            Ok(database) => return Ok(database),
            Err(err) => last_error = format!("attempt {attempt}/{CLONE_RETRIES}: {err}"),
        }
        if attempt < CLONE_RETRIES {
            std::thread::sleep(CLONE_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Run raw SQL against `url` on a short-lived synchronous connection.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.batch_execute(sql).map_err(|err| format!("execute: {err}"))
}

/// `None` when `SKIP_TEST_CLUSTER` is truthy; panics otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
