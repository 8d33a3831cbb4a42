//! A SQLite-backed sink recording what each invocation resolved.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{Result, TelemetryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS hook_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    tool_name TEXT,
    selected_path TEXT,
    fallback_level INTEGER,
    context TEXT,
    timestamp INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS path_lookups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES hook_events(id),
    path TEXT NOT NULL,
    sequence INTEGER NOT NULL,
    found INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_path_lookups_event ON path_lookups(event_id);
"#;

/// One row to be written to `hook_events`, along with every candidate path
/// tried while resolving it.
#[derive(Debug, Clone)]
pub struct HookEventRecord {
    pub session_id: String,
    pub tool_name: Option<String>,
    pub selected_path: Option<String>,
    pub fallback_level: Option<u32>,
    pub context: String,
    pub timestamp: i64,
    pub candidates: Vec<CandidateLookup>,
}

/// One candidate logical path considered for a given event, 1-based by
/// its position in `all_paths`.
#[derive(Debug, Clone)]
pub struct CandidateLookup {
    pub path: String,
    pub sequence: u32,
    pub found: bool,
}

/// An open connection to the telemetry database.
pub struct TelemetrySink {
    conn: Connection,
}

impl TelemetrySink {
    /// Opens (creating if absent) the database at `path`, applying the
    /// schema. Creates the parent directory if it doesn't exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| TelemetryError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|source| TelemetryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(SCHEMA).map_err(|source| TelemetryError::Migrate {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { conn })
    }

    /// Inserts one `hook_events` row and one `path_lookups` row per
    /// candidate, in a single transaction.
    pub fn record(&mut self, record: &HookEventRecord) -> Result<()> {
        let tx = self.conn.transaction().map_err(|source| TelemetryError::Insert { source })?;

        tx.execute(
            "INSERT INTO hook_events (session_id, tool_name, selected_path, fallback_level, context, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                record.session_id,
                record.tool_name,
                record.selected_path,
                record.fallback_level,
                record.context,
                record.timestamp,
            ],
        )
        .map_err(|source| TelemetryError::Insert { source })?;

        let event_id = tx.last_insert_rowid();

        for candidate in &record.candidates {
            tx.execute(
                "INSERT INTO path_lookups (event_id, path, sequence, found) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![event_id, candidate.path, candidate.sequence, candidate.found],
            )
            .map_err(|source| TelemetryError::Insert { source })?;
        }

        tx.commit().map_err(|source| TelemetryError::Insert { source })?;
        Ok(())
    }
}

/// Opens the sink if tracking is enabled, logging and returning `None` on
/// any failure rather than propagating it — telemetry is never fatal.
pub fn open_if_enabled(enabled: bool, path: Option<&PathBuf>, default_path: &Path) -> Option<TelemetrySink> {
    if !enabled {
        return None;
    }

    let path = path.map(PathBuf::as_path).unwrap_or(default_path);
    match TelemetrySink::open(path) {
        Ok(sink) => Some(sink),
        Err(err) => {
            tracing::warn!(error = %err, "telemetry unavailable, proceeding without tracking");
            None
        }
    }
}
