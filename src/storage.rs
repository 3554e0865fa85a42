//! Local persistence for session preferences and the audit trail.
//!
//! This is ephemeral convenience state (the browser-localStorage analog),
//! not durable storage: losing the file only resets the UI defaults.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::model::{AuditEntry, DomainName, Role};
use crate::session::SessionPrefs;

pub struct SessionDb {
    conn: Connection,
}

impl SessionDb {
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self { conn: Connection::open(path)? })
    }

    pub fn init(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS session_prefs (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                domain TEXT NOT NULL,
                role TEXT NOT NULL,
                sidebar_collapsed INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS audit_log (
                id TEXT PRIMARY KEY,
                ts TEXT NOT NULL,
                action TEXT NOT NULL,
                role TEXT NOT NULL,
                entity_kind TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                details TEXT NOT NULL
            );
            COMMIT;",
        )?;
        Ok(())
    }

    pub fn persist_prefs(&mut self, prefs: &SessionPrefs, now: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session_prefs (id, domain, role, sidebar_collapsed, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                domain = excluded.domain,
                role = excluded.role,
                sidebar_collapsed = excluded.sidebar_collapsed,
                updated_at = excluded.updated_at",
            params![
                prefs.domain.as_str(),
                prefs.role.as_str(),
                prefs.sidebar_collapsed as i64,
                now
            ],
        )?;
        Ok(())
    }

    /// Returns the stored prefs, or `None` on first run or when the stored
    /// names no longer parse (stale rows are ignored, not errors).
    pub fn load_prefs(&self) -> Result<Option<SessionPrefs>> {
        let row: Option<(String, String, i64)> = self
            .conn
            .query_row(
                "SELECT domain, role, sidebar_collapsed FROM session_prefs WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(row.and_then(|(domain, role, collapsed)| {
            Some(SessionPrefs {
                domain: DomainName::parse(&domain)?,
                role: Role::parse(&role)?,
                sidebar_collapsed: collapsed != 0,
            })
        }))
    }

    pub fn persist_audit(&mut self, entries: &[AuditEntry]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for entry in entries {
            tx.execute(
                "INSERT OR IGNORE INTO audit_log (id, ts, action, role, entity_kind, entity_id, details)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.timestamp,
                    entry.action,
                    entry.role.as_str(),
                    entry.entity_kind.as_str(),
                    entry.entity_id,
                    entry.details.to_string()
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn audit_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuditEntityKind;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_db(dir: &TempDir) -> SessionDb {
        let path = dir.path().join("session.sqlite");
        let mut db = SessionDb::new(path.to_str().unwrap()).unwrap();
        db.init().unwrap();
        db
    }

    #[test]
    fn prefs_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut db = open_db(&dir);

        assert!(db.load_prefs().unwrap().is_none());

        let prefs = SessionPrefs {
            domain: DomainName::Healthcare,
            role: Role::GovernanceLead,
            sidebar_collapsed: true,
        };
        db.persist_prefs(&prefs, "2025-11-20T00:00:00Z").unwrap();
        let loaded = db.load_prefs().unwrap().unwrap();
        assert_eq!(loaded.domain, DomainName::Healthcare);
        assert_eq!(loaded.role, Role::GovernanceLead);
        assert!(loaded.sidebar_collapsed);

        // Upsert keeps a single row.
        let prefs = SessionPrefs {
            domain: DomainName::Telco,
            role: Role::Admin,
            sidebar_collapsed: false,
        };
        db.persist_prefs(&prefs, "2025-11-21T00:00:00Z").unwrap();
        assert_eq!(db.load_prefs().unwrap().unwrap().domain, DomainName::Telco);
    }

    #[test]
    fn audit_inserts_are_idempotent_by_id() {
        let dir = TempDir::new().unwrap();
        let mut db = open_db(&dir);

        let entry = AuditEntry {
            id: "audit_1_deadbeef".to_string(),
            timestamp: "2025-11-20T00:00:00Z".to_string(),
            action: "switch_domain".to_string(),
            role: Role::Admin,
            entity_kind: AuditEntityKind::Session,
            entity_id: "Telco".to_string(),
            details: json!({"from": "Travel"}),
        };
        db.persist_audit(&[entry.clone()]).unwrap();
        db.persist_audit(&[entry]).unwrap();
        assert_eq!(db.audit_count().unwrap(), 1);
    }
}
