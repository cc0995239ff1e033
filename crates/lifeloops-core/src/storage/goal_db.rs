//! SQLite-based storage for goals and the single-user profile.
//!
//! Provides persistent storage for:
//! - Goals at every timeframe, in insertion order
//! - Key-value records for the user prototype, loop states and the
//!   directional document (stored as JSON)

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::data_dir;
use crate::archetype::UserPrototype;
use crate::directional::DirectionalDocument;
use crate::error::{DatabaseError, Result};
use crate::goals::{Goal, GoalHierarchy};
use crate::loops::{LoopId, LoopState, LoopStates};

const SCHEMA_VERSION: i32 = 1;

const KEY_PROTOTYPE: &str = "profile.prototype";
const KEY_LOOP_STATES: &str = "profile.loop_states";
const KEY_DIRECTIONAL: &str = "profile.directional";

const GOAL_COLUMNS: &str = "id, title, description, loop_id, timeframe, parent_goal_id, \
     child_goal_ids, status, progress, start_date, target_date, metrics, created_at, updated_at";

fn conversion_error<E>(index: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_column<T>(row: &rusqlite::Row, index: usize) -> Result<T, rusqlite::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|e| conversion_error(index, e))
}

fn json_column<T: DeserializeOwned>(row: &rusqlite::Row, index: usize) -> Result<T, rusqlite::Error> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(index, e))
}

fn date_column(row: &rusqlite::Row, index: usize) -> Result<NaiveDate, rusqlite::Error> {
    let raw: String = row.get(index)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| conversion_error(index, e))
}

fn datetime_column(row: &rusqlite::Row, index: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(index)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(index, e))
}

/// Build a Goal from a database row selected with `GOAL_COLUMNS`.
fn row_to_goal(row: &rusqlite::Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        loop_id: parse_column(row, 3)?,
        timeframe: parse_column(row, 4)?,
        parent_goal_id: row.get(5)?,
        child_goal_ids: json_column(row, 6)?,
        status: parse_column(row, 7)?,
        progress: row.get(8)?,
        start_date: date_column(row, 9)?,
        target_date: date_column(row, 10)?,
        metrics: json_column(row, 11)?,
        created_at: datetime_column(row, 12)?,
        updated_at: datetime_column(row, 13)?,
    })
}

fn upsert_goal_on(conn: &Connection, goal: &Goal) -> Result<()> {
    conn.execute(
        "INSERT INTO goals (id, title, description, loop_id, timeframe, parent_goal_id,
                            child_goal_ids, status, progress, start_date, target_date,
                            metrics, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description,
            loop_id = excluded.loop_id,
            timeframe = excluded.timeframe,
            parent_goal_id = excluded.parent_goal_id,
            child_goal_ids = excluded.child_goal_ids,
            status = excluded.status,
            progress = excluded.progress,
            start_date = excluded.start_date,
            target_date = excluded.target_date,
            metrics = excluded.metrics,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            goal.id,
            goal.title,
            goal.description,
            goal.loop_id.as_str(),
            goal.timeframe.as_str(),
            goal.parent_goal_id,
            serde_json::to_string(&goal.child_goal_ids)?,
            goal.status.as_str(),
            goal.progress,
            goal.start_date.format("%Y-%m-%d").to_string(),
            goal.target_date.format("%Y-%m-%d").to_string(),
            serde_json::to_string(&goal.metrics)?,
            goal.created_at.to_rfc3339(),
            goal.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// SQLite database for goals and profile state.
pub struct GoalDb {
    conn: Connection,
}

impl GoalDb {
    /// Open the database at `~/.config/lifeloops/lifeloops.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("lifeloops.db"))
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::info!(path = %path.display(), "opened goal database");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .optional()?
            .unwrap_or(0);

        if current < 1 {
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS goals (
                    id             TEXT PRIMARY KEY,
                    title          TEXT NOT NULL,
                    description    TEXT NOT NULL DEFAULT '',
                    loop_id        TEXT NOT NULL,
                    timeframe      TEXT NOT NULL,
                    parent_goal_id TEXT,
                    child_goal_ids TEXT NOT NULL DEFAULT '[]',
                    status         TEXT NOT NULL DEFAULT 'active',
                    progress       INTEGER NOT NULL DEFAULT 0,
                    start_date     TEXT NOT NULL,
                    target_date    TEXT NOT NULL,
                    metrics        TEXT NOT NULL DEFAULT '[]',
                    created_at     TEXT NOT NULL,
                    updated_at     TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_goals_timeframe ON goals(timeframe);
                CREATE INDEX IF NOT EXISTS idx_goals_loop ON goals(loop_id);

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                DELETE FROM schema_version;",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
            tx.commit()?;
        }
        Ok(())
    }

    // === Goals ===

    /// Insert a goal or replace the stored goal with the same id.
    pub fn upsert_goal(&self, goal: &Goal) -> Result<()> {
        upsert_goal_on(&self.conn, goal)
    }

    pub fn get_goal(&self, id: &str) -> Result<Option<Goal>> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1");
        let goal = self.conn.query_row(&sql, [id], row_to_goal).optional()?;
        Ok(goal)
    }

    /// Delete a goal row. Returns whether a row was removed.
    ///
    /// Links in other goals are left untouched; use [`GoalHierarchy::remove`]
    /// with [`GoalDb::save_hierarchy`] to detach a goal cleanly.
    pub fn delete_goal(&self, id: &str) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM goals WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    /// Load every goal into a hierarchy, preserving insertion order.
    pub fn load_hierarchy(&self) -> Result<GoalHierarchy> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_goal)?;

        let mut hierarchy = GoalHierarchy::new();
        for goal in rows {
            hierarchy.insert(goal?);
        }
        Ok(hierarchy)
    }

    /// Replace the stored goals with `hierarchy` in one transaction.
    pub fn save_hierarchy(&self, hierarchy: &GoalHierarchy) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let keep: Vec<&str> = hierarchy.iter().map(|g| g.id.as_str()).collect();

        let stored: Vec<String> = {
            let mut stmt = tx.prepare("SELECT id FROM goals")?;
            let ids = stmt.query_map([], |row| row.get(0))?;
            ids.collect::<Result<_, _>>()?
        };
        for id in stored.iter().filter(|id| !keep.contains(&id.as_str())) {
            tx.execute("DELETE FROM goals WHERE id = ?1", [id])?;
        }
        for goal in hierarchy.iter() {
            upsert_goal_on(&tx, goal)?;
        }
        tx.commit()?;
        Ok(())
    }

    // === Profile ===

    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv_get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.kv_set(key, &serde_json::to_string(value)?)
    }

    pub fn load_prototype(&self) -> Result<Option<UserPrototype>> {
        self.load_json(KEY_PROTOTYPE)
    }

    pub fn save_prototype(&self, prototype: &UserPrototype) -> Result<()> {
        self.save_json(KEY_PROTOTYPE, prototype)
    }

    /// Stored loop states; empty when none have been set.
    pub fn load_loop_states(&self) -> Result<LoopStates> {
        Ok(self.load_json(KEY_LOOP_STATES)?.unwrap_or_default())
    }

    pub fn save_loop_states(&self, states: &LoopStates) -> Result<()> {
        self.save_json(KEY_LOOP_STATES, states)
    }

    pub fn set_loop_state(&self, loop_id: LoopId, state: LoopState) -> Result<()> {
        let mut states = self.load_loop_states()?;
        states.insert(loop_id, state);
        self.save_loop_states(&states)
    }

    pub fn load_directional(&self) -> Result<Option<DirectionalDocument>> {
        self.load_json(KEY_DIRECTIONAL)
    }

    pub fn save_directional(&self, document: &DirectionalDocument) -> Result<()> {
        self.save_json(KEY_DIRECTIONAL, document)
    }

    pub fn clear_directional(&self) -> Result<()> {
        self.kv_delete(KEY_DIRECTIONAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::goals::{tests::goal, GoalMetric, Timeframe};
    use std::collections::HashMap;

    #[test]
    fn goal_roundtrip() {
        let db = GoalDb::open_memory().unwrap();
        let mut g = goal("a", LoopId::Wealth, Timeframe::Annual);
        g.metrics.push(GoalMetric {
            name: "Saved".to_string(),
            unit: "USD".to_string(),
            current: 1200.0,
            target: 10000.0,
        });
        g.child_goal_ids = vec!["q1".to_string()];
        db.upsert_goal(&g).unwrap();

        let loaded = db.get_goal("a").unwrap().unwrap();
        assert_eq!(loaded, g);
        assert!(db.get_goal("missing").unwrap().is_none());
    }

    #[test]
    fn upsert_replaces_and_keeps_order() {
        let db = GoalDb::open_memory().unwrap();
        db.upsert_goal(&goal("first", LoopId::Fun, Timeframe::Annual)).unwrap();
        db.upsert_goal(&goal("second", LoopId::Fun, Timeframe::Annual)).unwrap();

        let mut renamed = goal("first", LoopId::Fun, Timeframe::Annual);
        renamed.title = "Renamed".to_string();
        db.upsert_goal(&renamed).unwrap();

        let h = db.load_hierarchy().unwrap();
        let ids: Vec<&str> = h.annual.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(h.annual[0].title, "Renamed");
    }

    #[test]
    fn save_hierarchy_removes_missing_goals() {
        let db = GoalDb::open_memory().unwrap();
        let mut h = GoalHierarchy::new();
        h.insert(goal("a", LoopId::Work, Timeframe::Annual));
        h.insert(goal("b", LoopId::Work, Timeframe::Annual));
        db.save_hierarchy(&h).unwrap();

        h.remove("b");
        db.save_hierarchy(&h).unwrap();
        let loaded = db.load_hierarchy().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.find("b").is_none());
    }

    #[test]
    fn delete_goal_reports_removal() {
        let db = GoalDb::open_memory().unwrap();
        db.upsert_goal(&goal("a", LoopId::Health, Timeframe::Monthly)).unwrap();
        assert!(db.delete_goal("a").unwrap());
        assert!(!db.delete_goal("a").unwrap());
    }

    #[test]
    fn profile_records_roundtrip() {
        let db = GoalDb::open_memory().unwrap();
        assert!(db.load_prototype().unwrap().is_none());
        assert!(db.load_loop_states().unwrap().is_empty());
        assert!(db.load_directional().unwrap().is_none());

        let prototype = UserPrototype {
            primary: Some(Archetype::Explorer),
            secondary: Some(Archetype::Artist),
            tertiary: None,
            scores: HashMap::from([(Archetype::Explorer, 55.0), (Archetype::Artist, 45.0)]),
        };
        db.save_prototype(&prototype).unwrap();
        assert_eq!(db.load_prototype().unwrap(), Some(prototype));

        db.set_loop_state(LoopId::Health, LoopState::Recover).unwrap();
        db.set_loop_state(LoopId::Work, LoopState::Build).unwrap();
        let states = db.load_loop_states().unwrap();
        assert_eq!(states.get(&LoopId::Health), Some(&LoopState::Recover));
        assert_eq!(states.len(), 2);

        let doc = DirectionalDocument {
            priority_ranking: vec![LoopId::Family],
            ..DirectionalDocument::default()
        };
        db.save_directional(&doc).unwrap();
        assert_eq!(db.load_directional().unwrap(), Some(doc));
        db.clear_directional().unwrap();
        assert!(db.load_directional().unwrap().is_none());
    }

    #[test]
    fn reopening_does_not_rerun_migration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifeloops.db");
        {
            let db = GoalDb::open_at(&path).unwrap();
            db.upsert_goal(&goal("kept", LoopId::Meaning, Timeframe::Daily)).unwrap();
        }
        let db = GoalDb::open_at(&path).unwrap();
        assert!(db.get_goal("kept").unwrap().is_some());
    }
}
