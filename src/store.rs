//! SQLite persistence for warp records.
//!
//! A [`WarpStore`] owns a single connection, opened lazily on first use and
//! released by [`WarpStore::close`]. Name uniqueness is enforced by the
//! `UNIQUE` constraint on `warps.name`, so inserts never race a separate
//! existence check.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use rusqlite::{Connection, DatabaseName, OpenFlags, OptionalExtension, ffi, params};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::warp::{Position, Warp};

pub type Result<T> = std::result::Result<T, StoreError>;

pub fn derive_db_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(name);
    if path.extension().is_none() {
        path.set_extension("warps.db");
    }
    path
}

pub fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Handle to the warp database.
pub struct WarpStore {
    config: StoreConfig,
    conn: OnceCell<Connection>,
}

impl WarpStore {
    /// Build a handle without touching the filesystem; the connection is
    /// opened by the first operation that needs it.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    /// Create a fresh database file, failing if one already exists.
    pub fn create(config: StoreConfig) -> Result<Self> {
        let conn = create_store(&config.path)?;
        conn.busy_timeout(config.busy_timeout)?;
        Ok(Self {
            config,
            conn: OnceCell::with_value(conn),
        })
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        Ok(Self {
            config: StoreConfig::new(":memory:"),
            conn: OnceCell::with_value(conn),
        })
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Connection for this handle, opening it on first use.
    pub fn conn(&self) -> Result<&Connection> {
        self.conn.get_or_try_init(|| open_store(&self.config))
    }

    /// Release the connection. Consumes the handle so it can only happen once.
    pub fn close(self) -> Result<()> {
        let path = self.config.path;
        match self.conn.into_inner() {
            None => Ok(()),
            Some(conn) => match conn.close() {
                Ok(()) => {
                    debug!(path = %path.display(), "closed warp database");
                    Ok(())
                }
                Err((_conn, err)) => {
                    warn!(path = %path.display(), error = %err, "failed to close warp database");
                    Err(err.into())
                }
            },
        }
    }
}

pub fn create_store(path: &Path) -> Result<Connection> {
    ensure_parent_dirs(path)?;
    if path.exists() {
        return Err(StoreError::AlreadyExists(path.to_path_buf()));
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_CREATE | OpenFlags::SQLITE_OPEN_READ_WRITE,
    )?;

    configure_pragmas(&conn)?;
    install_schema(&conn)?;
    debug!(path = %path.display(), "created warp database");
    Ok(conn)
}

pub fn open_store(config: &StoreConfig) -> Result<Connection> {
    let path = config.path.as_path();
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE;
    if !path.exists() {
        if !config.create_if_missing {
            return Err(StoreError::Missing(path.to_path_buf()));
        }
        ensure_parent_dirs(path)?;
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }

    let conn = Connection::open_with_flags(path, flags)?;
    conn.busy_timeout(config.busy_timeout)?;
    configure_pragmas(&conn)?;
    install_schema(&conn)?;
    debug!(path = %path.display(), "opened warp database");
    Ok(conn)
}

pub fn configure_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update(Some(DatabaseName::Main), "journal_mode", &"WAL")?;
    conn.pragma_update(Some(DatabaseName::Main), "synchronous", &"NORMAL")?;
    conn.pragma_update(Some(DatabaseName::Main), "temp_store", &"MEMORY")?;
    Ok(())
}

pub fn install_schema(conn: &Connection) -> Result<()> {
    const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS warps (
  id    INTEGER PRIMARY KEY AUTOINCREMENT,
  name  TEXT UNIQUE NOT NULL,
  x     REAL NOT NULL,
  y     REAL NOT NULL,
  z     REAL NOT NULL,
  world TEXT NOT NULL
);
"#;

    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert a warp row. Returns the new row id, or `None` when the name is taken.
pub fn insert_warp(conn: &Connection, warp: &Warp) -> Result<Option<i64>> {
    let result = conn.execute(
        "INSERT INTO warps (name, x, y, z, world) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            warp.name,
            warp.position.x,
            warp.position.y,
            warp.position.z,
            warp.world
        ],
    );
    match result {
        Ok(_) => Ok(Some(conn.last_insert_rowid())),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub fn delete_warp(conn: &Connection, name: &str) -> Result<bool> {
    let rows = conn.execute("DELETE FROM warps WHERE name = ?1", params![name])?;
    Ok(rows > 0)
}

pub fn update_position(conn: &Connection, name: &str, position: &Position) -> Result<bool> {
    let rows = conn.execute(
        "UPDATE warps SET x = ?1, y = ?2, z = ?3 WHERE name = ?4",
        params![position.x, position.y, position.z, name],
    )?;
    Ok(rows > 0)
}

pub fn load_warp(conn: &Connection, name: &str) -> Result<Option<Warp>> {
    let warp = conn
        .query_row(
            "SELECT name, x, y, z, world FROM warps WHERE name = ?1",
            params![name],
            row_to_warp,
        )
        .optional()?;
    Ok(warp)
}

pub fn list_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM warps ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Full records whose name starts with `prefix` (case-sensitive), ordered by name.
pub fn list_warps(conn: &Connection, prefix: Option<&str>) -> Result<Vec<Warp>> {
    let prefix = prefix.unwrap_or("");
    let mut stmt = conn.prepare(
        "SELECT name, x, y, z, world FROM warps \
         WHERE substr(name, 1, length(?1)) = ?1 ORDER BY name",
    )?;
    let warps = stmt
        .query_map(params![prefix], row_to_warp)?
        .collect::<rusqlite::Result<Vec<Warp>>>()?;
    Ok(warps)
}

fn row_to_warp(row: &rusqlite::Row<'_>) -> rusqlite::Result<Warp> {
    Ok(Warp {
        name: row.get(0)?,
        position: Position {
            x: row.get(1)?,
            y: row.get(2)?,
            z: row.get(3)?,
        },
        world: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn sample(name: &str) -> Warp {
        Warp {
            name: name.to_string(),
            position: Position::new(1.5, 64.0, -3.25),
            world: "world".to_string(),
        }
    }

    #[test]
    fn derive_db_path_adds_extension() {
        assert_eq!(derive_db_path("spawn"), PathBuf::from("spawn.warps.db"));
        assert_eq!(derive_db_path("data/w.db"), PathBuf::from("data/w.db"));
    }

    #[test]
    fn unique_name_is_enforced_by_insert() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        let first = insert_warp(&conn, &sample("spawn"))?;
        assert!(first.is_some());
        assert_eq!(insert_warp(&conn, &sample("spawn"))?, None);
        assert!(insert_warp(&conn, &sample("Spawn"))?.is_some());
        assert_eq!(list_names(&conn)?, vec!["Spawn".to_string(), "spawn".to_string()]);
        Ok(())
    }

    #[test]
    fn row_ids_increase() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        let a = insert_warp(&conn, &sample("a"))?.unwrap_or_default();
        let b = insert_warp(&conn, &sample("b"))?.unwrap_or_default();
        assert!(b > a);
        Ok(())
    }

    #[test]
    fn update_and_delete_report_presence() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        insert_warp(&conn, &sample("hub"))?;
        assert!(update_position(&conn, "hub", &Position::new(0.0, 0.0, 0.0))?);
        assert!(!update_position(&conn, "nowhere", &Position::default())?);
        assert!(delete_warp(&conn, "hub")?);
        assert!(!delete_warp(&conn, "hub")?);
        assert_eq!(load_warp(&conn, "hub")?, None);
        Ok(())
    }

    #[test]
    fn list_warps_filters_by_prefix() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        for name in ["mine_a", "mine_b", "Mine_c", "spawn", "mine%"] {
            insert_warp(&conn, &sample(name))?;
        }
        let names: Vec<_> = list_warps(&conn, Some("mine"))?
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["mine%", "mine_a", "mine_b"]);
        assert_eq!(list_warps(&conn, None)?.len(), 5);
        Ok(())
    }

    #[test]
    fn lazy_open_creates_database_on_first_use() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("warps.db");
        let store = WarpStore::new(StoreConfig::new(&path));
        assert!(!store.is_open());
        assert!(!path.exists());

        insert_warp(store.conn()?, &sample("spawn"))?;
        assert!(store.is_open());
        assert!(path.exists());
        store.close()?;

        let reopened = WarpStore::new(StoreConfig::new(&path));
        let warp = load_warp(reopened.conn()?, "spawn")?;
        assert_eq!(warp, Some(sample("spawn")));
        reopened.close()?;
        Ok(())
    }

    #[test]
    fn missing_database_is_reported_without_create() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut config = StoreConfig::new(dir.path().join("absent.db"));
        config.create_if_missing = false;
        let store = WarpStore::new(config);
        assert!(matches!(store.conn(), Err(StoreError::Missing(_))));
        Ok(())
    }

    #[test]
    fn create_refuses_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("warps.db");
        WarpStore::create(StoreConfig::new(&path))?.close()?;
        assert!(matches!(
            WarpStore::create(StoreConfig::new(&path)),
            Err(StoreError::AlreadyExists(_))
        ));
        Ok(())
    }

    #[test]
    fn closing_an_unopened_store_is_a_no_op() -> Result<()> {
        let store = WarpStore::new(StoreConfig::new("never-opened.db"));
        store.close()?;
        assert!(!Path::new("never-opened.db").exists());
        Ok(())
    }
}
