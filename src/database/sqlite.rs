use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::ISO_FORMAT;

/// Response cache: one fully serialized body per request path, stamped
/// with the Central-time instant it was written.
pub struct SqliteDatabase {}

impl SqliteDatabase {
    pub fn create_table(
        connection: &PooledConnection<SqliteConnectionManager>,
    ) -> rusqlite::Result<()> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS response_cache (
                path TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            (),
        )?;
        Ok(())
    }

    /**
    Get the cached body for a path, but only while it is younger than
    `max_age_seconds`.

    Returns an `Ok(Some(String))` on a fresh hit.
    Returns an `Ok(None)` when the entry is missing or stale.
    */
    pub fn read_fresh(
        connection: &PooledConnection<SqliteConnectionManager>,
        path: &str,
        max_age_seconds: i64,
        now: &DateTime<Tz>,
    ) -> rusqlite::Result<Option<String>> {
        let mut statement =
            connection.prepare("SELECT body, cached_at FROM response_cache WHERE path = ?1")?;
        let mut rows = statement.query(rusqlite::params![path])?;
        match rows.next()? {
            Some(row) => {
                let body: String = row.get(0)?;
                let cached_at: String = row.get(1)?;
                // An unparseable timestamp counts as stale.
                let Ok(cached_at) = NaiveDateTime::parse_from_str(&cached_at, ISO_FORMAT) else {
                    return Ok(None);
                };
                let age = now.naive_local() - cached_at;
                if age.num_seconds() < max_age_seconds {
                    Ok(Some(body))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    /**
    Get the cached body for a path regardless of its age.

    This is the fallback read for when the upstream fetch fails.
    */
    pub fn read_latest(
        connection: &PooledConnection<SqliteConnectionManager>,
        path: &str,
    ) -> rusqlite::Result<Option<String>> {
        let mut statement = connection.prepare("SELECT body FROM response_cache WHERE path = ?1")?;
        let mut rows = statement.query(rusqlite::params![path])?;
        match rows.next()? {
            Some(row) => {
                let body: String = row.get(0)?;
                Ok(Some(body))
            }
            None => Ok(None),
        }
    }

    /**
    Insert or replace the cached body for a path.
    */
    pub fn write(
        connection: &PooledConnection<SqliteConnectionManager>,
        path: &str,
        body: &str,
        now: &DateTime<Tz>,
    ) -> rusqlite::Result<()> {
        connection.execute(
            "INSERT INTO response_cache (path, body, cached_at) VALUES (?1, ?2, ?3)
                ON CONFLICT(path) DO UPDATE SET body = excluded.body, cached_at = excluded.cached_at",
            rusqlite::params![path, body, now.naive_local().format(ISO_FORMAT).to_string()],
        )?;
        Ok(())
    }
}
