//! Persistence of user account registrations in SQLite.
//!
//! Registrations are only ever inserted, listed and deleted. The uniqueness of
//! (owner, source, server, name) is enforced by a unique index, so two concurrent
//! registrations of the same account cannot both succeed.

use rusqlite::{Connection, Row, ffi, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by an [`AccountStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The same account is already registered for this owner.
    #[error("Account already registered")]
    Duplicate,

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A stored registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i64,
    /// Discord user id, kept as text so large snowflakes survive any driver.
    pub owner_user_id: String,
    pub source: String,
    pub server: Option<String>,
    pub name: String,
    pub comment: Option<String>,
}

/// A registration about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub owner_user_id: String,
    pub source: String,
    pub server: Option<String>,
    pub name: String,
    pub comment: Option<String>,
}

/// Storage operations the commands rely on.
///
/// `server: None` in the listing and bulk removal filters means "any server"; in
/// [`AccountStore::remove_account`] it only matches registrations without a server.
pub trait AccountStore: Send + Sync {
    /// Stores a new registration, failing with [`StoreError::Duplicate`] if it already exists.
    fn insert_account(&self, account: &NewAccount) -> StoreResult<UserAccount>;

    /// All registrations of one owner, ordered by source, server and name.
    fn accounts_by_owner(&self, owner_user_id: &str) -> StoreResult<Vec<UserAccount>>;

    /// All registrations for a source, ordered by server and name.
    fn accounts_by_source(
        &self,
        source: &str,
        server: Option<&str>,
    ) -> StoreResult<Vec<UserAccount>>;

    /// Removes every registration of an owner for a source, returning how many were removed.
    fn remove_accounts(
        &self,
        owner_user_id: &str,
        source: &str,
        server: Option<&str>,
    ) -> StoreResult<usize>;

    /// Removes one named registration, returning how many were removed (0 or 1).
    fn remove_account(
        &self,
        owner_user_id: &str,
        source: &str,
        server: Option<&str>,
        name: &str,
    ) -> StoreResult<usize>;
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user_accounts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_user_id TEXT NOT NULL,
        source TEXT NOT NULL,
        server TEXT,
        name TEXT NOT NULL,
        comment TEXT
    );
    CREATE UNIQUE INDEX IF NOT EXISTS user_accounts_unique
        ON user_accounts (owner_user_id, source, IFNULL(server, ''), name);
";

const ACCOUNT_COLUMNS: &str = "id, owner_user_id, source, server, name, comment";

/// [`AccountStore`] backed by a single SQLite connection.
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub fn open(path: &Path) -> StoreResult<Self> {
        info!("Opening account database at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn query_accounts(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<UserAccount>> {
        let conn = self.conn()?;
        let mut statement = conn.prepare(sql)?;
        let accounts = statement
            .query_map(params, account_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
    Ok(UserAccount {
        id: row.get(0)?,
        owner_user_id: row.get(1)?,
        source: row.get(2)?,
        server: row.get(3)?,
        name: row.get(4)?,
        comment: row.get(5)?,
    })
}

/// Only a unique index violation means "already registered"; other constraint failures
/// stay database errors.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl AccountStore for SqliteAccountStore {
    fn insert_account(&self, account: &NewAccount) -> StoreResult<UserAccount> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO user_accounts (owner_user_id, source, server, name, comment)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.owner_user_id,
                account.source,
                account.server,
                account.name,
                account.comment
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(StoreError::Duplicate),
            Err(e) => return Err(e.into()),
        }

        let id = conn.last_insert_rowid();
        debug!(id, owner = %account.owner_user_id, source = %account.source, "Account registered");

        Ok(UserAccount {
            id,
            owner_user_id: account.owner_user_id.clone(),
            source: account.source.clone(),
            server: account.server.clone(),
            name: account.name.clone(),
            comment: account.comment.clone(),
        })
    }

    fn accounts_by_owner(&self, owner_user_id: &str) -> StoreResult<Vec<UserAccount>> {
        self.query_accounts(
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM user_accounts
                 WHERE owner_user_id = ?1
                 ORDER BY source, server, name"
            ),
            params![owner_user_id],
        )
    }

    fn accounts_by_source(
        &self,
        source: &str,
        server: Option<&str>,
    ) -> StoreResult<Vec<UserAccount>> {
        self.query_accounts(
            &format!(
                "SELECT {ACCOUNT_COLUMNS} FROM user_accounts
                 WHERE source = ?1 AND (?2 IS NULL OR server = ?2)
                 ORDER BY server, name"
            ),
            params![source, server],
        )
    }

    fn remove_accounts(
        &self,
        owner_user_id: &str,
        source: &str,
        server: Option<&str>,
    ) -> StoreResult<usize> {
        let removed = self.conn()?.execute(
            "DELETE FROM user_accounts
             WHERE owner_user_id = ?1 AND source = ?2 AND (?3 IS NULL OR server = ?3)",
            params![owner_user_id, source, server],
        )?;
        debug!(removed, owner = %owner_user_id, source, "Accounts removed");
        Ok(removed)
    }

    fn remove_account(
        &self,
        owner_user_id: &str,
        source: &str,
        server: Option<&str>,
        name: &str,
    ) -> StoreResult<usize> {
        let removed = self.conn()?.execute(
            "DELETE FROM user_accounts
             WHERE owner_user_id = ?1 AND source = ?2 AND server IS ?3 AND name = ?4",
            params![owner_user_id, source, server, name],
        )?;
        debug!(removed, owner = %owner_user_id, source, name, "Account removed");
        Ok(removed)
    }
}

impl SqliteAccountStore {
    /// Number of stored registrations.
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM user_accounts", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| StoreError::Sqlite(rusqlite::Error::IntegralValueOutOfRange(0, count)))
    }
}
