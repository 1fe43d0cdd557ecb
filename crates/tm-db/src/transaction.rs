//! Scoped transactions over a [`Database`].
//!
//! [`Transaction`] rolls back on drop unless it was committed, so every exit
//! path (error return, early return, unwinding panic) releases the
//! transaction. [`with_transaction`] wraps the common closure form.

use crate::error::DbError;
use crate::traits::Database;

/// An open transaction on a [`Database`]
pub struct Transaction<'a> {
    db: &'a dyn Database,
    finished: bool,
}

impl<'a> Transaction<'a> {
    /// Open a transaction on `db`
    pub fn begin(db: &'a dyn Database) -> Result<Self, DbError> {
        db.begin()?;
        Ok(Self {
            db,
            finished: false,
        })
    }

    /// The database the transaction runs on
    pub fn db(&self) -> &'a dyn Database {
        self.db
    }

    /// Commit. A failed `COMMIT` is followed by a best-effort rollback.
    pub fn commit(mut self) -> Result<(), DbError> {
        self.finished = true;
        if let Err(commit_err) = self.db.commit() {
            let _ = self.db.rollback();
            return Err(commit_err);
        }
        Ok(())
    }

    /// Roll back explicitly
    pub fn rollback(mut self) -> Result<(), DbError> {
        self.finished = true;
        self.db.rollback()
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.db.rollback() {
            log::warn!("Rollback of abandoned {} transaction failed: {e}", self.db.db_type());
        }
    }
}

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
pub fn with_transaction<T, E, F>(db: &dyn Database, body: F) -> Result<T, E>
where
    F: FnOnce(&dyn Database) -> Result<T, E>,
    E: From<DbError>,
{
    let tx = Transaction::begin(db)?;
    let value = body(tx.db())?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;
