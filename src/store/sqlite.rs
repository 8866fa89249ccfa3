//! SQLite-backed user store.
//! Used by: handlers, state.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::{Error, Result};

pub struct UserStore {
    conn: Mutex<Connection>,
}

/// A full user row. The password column always holds a bcrypt hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Column values for insert and full-row update; id is generated.
#[derive(Debug, Clone)]
pub struct UserData {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl UserStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Email uniqueness is checked and the row inserted under one lock, so
    /// two concurrent registrations cannot both claim an address.
    pub fn insert(&self, user: UserData) -> Result<UserRecord> {
        let conn = self.lock()?;
        if Self::email_in_use(&conn, &user.email, None)? {
            return Err(Error::EmailTaken(user.email));
        }
        conn.execute(
            "INSERT INTO users (name, phone, email, password) VALUES (?1, ?2, ?3, ?4)",
            (&user.name, &user.phone, &user.email, &user.password),
        )?;
        Ok(UserRecord {
            id: conn.last_insert_rowid(),
            name: user.name,
            phone: user.phone,
            email: user.email,
            password: user.password,
        })
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                "SELECT id, name, phone, email, password FROM users WHERE id = ?1",
                [id],
                Self::map_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let conn = self.lock()?;
        let user = conn
            .query_row(
                "SELECT id, name, phone, email, password FROM users WHERE email = ?1",
                [email],
                Self::map_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list(&self) -> Result<Vec<UserRecord>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, name, phone, email, password FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Full-row replace, matching the write shape of the update endpoint.
    pub fn update(&self, id: i64, user: UserData) -> Result<()> {
        let conn = self.lock()?;
        if Self::email_in_use(&conn, &user.email, Some(id))? {
            return Err(Error::EmailTaken(user.email));
        }
        let changed = conn.execute(
            "UPDATE users SET name = ?1, phone = ?2, email = ?3, password = ?4 WHERE id = ?5",
            (&user.name, &user.phone, &user.email, &user.password, id),
        )?;
        if changed == 0 {
            return Err(Error::UserNotFound(id));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::UserNotFound(id));
        }
        Ok(())
    }

    fn email_in_use(conn: &Connection, email: &str, exclude: Option<i64>) -> Result<bool> {
        let taken = match exclude {
            Some(id) => conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND id != ?2)",
                (email, id),
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                [email],
                |row| row.get(0),
            )?,
        };
        Ok(taken)
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
        Ok(UserRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            email: row.get(3)?,
            password: row.get(4)?,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::Internal(format!("user store lock poisoned: {}", e)))
    }
}
