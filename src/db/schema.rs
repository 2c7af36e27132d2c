//! Database schema and migrations for Bookmarl.
//!
//! Migrations are applied in order when the database is opened.
//! The schema_version table tracks which migrations have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    hash        TEXT NOT NULL,           -- Argon2id PHC string
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
