use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(r#"
                CREATE TABLE users (
                    id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),
                    username TEXT NOT NULL UNIQUE CHECK(length(username) <= 150),
                    password_hash TEXT NOT NULL,
                    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
                );
                "#
        ),
        // owner_id is deliberately not a foreign key: ownership is logical only
        M::up(r#"
                CREATE TABLE notes (
                    id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),
                    title TEXT NOT NULL CHECK(length(title) <= 200),
                    content TEXT NOT NULL,
                    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at DATETIME,
                    owner_id BLOB NOT NULL
                );
                CREATE INDEX idx_notes_owner_id ON notes(owner_id);
                "#
        ),
    ]);
}
