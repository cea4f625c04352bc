use rusqlite::{named_params, Row};
use serde::Deserialize;

use crate::db::{self, DB};

use super::UserId;

#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("created_at", &self.created_at)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

impl<'a> TryFrom<&Row<'a>> for User {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserParameters {
    pub username: String,
    pub password_hash: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetUserByUsernameParameters {
    pub username: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GetUserByIdParameters {
    pub user_id: UserId,
}

/// Inserts a new user. Uniqueness is enforced by the store itself, so two
/// concurrent registrations with the same username cannot both succeed; the
/// loser surfaces as a `Conflict`.
pub async fn create(db: DB, args: CreateUserParameters) -> db::Result<User> {
    let username = args.username.to_owned();
    let user = db
        .call(move |conn| {
            conn.query_row(
                r#"INSERT INTO users (username, password_hash) VALUES (:username, :password_hash)
                    RETURNING id, username, password_hash, created_at"#,
                named_params! {
                    ":username": args.username,
                    ":password_hash": args.password_hash,
                },
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.conflict_message(format!("Username '{}' is already taken", username)))?;

    Ok(user)
}

pub async fn find_one_by_id(db: DB, args: GetUserByIdParameters) -> db::Result<User> {
    let user_id = args.user_id;
    let user = db
        .call(move |conn| {
            conn.query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
                [args.user_id],
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(format!("User '{}' not found", user_id)))?;

    Ok(user)
}

pub async fn find_one_by_username(db: DB, args: GetUserByUsernameParameters) -> db::Result<User> {
    let username = args.username.to_owned();
    let user = db
        .call(|conn| {
            conn.query_row(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
                [args.username],
                |r| User::try_from(r),
            )
            .map_err(|e| e.into())
        })
        .await
        .map_err(db::Error::from)
        .map_err(|e| e.not_found_message(format!("User '{}' not found", username)))?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::db::{self, init_test_db};

    use super::*;

    #[tokio::test]
    async fn user_create() {
        let db = init_test_db().await.unwrap();
        let user = create(
            db,
            CreateUserParameters {
                username: "alice".into(),
                password_hash: "$argon2id$fake".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "$argon2id$fake");
    }

    #[tokio::test]
    async fn user_create_duplicate_username() {
        let db = init_test_db().await.unwrap();

        create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: "h1".into(),
            },
        )
        .await
        .unwrap();

        let second = create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: "h2".into(),
            },
        )
        .await;

        assert!(matches!(second.err(), Some(db::Error::Conflict(_))));

        let count: i64 = db
            .call(|conn| {
                conn.query_row("SELECT COUNT(*) FROM users WHERE username = 'alice'", [], |r| r.get(0))
                    .map_err(|e| e.into())
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn user_get_by_username() {
        let db = init_test_db().await.unwrap();
        create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: "h".into(),
            },
        )
        .await
        .unwrap();

        let user = find_one_by_username(
            db,
            GetUserByUsernameParameters {
                username: "alice".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn user_get_by_id() {
        let db = init_test_db().await.unwrap();
        let created = create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: "h".into(),
            },
        )
        .await
        .unwrap();

        let user = find_one_by_id(db, GetUserByIdParameters { user_id: created.id })
            .await
            .unwrap();

        assert_eq!(user.id, created.id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn user_not_found() {
        let db = init_test_db().await.unwrap();

        let user = find_one_by_username(
            db.clone(),
            GetUserByUsernameParameters {
                username: "nobody".into(),
            },
        )
        .await;

        assert!(matches!(user.err(), Some(db::Error::NotFound(_))));

        let user = find_one_by_id(
            db,
            GetUserByIdParameters {
                user_id: Uuid::new_v4(),
            },
        )
        .await;

        assert!(matches!(user.err(), Some(db::Error::NotFound(_))));
    }
}
