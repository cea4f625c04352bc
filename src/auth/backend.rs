use axum::async_trait;
use axum_login::AuthUser;
use serde::Deserialize;
use tokio::task;

use crate::{
    db::{self, DB},
    users::{
        store::{find_one_by_id, find_one_by_username, GetUserByIdParameters, GetUserByUsernameParameters, User},
        UserId,
    },
};

use super::{password::verify_password, Error};

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl AuthUser for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn session_auth_hash(&self) -> &[u8] {
        self.password_hash.as_bytes()
    }
}

#[derive(Clone)]
pub struct AuthBackend {
    db: DB,
}

impl AuthBackend {
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl axum_login::AuthnBackend for AuthBackend {
    type User = User;
    type Credentials = Credentials;
    type Error = Error;

    /// A missing user and a wrong password both resolve to `None`, so callers
    /// cannot distinguish the two.
    async fn authenticate(&self, creds: Self::Credentials) -> Result<Option<Self::User>, Self::Error> {
        let user = match find_one_by_username(
            self.db.clone(),
            GetUserByUsernameParameters {
                username: creds.username,
            },
        )
        .await
        {
            Ok(user) => user,
            Err(db::Error::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let hash = user.password_hash.clone();
        let valid = task::spawn_blocking(move || verify_password(&creds.password, &hash))
            .await
            .map_err(|e| Error::Unexpected(e.into()))?;

        Ok(valid.then_some(user))
    }

    async fn get_user(&self, user_id: &axum_login::UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        let user = match find_one_by_id(
            self.db.clone(),
            GetUserByIdParameters {
                user_id: user_id.to_owned(),
            },
        )
        .await
        {
            Ok(user) => Some(user),
            Err(db::Error::NotFound(_)) => None,
            Err(err) => return Err(err.into()),
        };

        Ok(user)
    }
}

impl<AuthBackend> From<axum_login::Error<AuthBackend>> for Error
where
    AuthBackend: axum_login::AuthnBackend<Error = Error>,
{
    fn from(error: axum_login::Error<AuthBackend>) -> Self {
        match error {
            axum_login::Error::Session(err) => Error::Session(err),
            axum_login::Error::Backend(err) => err,
        }
    }
}

pub type AuthSession = axum_login::AuthSession<AuthBackend>;

#[cfg(test)]
mod tests {
    use axum_login::AuthnBackend;

    use crate::{
        auth::hash_password,
        db::init_test_db,
        users::store::{create, CreateUserParameters},
    };

    use super::*;

    #[tokio::test]
    async fn authenticate_valid_credentials() {
        let db = init_test_db().await.unwrap();
        create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: hash_password("correct horse").unwrap(),
            },
        )
        .await
        .unwrap();

        let backend = AuthBackend::new(db);
        let user = backend
            .authenticate(Credentials {
                username: "alice".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.map(|u| u.username), Some("alice".into()));
    }

    #[tokio::test]
    async fn authenticate_wrong_password() {
        let db = init_test_db().await.unwrap();
        create(
            db.clone(),
            CreateUserParameters {
                username: "alice".into(),
                password_hash: hash_password("correct horse").unwrap(),
            },
        )
        .await
        .unwrap();

        let backend = AuthBackend::new(db);
        let user = backend
            .authenticate(Credentials {
                username: "alice".into(),
                password: "battery staple".into(),
            })
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn authenticate_unknown_user() {
        let db = init_test_db().await.unwrap();

        let backend = AuthBackend::new(db);
        let user = backend
            .authenticate(Credentials {
                username: "nobody".into(),
                password: "whatever".into(),
            })
            .await
            .unwrap();

        assert!(user.is_none());
    }
}
