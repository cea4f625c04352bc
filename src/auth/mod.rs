mod backend;
mod errors;
mod password;
mod routes;

use axum::Router;
use axum_login::AuthManagerLayerBuilder;
use tower_sessions::{service::SignedCookie, SessionManagerLayer};
use tower_sessions_rusqlite_store::RusqliteStore;

pub use backend::{AuthSession, Credentials};
pub use errors::{Error, Result};
pub use password::hash_password;
pub use routes::router;

use crate::db::DB;

use self::backend::AuthBackend;

pub fn add_auth_layer(
    app: Router,
    session_layer: SessionManagerLayer<RusqliteStore, SignedCookie>,
    db: DB,
) -> Router {
    let auth_backend = AuthBackend::new(db);
    let auth_layer = AuthManagerLayerBuilder::new(auth_backend, session_layer).build();

    app.layer(auth_layer)
}
