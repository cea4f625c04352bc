use axum::{middleware, Extension, Router};

use minijinja::Environment;

use tower_sessions::{
    cookie::{time::Duration, Key, SameSite},
    Expiry, SessionManagerLayer,
};
use tower_sessions_rusqlite_store::RusqliteStore;

use crate::{
    auth,
    db::{self, DB},
    notes,
    shared::headers,
    views::{add_templates, Views},
};

use super::{config::config, errors, state::AppState};

pub async fn create_app(db: DB) -> errors::Result<Router> {
    let session_store = RusqliteStore::new(db.clone());
    session_store.migrate().await.map_err(db::Error::from)?;

    let key = Key::try_from(config().secret_key.as_bytes())
        .map_err(|e| anyhow::anyhow!("SECRET_KEY must be at least 64 bytes: {e}"))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_signed(key)
        .with_secure(config().secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(config().session_lifetime_secs)));

    let mut env = Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);
    add_templates(&mut env);

    let views = Views::new(env);
    let state = AppState {
        conn: db.clone(),
        views,
    };

    let app = Router::new()
        .merge(auth::router(state.clone()))
        .merge(notes::router(state))
        .layer(Extension(db.clone()));

    let app = auth::add_auth_layer(app, session_layer, db);

    // outermost so every response carries them, whichever layer produced it
    let app = app.layer(middleware::from_fn(headers::security_headers));

    Ok(app)
}
