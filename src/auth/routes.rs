use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use minijinja::context;
use serde::Deserialize;
use tokio::task;
use tower_sessions::Session;

use crate::{
    db::{self, DB},
    shared::{
        csrf,
        flash::{self, Level},
    },
    state::AppState,
    users::store::{self, CreateUserParameters},
    views::Views,
};

use super::{
    backend::{AuthSession, Credentials},
    password, Error, Result,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_view).post(login))
        .route("/register", get(register_view).post(register))
        .route("/logout", get(logout))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
    csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct RegisterForm {
    username: String,
    password: String,
    csrf_token: String,
}

impl RegisterForm {
    fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.username.chars().count() > 150 {
            return Err("Username must be at most 150 characters");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        if self.password.chars().count() > 150 {
            return Err("Password must be at most 150 characters");
        }
        Ok(())
    }
}

async fn login_view(view: Views, session: Session) -> Result<Response> {
    let csrf_token = csrf::issue(&session).await?;
    let flashes = flash::take(&session).await;

    Ok(view.response("login.html", context! { csrf_token, flashes }))
}

async fn login(mut auth_session: AuthSession, session: Session, Form(form): Form<LoginForm>) -> Result<Redirect> {
    if !csrf::verify(&session, &form.csrf_token).await? {
        return Err(Error::Forbidden);
    }

    let creds = Credentials {
        username: form.username,
        password: form.password,
    };

    let Some(user) = auth_session.authenticate(creds).await? else {
        flash::push(&session, Level::Danger, "Invalid username or password").await;
        return Ok(Redirect::to("/login"));
    };

    auth_session.login(&user).await?;
    tracing::info!("{} logged in", user.username);

    flash::push(&session, Level::Success, "Signed in").await;
    Ok(Redirect::to("/"))
}

async fn register_view(view: Views, session: Session) -> Result<Response> {
    let csrf_token = csrf::issue(&session).await?;
    let flashes = flash::take(&session).await;

    Ok(view.response("register.html", context! { csrf_token, flashes }))
}

async fn register(
    view: Views,
    session: Session,
    State(db): State<DB>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if !csrf::verify(&session, &form.csrf_token).await? {
        return Err(Error::Forbidden);
    }

    let csrf_token = csrf::issue(&session).await?;

    if let Err(message) = form.validate() {
        return Ok(view.response("register.html", context! { csrf_token, error => message }));
    }

    // Argon2 is deliberately expensive, keep it off the async workers
    let password_hash = task::spawn_blocking(move || password::hash_password(&form.password))
        .await
        .map_err(|e| Error::Unexpected(e.into()))??;

    match store::create(
        db,
        CreateUserParameters {
            username: form.username,
            password_hash,
        },
    )
    .await
    {
        Ok(user) => {
            tracing::info!("{} registered", user.username);
            flash::push(&session, Level::Success, "Account created, please sign in").await;
            Ok(Redirect::to("/login").into_response())
        }
        Err(db::Error::Conflict(_)) => {
            Ok(view.response("register.html", context! { csrf_token, error => "Username already exists" }))
        }
        Err(err) => Err(err.into()),
    }
}

async fn logout(mut auth_session: AuthSession, session: Session) -> Result<Redirect> {
    auth_session.logout().await?;

    flash::push(&session, Level::Info, "Signed out").await;
    Ok(Redirect::to("/"))
}
