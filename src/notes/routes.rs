use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use minijinja::context;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    ctx::BaseParams,
    shared::{
        csrf,
        flash::{self, Level},
    },
    views::Views,
    AppState, Error, Result,
};

use super::handlers;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/create", post(create_note))
        .route("/delete/:note_id", post(delete_note))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateNoteForm {
    title: String,
    content: String,
    csrf_token: String,
}

impl CreateNoteForm {
    fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.title.chars().count() <= 200 && !self.content.trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DeleteNoteForm {
    csrf_token: String,
}

/// Public listing: every note from every user, newest first. Only deletion is
/// owner-restricted.
async fn index(view: Views, session: Session, base: BaseParams) -> Result<Response> {
    let csrf_token = csrf::issue(&session).await?;
    let flashes = flash::take(&session).await;
    let user = base.ctx.user;

    let notes = handlers::find_notes(base.db).await?;

    Ok(view.response("index.html", context! { notes, user, flashes, csrf_token }))
}

async fn create_note(session: Session, base: BaseParams, Form(form): Form<CreateNoteForm>) -> Result<Response> {
    let Some(user) = base.ctx.user else {
        flash::push(&session, Level::Warning, "Sign in to create notes").await;
        return Ok(Redirect::to("/login").into_response());
    };

    if !csrf::verify(&session, &form.csrf_token).await? {
        return Err(Error::Forbidden);
    }

    // invalid input is dropped silently, matching the form re-render semantics
    // of the listing page
    if !form.is_valid() {
        return Ok(Redirect::to("/").into_response());
    }

    handlers::create_note(
        base.db,
        super::CreateNoteParameters {
            title: form.title,
            content: form.content,
            owner_id: user.id,
        },
    )
    .await?;

    flash::push(&session, Level::Success, "Note created").await;
    Ok(Redirect::to("/").into_response())
}

/// Existence is checked before ownership: a non-owner probing a nonexistent id
/// gets 404, a non-owner probing a real note gets 403.
async fn delete_note(
    Path(note_id): Path<Uuid>,
    session: Session,
    base: BaseParams,
    Form(form): Form<DeleteNoteForm>,
) -> Result<Redirect> {
    let Some(user) = base.ctx.user else {
        return Err(Error::Forbidden);
    };

    if !csrf::verify(&session, &form.csrf_token).await? {
        return Err(Error::Forbidden);
    }

    let note = handlers::get_note(base.db.clone(), note_id).await?;

    if note.owner_id != user.id {
        return Err(Error::Forbidden);
    }

    handlers::delete_note(base.db, note_id).await?;

    flash::push(&session, Level::Success, "Note deleted").await;
    Ok(Redirect::to("/"))
}
