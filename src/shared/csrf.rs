use tower_sessions::{session, Session};
use uuid::Uuid;

const CSRF_KEY: &str = "csrf.token";

/// Returns the session's anti-forgery token, minting one on first use. The
/// token is embedded as a hidden field in every state-changing form.
pub async fn issue(session: &Session) -> Result<String, session::Error> {
    if let Some(token) = session.get::<String>(CSRF_KEY).await? {
        return Ok(token);
    }

    let token = Uuid::new_v4().to_string();
    session.insert(CSRF_KEY, token.clone()).await?;

    Ok(token)
}

pub async fn verify(session: &Session, token: &str) -> Result<bool, session::Error> {
    let expected = session.get::<String>(CSRF_KEY).await?;

    Ok(matches!(expected, Some(expected) if expected == token))
}
