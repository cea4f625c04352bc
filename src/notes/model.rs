use serde::Serialize;
use uuid::Uuid;

use crate::users::UserId;

#[derive(Serialize, Debug, Clone)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub owner_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CreateNoteParameters {
    pub title: String,
    pub content: String,
    pub owner_id: UserId,
}
