use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{self, DB};

use super::{CreateNoteParameters, Note};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
            owner_id: row.get(5)?,
        })
    }
}

pub async fn create_note(db: DB, args: CreateNoteParameters) -> db::Result<Note> {
    db.call(move |conn| {
        conn.query_row(
            r#"INSERT INTO notes (title, content, created_at, owner_id) VALUES (?, ?, ?, ?)
                RETURNING id, title, content, created_at, updated_at, owner_id"#,
            params![args.title, args.content, chrono::Utc::now(), args.owner_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
}

pub async fn find_notes(db: DB) -> db::Result<Vec<Note>> {
    db.call(|conn| {
        let notes = conn
            .prepare(
                "SELECT id, title, content, created_at, updated_at, owner_id FROM notes ORDER BY created_at DESC, id DESC",
            )?
            .query_map([], |row| Note::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    })
    .await
    .map_err(db::Error::from)
}

pub async fn get_note(db: DB, note_id: Uuid) -> db::Result<Note> {
    db.call(move |conn| {
        conn.query_row(
            "SELECT id, title, content, created_at, updated_at, owner_id FROM notes WHERE id = ?",
            params![note_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| e.not_found_message("Note not found"))
}

pub async fn delete_note(db: DB, note_id: Uuid) -> db::Result<Note> {
    db.call(move |conn| {
        conn.query_row(
            r#"DELETE FROM notes
              WHERE id = ?
              RETURNING id, title, content, created_at, updated_at, owner_id"#,
            params![note_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| e.not_found_message("Note not found"))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::db::{self, init_test_db};

    use super::*;

    fn create_args(title: &str, owner_id: Uuid) -> CreateNoteParameters {
        CreateNoteParameters {
            title: title.into(),
            content: format!("{title} content"),
            owner_id,
        }
    }

    #[tokio::test]
    async fn note_create() {
        let db = init_test_db().await.unwrap();
        let owner_id = Uuid::new_v4();

        let note = create_note(db, create_args("first", owner_id)).await.unwrap();

        assert_eq!(note.title, "first");
        assert_eq!(note.content, "first content");
        assert_eq!(note.owner_id, owner_id);
        assert!(note.updated_at.is_none());
    }

    #[tokio::test]
    async fn notes_listed_newest_first() {
        let db = init_test_db().await.unwrap();
        let owner_id = Uuid::new_v4();

        create_note(db.clone(), create_args("older", owner_id)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        create_note(db.clone(), create_args("newer", owner_id)).await.unwrap();

        let notes = find_notes(db).await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "newer");
        assert_eq!(notes[1].title, "older");
    }

    #[tokio::test]
    async fn equal_creation_times_fall_back_to_id_order() {
        let db = init_test_db().await.unwrap();

        // uuid7 ids are time-ordered, so the higher id is the later insert
        db.call(|conn| {
            conn.execute_batch(
                r#"INSERT INTO notes (id, title, content, created_at, owner_id)
                    VALUES (x'00000000000000000000000000000001', 'first', 'c', '2024-01-01 00:00:00', x'000000000000000000000000000000aa');
                  INSERT INTO notes (id, title, content, created_at, owner_id)
                    VALUES (x'00000000000000000000000000000002', 'second', 'c', '2024-01-01 00:00:00', x'000000000000000000000000000000aa');"#,
            )?;
            Ok(())
        })
        .await
        .unwrap();

        let notes = find_notes(db).await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "second");
        assert_eq!(notes[1].title, "first");
    }

    #[tokio::test]
    async fn note_get_and_delete() {
        let db = init_test_db().await.unwrap();
        let owner_id = Uuid::new_v4();

        let note = create_note(db.clone(), create_args("gone soon", owner_id)).await.unwrap();

        let found = get_note(db.clone(), note.id).await.unwrap();
        assert_eq!(found.id, note.id);

        let deleted = delete_note(db.clone(), note.id).await.unwrap();
        assert_eq!(deleted.id, note.id);

        let missing = get_note(db.clone(), note.id).await;
        assert!(matches!(missing.err(), Some(db::Error::NotFound(_))));

        let notes = find_notes(db).await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn note_delete_missing() {
        let db = init_test_db().await.unwrap();

        let missing = delete_note(db, Uuid::new_v4()).await;

        assert!(matches!(missing.err(), Some(db::Error::NotFound(_))));
    }
}
