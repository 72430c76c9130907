// src/modules/user_quest/database.rs
// Database operations for users, quests and the user_quests join table

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{QuestError, Result};
use crate::util::database::Database;
use super::{NewQuest, Quest, QuestDetail, QuestStatus, User, UserQuest, CORE_CATEGORY};

pub(crate) fn init_user_quest_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS quests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            category TEXT NOT NULL,
            jurisdiction TEXT NOT NULL,
            creation_user INTEGER NOT NULL REFERENCES users(id),
            creation_time INTEGER NOT NULL,
            deletion_time INTEGER
        );

        CREATE TABLE IF NOT EXISTS user_quests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            quest_id INTEGER NOT NULL REFERENCES quests(id),
            status TEXT NOT NULL,
            completion_time INTEGER,
            UNIQUE (user_id, quest_id),
            CHECK ((status = 'complete') = (completion_time IS NOT NULL))
        );

        CREATE INDEX IF NOT EXISTS idx_user_quests_user ON user_quests(user_id);",
    )?;

    Ok(())
}

/// Trait to add user operations to Database
pub trait UserDatabase {
    fn create_user(&self, email: &str, role: &str) -> Result<i64>;
    fn get_user(&self, user_id: i64) -> Result<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Trait to add quest template operations to Database
pub trait QuestDatabase {
    fn create_quest(&self, quest: &NewQuest, creation_user: i64) -> Result<i64>;
    fn get_quest(&self, quest_id: i64) -> Result<Option<Quest>>;
    fn soft_delete_quest(&self, quest_id: i64) -> Result<()>;
}

/// Trait to add user quest operations to Database
pub trait UserQuestDatabase {
    /// Raw insert; sets `completion_time` when seeding a complete quest.
    /// `filed` is refused unless the quest is in the core category.
    fn insert_user_quest(&self, user_id: i64, quest_id: i64, status: QuestStatus) -> Result<i64>;
    fn find_user_quest(&self, user_id: i64, quest_id: i64) -> Result<Option<UserQuest>>;
    fn update_user_quest(&self, user_quest: &UserQuest) -> Result<()>;
    fn delete_user_quest(&self, user_id: i64, quest_id: i64) -> Result<()>;

    /// User quests joined with their quests, soft-deleted quests excluded.
    fn get_quest_details_for_user(&self, user_id: i64) -> Result<Vec<QuestDetail>>;
}

impl UserDatabase for Database {
    fn create_user(&self, email: &str, role: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (email, role) VALUES (?1, ?2)",
            params![email, role],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, role FROM users WHERE id = ?1",
                [user_id],
                parse_user_row,
            )
            .optional()?;

        Ok(user)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, role FROM users WHERE email = ?1",
                [email],
                parse_user_row,
            )
            .optional()?;

        Ok(user)
    }
}

impl QuestDatabase for Database {
    fn create_quest(&self, quest: &NewQuest, creation_user: i64) -> Result<i64> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO quests (title, category, jurisdiction, creation_user, creation_time)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                quest.title,
                quest.category,
                quest.jurisdiction,
                creation_user,
                now,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn get_quest(&self, quest_id: i64) -> Result<Option<Quest>> {
        let conn = self.conn()?;
        select_quest(&conn, quest_id)
    }

    fn soft_delete_quest(&self, quest_id: i64) -> Result<()> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE quests SET deletion_time = ?1 WHERE id = ?2 AND deletion_time IS NULL",
            params![now, quest_id],
        )?;

        if updated == 0 {
            // Already deleted is fine; unknown id is not
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM quests WHERE id = ?1)",
                [quest_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(QuestError::QuestNotFound(quest_id));
            }
        }

        Ok(())
    }
}

impl UserQuestDatabase for Database {
    fn insert_user_quest(&self, user_id: i64, quest_id: i64, status: QuestStatus) -> Result<i64> {
        let conn = self.conn()?;
        insert_user_quest_row(&conn, user_id, quest_id, status)
    }

    fn find_user_quest(&self, user_id: i64, quest_id: i64) -> Result<Option<UserQuest>> {
        let conn = self.conn()?;
        select_user_quest(&conn, user_id, quest_id)
    }

    fn update_user_quest(&self, user_quest: &UserQuest) -> Result<()> {
        let conn = self.conn()?;
        update_user_quest_row(&conn, user_quest)
    }

    fn delete_user_quest(&self, user_id: i64, quest_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM user_quests WHERE user_id = ?1 AND quest_id = ?2",
            params![user_id, quest_id],
        )?;

        if deleted == 0 {
            return Err(QuestError::UserQuestNotFound(quest_id));
        }

        Ok(())
    }

    fn get_quest_details_for_user(&self, user_id: i64) -> Result<Vec<QuestDetail>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT q.id, uq.id, q.title, q.category, q.jurisdiction, q.creation_user,
                    q.creation_time, uq.status, uq.completion_time
             FROM user_quests uq
             JOIN quests q ON q.id = uq.quest_id
             WHERE uq.user_id = ?1
             AND q.deletion_time IS NULL
             ORDER BY q.creation_time DESC, q.id DESC"
        )?;

        let details = stmt
            .query_map([user_id], parse_detail_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(details)
    }
}

// Connection-level operations, shared by the trait impls above and by
// service mutations that run several of them in one transaction.

pub(crate) fn select_quest(conn: &Connection, quest_id: i64) -> Result<Option<Quest>> {
    let quest = conn
        .query_row(
            "SELECT id, title, category, jurisdiction, creation_user, creation_time, deletion_time
             FROM quests
             WHERE id = ?1",
            [quest_id],
            parse_quest_row,
        )
        .optional()?;

    Ok(quest)
}

pub(crate) fn select_user_quest(
    conn: &Connection,
    user_id: i64,
    quest_id: i64,
) -> Result<Option<UserQuest>> {
    let user_quest = conn
        .query_row(
            "SELECT id, user_id, quest_id, status, completion_time
             FROM user_quests
             WHERE user_id = ?1 AND quest_id = ?2",
            params![user_id, quest_id],
            parse_user_quest_row,
        )
        .optional()?;

    Ok(user_quest)
}

/// Inserts only when the quest exists and, for `filed`, is a core quest.
pub(crate) fn insert_user_quest_row(
    conn: &Connection,
    user_id: i64,
    quest_id: i64,
    status: QuestStatus,
) -> Result<i64> {
    let completion_time = match status {
        QuestStatus::Complete => Some(Utc::now().timestamp_millis()),
        _ => None,
    };

    let inserted = conn
        .execute(
            "INSERT INTO user_quests (user_id, quest_id, status, completion_time)
             SELECT ?1, id, ?3, ?4
             FROM quests
             WHERE id = ?2 AND (?3 <> ?5 OR category = ?6)",
            params![
                user_id,
                quest_id,
                status,
                completion_time,
                QuestStatus::Filed,
                CORE_CATEGORY,
            ],
        )
        .map_err(|e| already_exists_on_conflict(e, quest_id))?;

    if inserted == 0 {
        return Err(match select_quest(conn, quest_id)? {
            Some(_) => QuestError::ReservedStatus,
            None => QuestError::QuestNotFound(quest_id),
        });
    }

    Ok(conn.last_insert_rowid())
}

/// Writes status and completion time back. Fails with `UserQuestNotFound`
/// when the row is gone and `ReservedStatus` when filing a non-core quest.
pub(crate) fn update_user_quest_row(conn: &Connection, user_quest: &UserQuest) -> Result<()> {
    let completion_time = user_quest.completion_time.map(|t| t.timestamp_millis());

    let updated = conn.execute(
        "UPDATE user_quests
         SET status = ?1, completion_time = ?2
         WHERE id = ?3
         AND (?1 <> ?4 OR EXISTS (
             SELECT 1 FROM quests q WHERE q.id = user_quests.quest_id AND q.category = ?5
         ))",
        params![
            user_quest.status,
            completion_time,
            user_quest.id,
            QuestStatus::Filed,
            CORE_CATEGORY,
        ],
    )?;

    if updated == 0 {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM user_quests WHERE id = ?1)",
            [user_quest.id],
            |row| row.get(0),
        )?;
        return Err(if exists {
            QuestError::ReservedStatus
        } else {
            QuestError::UserQuestNotFound(user_quest.quest_id)
        });
    }

    Ok(())
}

fn already_exists_on_conflict(err: rusqlite::Error, quest_id: i64) -> QuestError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            QuestError::AlreadyExists(quest_id)
        }
        other => other.into(),
    }
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_default()
}

fn parse_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        role: row.get(2)?,
    })
}

fn parse_quest_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quest> {
    let deletion_time: Option<i64> = row.get(6)?;

    Ok(Quest {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        jurisdiction: row.get(3)?,
        creation_user: row.get(4)?,
        creation_time: from_millis(row.get(5)?),
        deletion_time: deletion_time.map(from_millis),
    })
}

fn parse_user_quest_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserQuest> {
    let completion_time: Option<i64> = row.get(4)?;

    Ok(UserQuest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        quest_id: row.get(2)?,
        status: row.get(3)?,
        completion_time: completion_time.map(from_millis),
    })
}

fn parse_detail_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<QuestDetail> {
    let completion_time: Option<i64> = row.get(8)?;

    Ok(QuestDetail {
        quest_id: row.get(0)?,
        user_quest_id: row.get(1)?,
        title: row.get(2)?,
        category: row.get(3)?,
        jurisdiction: row.get(4)?,
        creation_user: row.get(5)?,
        creation_time: from_millis(row.get(6)?),
        status: row.get(7)?,
        completion_time: completion_time.map(from_millis),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user_id = db.create_user("test@example.com", "user").unwrap();
        (db, user_id)
    }

    fn new_quest(title: &str, category: &str) -> NewQuest {
        NewQuest {
            title: title.to_string(),
            category: category.to_string(),
            jurisdiction: "MA".to_string(),
        }
    }

    #[test]
    fn test_user_email_is_unique() {
        let (db, user_id) = setup();

        assert!(db.create_user("test@example.com", "admin").is_err());
        assert_eq!(db.get_user_by_email("test@example.com").unwrap().unwrap().id, user_id);
        assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
        assert_eq!(db.get_user(user_id).unwrap().unwrap().role, "user");
    }

    #[test]
    fn test_soft_delete_keeps_row() {
        let (db, user_id) = setup();
        let quest_id = db.create_quest(&new_quest("Court order", "core"), user_id).unwrap();

        db.soft_delete_quest(quest_id).unwrap();
        let quest = db.get_quest(quest_id).unwrap().unwrap();
        assert!(quest.is_deleted());

        // Second delete keeps the original timestamp
        db.soft_delete_quest(quest_id).unwrap();
        assert_eq!(db.get_quest(quest_id).unwrap().unwrap().deletion_time, quest.deletion_time);

        assert!(matches!(db.soft_delete_quest(999), Err(QuestError::QuestNotFound(999))));
    }

    #[test]
    fn test_user_quest_pair_is_unique() {
        let (db, user_id) = setup();
        let quest_id = db.create_quest(&new_quest("Court order", "core"), user_id).unwrap();

        db.insert_user_quest(user_id, quest_id, QuestStatus::NotStarted).unwrap();
        assert!(matches!(
            db.insert_user_quest(user_id, quest_id, QuestStatus::Active),
            Err(QuestError::AlreadyExists(id)) if id == quest_id
        ));
        assert!(matches!(
            db.insert_user_quest(user_id, 999, QuestStatus::Active),
            Err(QuestError::QuestNotFound(999))
        ));
    }

    #[test]
    fn test_filed_insert_requires_core_quest() {
        let (db, user_id) = setup();
        let housing = db.create_quest(&new_quest("Lease", "housing"), user_id).unwrap();
        let core = db.create_quest(&new_quest("Court order", "core"), user_id).unwrap();

        assert!(matches!(
            db.insert_user_quest(user_id, housing, QuestStatus::Filed),
            Err(QuestError::ReservedStatus)
        ));
        assert!(db.find_user_quest(user_id, housing).unwrap().is_none());

        db.insert_user_quest(user_id, core, QuestStatus::Filed).unwrap();
        let details = db.get_quest_details_for_user(user_id).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].category, "core");
    }

    #[test]
    fn test_filed_update_requires_core_quest() {
        let (db, user_id) = setup();
        let housing = db.create_quest(&new_quest("Lease", "housing"), user_id).unwrap();
        db.insert_user_quest(user_id, housing, QuestStatus::Active).unwrap();

        let mut record = db.find_user_quest(user_id, housing).unwrap().unwrap();
        record.status = QuestStatus::Filed;

        assert!(matches!(db.update_user_quest(&record), Err(QuestError::ReservedStatus)));
        assert_eq!(
            db.find_user_quest(user_id, housing).unwrap().unwrap().status,
            QuestStatus::Active
        );
    }

    #[test]
    fn test_writes_to_removed_record_fail() {
        let (db, user_id) = setup();
        let quest_id = db.create_quest(&new_quest("Court order", "core"), user_id).unwrap();
        db.insert_user_quest(user_id, quest_id, QuestStatus::NotStarted).unwrap();
        let mut record = db.find_user_quest(user_id, quest_id).unwrap().unwrap();

        db.delete_user_quest(user_id, quest_id).unwrap();

        record.status = QuestStatus::InProgress;
        assert!(matches!(
            db.update_user_quest(&record),
            Err(QuestError::UserQuestNotFound(id)) if id == quest_id
        ));
        assert!(matches!(
            db.delete_user_quest(user_id, quest_id),
            Err(QuestError::UserQuestNotFound(id)) if id == quest_id
        ));
    }

    #[test]
    fn test_schema_rejects_completion_time_without_complete() {
        let (db, user_id) = setup();
        let quest_id = db.create_quest(&new_quest("Court order", "core"), user_id).unwrap();
        let id = db.insert_user_quest(user_id, quest_id, QuestStatus::Complete).unwrap();

        let mut record = db.find_user_quest(user_id, quest_id).unwrap().unwrap();
        assert_eq!(record.id, id);
        assert!(record.completion_time.is_some());

        record.status = QuestStatus::InProgress;
        assert!(db.update_user_quest(&record).is_err());
    }

    #[test]
    fn test_details_skip_deleted_quests() {
        let (db, user_id) = setup();
        let kept = db.create_quest(&new_quest("Kept", "core"), user_id).unwrap();
        let gone = db.create_quest(&new_quest("Gone", "housing"), user_id).unwrap();
        db.insert_user_quest(user_id, kept, QuestStatus::Active).unwrap();
        db.insert_user_quest(user_id, gone, QuestStatus::Active).unwrap();

        db.soft_delete_quest(gone).unwrap();

        let details = db.get_quest_details_for_user(user_id).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].title, "Kept");
        assert_eq!(details[0].status, QuestStatus::Active);
    }

    #[test]
    fn test_details_are_scoped_to_user() {
        let (db, user_id) = setup();
        let other_id = db.create_user("other@example.com", "user").unwrap();
        let quest_id = db.create_quest(&new_quest("Shared", "core"), user_id).unwrap();
        db.insert_user_quest(other_id, quest_id, QuestStatus::InProgress).unwrap();

        assert!(db.get_quest_details_for_user(user_id).unwrap().is_empty());
        assert_eq!(db.get_quest_details_for_user(other_id).unwrap().len(), 1);
    }
}
