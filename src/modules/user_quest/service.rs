// src/modules/user_quest/service.rs
// Identity-scoped queries and mutations over a user's quests

use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::error::{QuestError, Result};
use crate::util::database::Database;
use super::{
    Quest, QuestDetail, QuestStatus, UserQuest,
    database::{
        insert_user_quest_row, select_quest, select_user_quest, update_user_quest_row,
        UserQuestDatabase,
    },
    grouping::{group_by_category, group_by_status},
};

/// Quest operations performed on behalf of one (optional) signed-in user.
///
/// Queries made without an identity return empty results; mutations fail
/// with [`QuestError::Unauthenticated`].
#[derive(Debug, Clone)]
pub struct QuestService {
    database: Database,
    identity: Option<i64>,
}

impl QuestService {
    pub fn new(database: Database) -> Self {
        Self { database, identity: None }
    }

    /// Returns a copy of this service acting as `user_id`.
    pub fn with_identity(&self, user_id: i64) -> Self {
        Self {
            database: self.database.clone(),
            identity: Some(user_id),
        }
    }

    pub fn identity(&self) -> Option<i64> {
        self.identity
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn require_user(&self) -> Result<i64> {
        self.identity.ok_or(QuestError::Unauthenticated)
    }

    pub fn get_all(&self) -> Result<Vec<QuestDetail>> {
        let Some(user_id) = self.identity else {
            return Ok(Vec::new());
        };

        let details = self.database.get_quest_details_for_user(user_id)?;
        debug!(user_id, count = details.len(), "loaded user quests");
        Ok(details)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.get_all()?.len())
    }

    /// Starts `quest_id` for the caller with status `notStarted`.
    pub fn create(&self, quest_id: i64) -> Result<i64> {
        let user_id = self.require_user()?;

        let id = self.database.transaction(|conn| {
            active_quest(conn, quest_id)?;

            if select_user_quest(conn, user_id, quest_id)?.is_some() {
                return Err(QuestError::AlreadyExists(quest_id));
            }

            insert_user_quest_row(conn, user_id, quest_id, QuestStatus::NotStarted)
        })?;
        info!(user_id, quest_id, user_quest_id = id, "started quest");
        Ok(id)
    }

    pub fn get_status(&self, quest_id: i64) -> Result<Option<QuestStatus>> {
        Ok(self.get_by_quest_id(quest_id)?.map(|user_quest| user_quest.status))
    }

    pub fn get_by_quest_id(&self, quest_id: i64) -> Result<Option<UserQuest>> {
        let Some(user_id) = self.identity else {
            return Ok(None);
        };

        self.database.find_user_quest(user_id, quest_id)
    }

    pub fn set_status(&self, quest_id: i64, status: &str) -> Result<()> {
        let status: QuestStatus = status.parse()?;
        let user_id = self.require_user()?;

        let changed = self.database.transaction(|conn| {
            let quest = active_quest(conn, quest_id)?;
            let mut user_quest = select_user_quest(conn, user_id, quest_id)?
                .ok_or(QuestError::UserQuestNotFound(quest_id))?;

            if let Err(e) = quest.permits(status) {
                warn!(
                    user_id,
                    quest_id,
                    category = %quest.category,
                    %status,
                    "rejected status change"
                );
                return Err(e);
            }

            if !user_quest.apply_status(status, Utc::now()) {
                return Ok(false);
            }

            update_user_quest_row(conn, &user_quest)?;
            Ok(true)
        })?;

        if changed {
            info!(user_id, quest_id, %status, "updated quest status");
        } else {
            debug!(user_id, quest_id, %status, "status unchanged");
        }
        Ok(())
    }

    /// Permanently removes the caller's record for `quest_id`.
    pub fn delete_forever(&self, quest_id: i64) -> Result<()> {
        let user_id = self.require_user()?;

        self.database.delete_user_quest(user_id, quest_id)?;
        info!(user_id, quest_id, "deleted user quest");
        Ok(())
    }

    pub fn get_by_category(&self) -> Result<BTreeMap<String, Vec<QuestDetail>>> {
        Ok(group_by_category(self.get_all()?))
    }

    pub fn get_by_status(&self) -> Result<BTreeMap<QuestStatus, Vec<QuestDetail>>> {
        Ok(group_by_status(self.get_all()?))
    }
}

fn active_quest(conn: &Connection, quest_id: i64) -> Result<Quest> {
    select_quest(conn, quest_id)?
        .filter(|quest| !quest.is_deleted())
        .ok_or(QuestError::QuestNotFound(quest_id))
}
