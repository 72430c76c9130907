// src/modules/user_quest/mod.rs

pub mod database;
pub mod grouping;
pub mod handler;
pub mod seed;
pub mod service;
mod quest_status;
mod transition;

pub use database::{QuestDatabase, UserDatabase, UserQuestDatabase};
pub use grouping::{group_by_category, group_by_status};
pub use service::QuestService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The category that unlocks [`QuestStatus::Filed`].
pub const CORE_CATEGORY: &str = "core";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestStatus {
    NotStarted,
    Active,
    InProgress,
    Complete,
    Filed, // core quests only
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: i64,
    pub title: String,
    pub category: String, // "core", "housing", ...
    pub jurisdiction: String,
    pub creation_user: i64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_time: DateTime<Utc>,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub deletion_time: Option<DateTime<Utc>>, // soft-delete marker
}

impl Quest {
    pub fn is_core(&self) -> bool {
        self.category == CORE_CATEGORY
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion_time.is_some()
    }
}

/// Fields supplied when creating a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuest {
    pub title: String,
    pub category: String,
    pub jurisdiction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuest {
    pub id: i64,
    pub user_id: i64,
    pub quest_id: i64,
    pub status: QuestStatus,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub completion_time: Option<DateTime<Utc>>,
}

/// A user quest joined with its (non-deleted) quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDetail {
    pub quest_id: i64,
    pub user_quest_id: i64,
    pub title: String,
    pub category: String,
    pub jurisdiction: String,
    pub creation_user: i64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub creation_time: DateTime<Utc>,
    pub status: QuestStatus,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub completion_time: Option<DateTime<Utc>>,
}

impl QuestDetail {
    pub fn display_summary(&self) -> String {
        let completed = match self.completion_time {
            Some(time) => format!(" [done {}]", time.format("%Y-%m-%d")),
            None => String::new(),
        };

        format!(
            "{} {} - {}{}",
            self.status.icon(),
            self.title,
            self.jurisdiction,
            completed
        )
    }
}
