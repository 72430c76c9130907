//! Quest tracker: users start quests and move them through a small set of
//! statuses, stored in SQLite and shown on a terminal board.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod modules;
pub mod ui;
pub mod util;

pub use config::AppConfig;
pub use error::{QuestError, Result};
pub use modules::user_quest::{
    CORE_CATEGORY, NewQuest, Quest, QuestDetail, QuestService, QuestStatus, User, UserQuest,
};
pub use util::database::Database;
