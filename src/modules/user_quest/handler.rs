// src/modules/user_quest/handler.rs

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::{log_debug, log_error, log_info, log_warn};
use super::{QuestDetail, QuestService, QuestStatus};

/// State behind the quest board screen.
#[derive(Debug)]
pub struct QuestBoardHandler {
    service: QuestService,
    /// Flattened in category order, as displayed.
    quests: Vec<QuestDetail>,
    selected_index: usize,
    status_message: Option<String>,
    status_is_error: bool,
    export_path: PathBuf,
}

impl QuestBoardHandler {
    pub fn new(service: QuestService, export_path: PathBuf) -> Self {
        let mut handler = Self {
            service,
            quests: Vec::new(),
            selected_index: 0,
            status_message: None,
            status_is_error: false,
            export_path,
        };

        handler.load_quests();

        handler
    }

    pub fn load_quests(&mut self) {
        match self.service.get_by_category() {
            Ok(groups) => {
                self.quests = groups.into_values().flatten().collect();
                self.selected_index = self.selected_index.min(self.quests.len().saturating_sub(1));
                log_info!("Loaded {} quests", self.quests.len());
            }
            Err(e) => {
                log_error!("Failed to load quests: {}", e);
                self.set_error(format!("Error loading quests: {}", e));
            }
        }
    }

    pub fn quests(&self) -> &[QuestDetail] {
        &self.quests
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&QuestDetail> {
        self.quests.get(self.selected_index)
    }

    pub fn status_message(&self) -> Option<(&str, bool)> {
        self.status_message
            .as_deref()
            .map(|message| (message, self.status_is_error))
    }

    pub fn select_next(&mut self) {
        if self.selected_index < self.quests.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn set_info(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    fn apply_to_selected(&mut self, status: QuestStatus) {
        let Some(quest) = self.selected() else {
            return;
        };
        let (quest_id, title) = (quest.quest_id, quest.title.clone());

        match self.service.set_status(quest_id, status.as_str()) {
            Ok(()) => {
                log_debug!("Quest {} -> {}", quest_id, status);
                self.set_info(format!("{} {}: {}", status.icon(), title, status));
                self.load_quests();
            }
            Err(e) => {
                log_warn!("Status change for quest {} rejected: {}", quest_id, e);
                self.set_error(e.to_string());
            }
        }
    }

    pub fn cycle_selected_status(&mut self) {
        if let Some(status) = self.selected().map(|q| q.status.next_in_cycle()) {
            self.apply_to_selected(status);
        }
    }

    pub fn file_selected(&mut self) {
        self.apply_to_selected(QuestStatus::Filed);
    }

    pub fn delete_selected(&mut self) {
        let Some(quest) = self.selected() else {
            return;
        };
        let (quest_id, title) = (quest.quest_id, quest.title.clone());

        match self.service.delete_forever(quest_id) {
            Ok(()) => {
                self.set_info(format!("Removed: {}", title));
                self.load_quests();
            }
            Err(e) => {
                log_error!("Failed to delete quest {}: {}", quest_id, e);
                self.set_error(e.to_string());
            }
        }
    }

    /// Writes the grouped-by-status view as JSON.
    pub fn export_snapshot(&mut self) {
        let path = self.export_path.clone();
        match self.write_snapshot(&path) {
            Ok(()) => {
                log_info!("Exported quests to {}", path.display());
                self.set_info(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log_error!("Export to {} failed: {}", path.display(), e);
                self.set_error(format!("Export failed: {}", e));
            }
        }
    }

    fn write_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.service.get_by_status()?;
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user_quest::{NewQuest, QuestDatabase, UserDatabase};
    use crate::util::database::Database;

    fn board(quests: &[(&str, &str)]) -> (QuestBoardHandler, tempfile::TempDir) {
        let database = Database::open_in_memory().unwrap();
        let user_id = database.create_user("test@example.com", "user").unwrap();
        let service = QuestService::new(database.clone()).with_identity(user_id);

        for (title, category) in quests {
            let quest = NewQuest {
                title: title.to_string(),
                category: category.to_string(),
                jurisdiction: "MA".to_string(),
            };
            let quest_id = database.create_quest(&quest, user_id).unwrap();
            service.create(quest_id).unwrap();
        }

        let temp_dir = tempfile::TempDir::new().unwrap();
        let export_path = temp_dir.path().join("snapshot.json");
        (QuestBoardHandler::new(service, export_path), temp_dir)
    }

    #[test]
    fn test_quests_ordered_by_category() {
        let (handler, _dir) = board(&[("Lease", "housing"), ("Court order", "core")]);

        let categories: Vec<&str> = handler.quests().iter().map(|q| q.category.as_str()).collect();
        assert_eq!(categories, vec!["core", "housing"]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let (mut handler, _dir) = board(&[("A", "core"), ("B", "core")]);

        handler.select_previous();
        assert_eq!(handler.selected_index(), 0);
        handler.select_next();
        handler.select_next();
        assert_eq!(handler.selected_index(), 1);
    }

    #[test]
    fn test_cycle_and_file() {
        let (mut handler, _dir) = board(&[("Court order", "core")]);

        handler.cycle_selected_status();
        assert_eq!(handler.selected().unwrap().status, QuestStatus::InProgress);
        handler.cycle_selected_status();
        assert_eq!(handler.selected().unwrap().status, QuestStatus::Complete);
        assert!(handler.selected().unwrap().completion_time.is_some());

        handler.file_selected();
        assert_eq!(handler.selected().unwrap().status, QuestStatus::Filed);
        assert!(handler.selected().unwrap().completion_time.is_none());
    }

    #[test]
    fn test_filing_non_core_shows_error() {
        let (mut handler, _dir) = board(&[("Lease", "housing")]);

        handler.file_selected();

        assert_eq!(handler.selected().unwrap().status, QuestStatus::NotStarted);
        assert_eq!(
            handler.status_message(),
            Some(("This status is reserved for core quests only.", true))
        );
    }

    #[test]
    fn test_delete_selected_keeps_selection_in_range() {
        let (mut handler, _dir) = board(&[("A", "core"), ("B", "core")]);
        handler.select_next();

        handler.delete_selected();

        assert_eq!(handler.quests().len(), 1);
        assert_eq!(handler.selected_index(), 0);
        assert!(matches!(handler.status_message(), Some((_, false))));
    }

    #[test]
    fn test_export_writes_grouped_json() {
        let (mut handler, dir) = board(&[("Court order", "core"), ("Lease", "housing")]);
        handler.cycle_selected_status();

        handler.export_snapshot();

        let raw = std::fs::read_to_string(dir.path().join("snapshot.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["inProgress"].as_array().unwrap().len(), 1);
        assert_eq!(json["notStarted"][0]["title"], "Lease");
        assert!(json["notStarted"][0]["questId"].is_i64());
    }
}
