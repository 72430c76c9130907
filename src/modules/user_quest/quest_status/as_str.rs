use super::super::QuestStatus;

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "notStarted",
            QuestStatus::Active => "active",
            QuestStatus::InProgress => "inProgress",
            QuestStatus::Complete => "complete",
            QuestStatus::Filed => "filed",
        }
    }
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
