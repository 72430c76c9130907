use super::super::QuestStatus;

impl QuestStatus {
    pub fn all() -> Vec<QuestStatus> {
        vec![
            QuestStatus::NotStarted,
            QuestStatus::Active,
            QuestStatus::InProgress,
            QuestStatus::Complete,
            QuestStatus::Filed,
        ]
    }
}
