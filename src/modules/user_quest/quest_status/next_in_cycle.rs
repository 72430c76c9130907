use super::super::QuestStatus;

impl QuestStatus {
    /// Status the board moves to when the user cycles a quest.
    /// Filing is a separate action, so the cycle never lands on `Filed`.
    pub fn next_in_cycle(&self) -> QuestStatus {
        match self {
            QuestStatus::NotStarted => QuestStatus::InProgress,
            QuestStatus::Active => QuestStatus::InProgress,
            QuestStatus::InProgress => QuestStatus::Complete,
            QuestStatus::Complete => QuestStatus::NotStarted,
            QuestStatus::Filed => QuestStatus::NotStarted,
        }
    }
}
