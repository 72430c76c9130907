use chrono::{DateTime, Utc};

use crate::error::{QuestError, Result};
use super::{Quest, QuestStatus, UserQuest};

impl Quest {
    /// Checks whether `status` may be recorded against this quest.
    pub fn permits(&self, status: QuestStatus) -> Result<()> {
        if status == QuestStatus::Filed && !self.is_core() {
            return Err(QuestError::ReservedStatus);
        }
        Ok(())
    }
}

impl UserQuest {
    /// Moves to `status`, keeping `completion_time` set exactly while complete.
    /// Returns false when the status is unchanged and nothing was touched.
    pub fn apply_status(&mut self, status: QuestStatus, now: DateTime<Utc>) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        self.completion_time = match status {
            QuestStatus::Complete => Some(now),
            _ => None,
        };
        true
    }
}
