use std::str::FromStr;

use crate::error::QuestError;
use super::super::QuestStatus;

impl FromStr for QuestStatus {
    type Err = QuestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        QuestStatus::all()
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| QuestError::InvalidStatus(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_known_status() {
        for status in QuestStatus::all() {
            assert_eq!(status.as_str().parse::<QuestStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        for raw in ["invalid", "completed", "Complete", "not_started", ""] {
            let err = raw.parse::<QuestStatus>().unwrap_err();
            assert!(matches!(err, QuestError::InvalidStatus(ref s) if s == raw));
            assert!(err.to_string().starts_with("Invalid status"));
        }
    }
}
