use ratatui::style::Color;

use super::super::QuestStatus;

impl QuestStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "○",
            QuestStatus::Active => "◔",
            QuestStatus::InProgress => "◑",
            QuestStatus::Complete => "●",
            QuestStatus::Filed => "✉",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            QuestStatus::NotStarted => Color::Gray,
            QuestStatus::Active => Color::Cyan,
            QuestStatus::InProgress => Color::Yellow,
            QuestStatus::Complete => Color::Green,
            QuestStatus::Filed => Color::Magenta,
        }
    }
}
