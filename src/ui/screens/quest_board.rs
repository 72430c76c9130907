// src/ui/screens/quest_board.rs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::modules::user_quest::handler::QuestBoardHandler;
use crate::ui::components::{EmptyState, UiComponent};
use crate::ui::style::{ACCENT, category_style, dim_unless_focused, row_style};

const HELP: &str = "↑/↓: Move • s: Next status • f: File • x: Delete • e: Export • q: Quit";

pub fn render_quest_board(board: &QuestBoardHandler, area: Rect, buf: &mut Buffer) {
    let status = board.status_message();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if status.is_some() {
            vec![
                Constraint::Length(3),  // Title
                Constraint::Min(1),     // Quest list
                Constraint::Length(3),  // Status
                Constraint::Length(3),  // Help
            ]
        } else {
            vec![
                Constraint::Length(3),  // Title
                Constraint::Min(1),     // Quest list
                Constraint::Length(3),  // Help
            ]
        })
        .split(area);

    let title = Paragraph::new(format!("🗺️  Quests ({})", board.quests().len()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
        )
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    if board.quests().is_empty() {
        EmptyState::new("🧭", "No quests yet")
            .subtitle("Quests you start will show up here.")
            .border_color(ACCENT)
            .render(chunks[1], buf);
    } else {
        let (items, selected_row) = quest_items(board);
        let mut state = ListState::default().with_selected(selected_row);
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
        );
        StatefulWidget::render(list, chunks[1], buf, &mut state);
    }

    let help_chunk = match status {
        Some((message, is_error)) => {
            UiComponent::status(message, is_error).render(chunks[2], buf);
            chunks[3]
        }
        None => chunks[2],
    };
    UiComponent::help(HELP).render(help_chunk, buf);
}

/// Category headers followed by their quests, in board order, plus the row
/// of the selected quest so the list scrolls to keep it visible.
fn quest_items(board: &QuestBoardHandler) -> (Vec<ListItem<'static>>, Option<usize>) {
    let selected_category = board.selected().map(|q| q.category.as_str());
    let mut items = Vec::new();
    let mut selected_row = None;
    let mut current_category: Option<&str> = None;

    for (i, quest) in board.quests().iter().enumerate() {
        if current_category != Some(quest.category.as_str()) {
            current_category = Some(quest.category.as_str());
            let focused = selected_category == current_category;
            items.push(ListItem::new(Line::from(Span::styled(
                quest.category.clone(),
                dim_unless_focused(focused, category_style()),
            ))));
        }

        let is_selected = i == board.selected_index();
        if is_selected {
            selected_row = Some(items.len());
        }
        let prefix = if is_selected { "▶ " } else { "  " };
        let style = if is_selected {
            row_style(true)
        } else {
            row_style(false).fg(quest.status.color())
        };
        items.push(ListItem::new(format!("{}{}", prefix, quest.display_summary())).style(style));
    }

    (items, selected_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user_quest::{NewQuest, QuestDatabase, QuestService, UserDatabase};
    use crate::util::database::Database;

    fn render(board: &QuestBoardHandler) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_quest_board(board, area, &mut buf);

        buf.content
            .chunks(80)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn board(quests: &[(&str, &str)]) -> QuestBoardHandler {
        let database = Database::open_in_memory().unwrap();
        let user_id = database.create_user("test@example.com", "user").unwrap();
        let service = QuestService::new(database.clone()).with_identity(user_id);
        for (title, category) in quests {
            let quest = NewQuest {
                title: title.to_string(),
                category: category.to_string(),
                jurisdiction: "MA".to_string(),
            };
            service.create(database.create_quest(&quest, user_id).unwrap()).unwrap();
        }
        QuestBoardHandler::new(service, std::env::temp_dir().join("unused-export.json"))
    }

    #[test]
    fn test_empty_board_shows_placeholder() {
        let rows = render(&board(&[]));

        assert!(rows.iter().any(|row| row.contains("No quests yet")));
        assert!(rows.iter().any(|row| row.contains("Quests you start will show up here.")));
    }

    #[test]
    fn test_board_lists_quests_under_categories() {
        let rows = render(&board(&[("Lease", "housing"), ("Court order", "core")]));

        let core = rows.iter().position(|row| row.contains("core")).unwrap();
        let court = rows.iter().position(|row| row.contains("Court order")).unwrap();
        let housing = rows.iter().position(|row| row.contains("housing")).unwrap();
        let lease = rows.iter().position(|row| row.contains("Lease")).unwrap();

        assert!(core < court && court < housing && housing < lease);
        assert!(rows[court].contains("▶"));
        assert!(!rows.iter().any(|row| row.contains("No quests yet")));
    }

    #[test]
    fn test_list_scrolls_to_selection() {
        let titles: Vec<String> = (0..30).map(|i| format!("Quest {:02}", i)).collect();
        let quests: Vec<(&str, &str)> = titles.iter().map(|t| (t.as_str(), "core")).collect();
        let mut board = board(&quests);
        for _ in 0..titles.len() {
            board.select_next();
        }
        let selected_title = board.selected().unwrap().title.clone();

        let rows = render(&board);

        let selected_row = rows.iter().find(|row| row.contains("▶")).unwrap();
        assert!(selected_row.contains(&selected_title));
    }

    #[test]
    fn test_status_bar_shows_rejection() {
        let mut board = board(&[("Lease", "housing")]);
        board.file_selected();

        let rows = render(&board);
        assert!(rows.iter().any(|row| row.contains("reserved for core quests only")));
    }
}
