use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    prelude::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Call to action shown under an empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyButton {
    pub label: String,
}

/// Placeholder for screens with nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub button: Option<EmptyButton>,
    pub border_color: Option<Color>,
}

impl EmptyState {
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            subtitle: None,
            button: None,
            border_color: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn button(mut self, label: impl Into<String>) -> Self {
        self.button = Some(EmptyButton { label: label.into() });
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = vec![
            Line::from(self.icon.as_str()).fg(Color::Gray),
            Line::default(),
            Line::from(Span::styled(
                self.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        if let Some(subtitle) = &self.subtitle {
            lines.push(Line::from(subtitle.as_str()).fg(Color::Gray).italic());
        }

        if let Some(button) = &self.button {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("[ {} ]", button.label),
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            )));
        }

        lines
    }
}

impl Widget for &EmptyState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default();
        if let Some(color) = self.border_color {
            block = block
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let top = inner.height.saturating_sub(lines.len() as u16) / 2;
        let content = Rect {
            y: inner.y + top,
            height: inner.height - top,
            ..inner
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &EmptyState, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        state.render(area, &mut buf);

        buf.content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn row_of(rows: &[String], needle: &str) -> Option<usize> {
        rows.iter().position(|row| row.contains(needle))
    }

    #[test]
    fn test_title_only() {
        let state = EmptyState::new("?", "Page not found");
        let rows = render(&state, 40, 9);

        let icon = row_of(&rows, "?").unwrap();
        let title = row_of(&rows, "Page not found").unwrap();
        assert_eq!(title, icon + 2);
        assert!(row_of(&rows, "[").is_none());
    }

    #[test]
    fn test_with_subtitle() {
        let state = EmptyState::new("?", "Page not found").subtitle("We couldn't find that page.");
        let rows = render(&state, 40, 9);

        let title = row_of(&rows, "Page not found").unwrap();
        assert_eq!(row_of(&rows, "We couldn't find that page."), Some(title + 1));
    }

    #[test]
    fn test_with_button() {
        let state = EmptyState::new("?", "Page not found")
            .subtitle("We couldn't find that page.")
            .button("Return home");
        let rows = render(&state, 40, 9);

        let subtitle = row_of(&rows, "We couldn't").unwrap();
        assert_eq!(row_of(&rows, "[ Return home ]"), Some(subtitle + 2));
    }

    #[test]
    fn test_content_is_vertically_centered() {
        let state = EmptyState::new("?", "Nothing here");
        let rows = render(&state, 30, 11);

        // Three lines in eleven rows leaves four above
        assert_eq!(row_of(&rows, "?"), Some(4));
    }

    #[test]
    fn test_border_when_colored() {
        let state = EmptyState::new("?", "Nothing here").border_color(Color::Magenta);
        let rows = render(&state, 30, 7);

        assert!(rows[0].starts_with('┌'));
        assert!(rows[6].starts_with('└'));
    }
}
