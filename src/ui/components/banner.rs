use ratatui::{
    prelude::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::UiComponent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerVariant {
    Danger,
    Info,
}

impl BannerVariant {
    pub fn color(&self) -> Color {
        match self {
            BannerVariant::Danger => Color::Red,
            BannerVariant::Info => Color::Blue,
        }
    }
}

impl UiComponent {
    pub fn banner<'a>(variant: BannerVariant, lines: Vec<Line<'a>>) -> Paragraph<'a> {
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(variant.color()))
                    .padding(Padding::horizontal(1))
            )
            .style(Style::default().fg(variant.color()))
            .wrap(Wrap { trim: true })
    }
}
