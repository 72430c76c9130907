use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::error::{QuestError, Result};
use super::{BannerVariant, UiComponent};

/// Display settings for one strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthLevel {
    pub label: &'static str,
    pub text: Color,
    /// `None` leaves the bar transparent.
    pub fill: Option<Color>,
}

pub const STRENGTH_LEVELS: [StrengthLevel; 5] = [
    StrengthLevel { label: "Very weak", text: Color::Red, fill: None },
    StrengthLevel { label: "Weak", text: Color::Red, fill: Some(Color::Red) },
    StrengthLevel { label: "Okay", text: Color::Gray, fill: Some(Color::Yellow) },
    StrengthLevel { label: "Good", text: Color::Gray, fill: Some(Color::LightGreen) },
    StrengthLevel { label: "Great!", text: Color::Green, fill: Some(Color::Green) },
];

const TRACK: &str = "░";
const FILL: &str = "█";

/// Meter for a password strength score from 0 to 4, with optional
/// warning and suggestions underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    value: u8,
    warning: Option<String>,
    suggestions: Vec<String>,
}

impl PasswordStrength {
    pub const MAX: i32 = 4;

    pub fn new(value: i32) -> Result<Self> {
        if !(0..=Self::MAX).contains(&value) {
            return Err(QuestError::StrengthOutOfRange(value));
        }

        Ok(Self {
            value: value as u8,
            warning: None,
            suggestions: Vec::new(),
        })
    }

    pub fn warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn level(&self) -> &'static StrengthLevel {
        &STRENGTH_LEVELS[self.value as usize]
    }

    pub fn percentage(&self) -> u16 {
        self.value as u16 * 100 / Self::MAX as u16
    }

    fn warning_height(&self) -> u16 {
        if self.warning.is_some() { 3 } else { 0 }
    }

    fn suggestions_height(&self) -> u16 {
        if self.suggestions.is_empty() { 0 } else { 3 + self.suggestions.len() as u16 }
    }

    /// Rows needed to render without clipping.
    pub fn height(&self) -> u16 {
        2 + self.warning_height() + self.suggestions_height()
    }

    fn bar(&self, width: u16) -> Line<'static> {
        let filled = (width as u32 * self.value as u32 / Self::MAX as u32) as u16;
        let fill_style = match self.level().fill {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        };

        Line::from(vec![
            Span::styled(FILL.repeat(filled as usize), fill_style),
            Span::styled(
                TRACK.repeat(width.saturating_sub(filled) as usize),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}

impl Widget for &PasswordStrength {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                          // Bar
                Constraint::Length(1),                          // Caption
                Constraint::Length(self.warning_height()),
                Constraint::Length(self.suggestions_height()),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(self.bar(chunks[0].width)).render(chunks[0], buf);

        Paragraph::new("Password Strength")
            .fg(Color::Gray)
            .render(chunks[1], buf);
        Paragraph::new(Span::styled(
            self.level().label,
            Style::default().fg(self.level().text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);

        if let Some(warning) = &self.warning {
            UiComponent::banner(BannerVariant::Danger, vec![Line::from(warning.as_str())])
                .render(chunks[2], buf);
        }

        if !self.suggestions.is_empty() {
            let mut lines = vec![Line::from("To fix this:")];
            lines.extend(
                self.suggestions
                    .iter()
                    .map(|suggestion| Line::from(format!("• {}", suggestion))),
            );
            UiComponent::banner(BannerVariant::Info, lines).render(chunks[3], buf);
        }
    }
}
