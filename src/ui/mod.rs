pub mod components;
pub mod screens;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use crate::app::App;
use crate::ui::screens::quest_board::render_quest_board;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_quest_board(&self.board, area, buf);
    }
}
