use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::modules::user_quest::{handler::QuestBoardHandler, seed::ensure_seeded};
use crate::util::database::Database;
use crate::log_info;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use color_eyre::Result;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Quest board state
    pub board: QuestBoardHandler,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Opens the database, signs in the configured user and loads their quests.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let database = Database::new(&config.database_path)?;
        let service = ensure_seeded(&database, config)?;
        log_info!(
            "Signed in as {} (user {:?})",
            config.user.email,
            service.identity()
        );

        Ok(Self {
            running: true,
            board: QuestBoardHandler::new(service, config.export_path.clone()),
            events: EventHandler::new(),
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {}
                Event::Crossterm(crossterm::event::Event::Key(key_event)) => {
                    self.handle_key_events(key_event);
                }
                Event::Crossterm(crossterm::event::Event::Resize(_, _)) => needs_redraw = true,
                Event::Crossterm(_) => {}
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        if let Some(app_event) = map_key(key_event) {
            self.events.send(app_event);
        }
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Next => self.board.select_next(),
            AppEvent::Previous => self.board.select_previous(),
            AppEvent::CycleStatus => self.board.cycle_selected_status(),
            AppEvent::File => self.board.file_selected(),
            AppEvent::DeleteForever => self.board.delete_selected(),
            AppEvent::Export => self.board.export_snapshot(),
            AppEvent::Refresh => self.board.load_quests(),
            AppEvent::Quit => self.quit(),
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Key bindings for the quest board.
pub fn map_key(key_event: KeyEvent) -> Option<AppEvent> {
    let event = match key_event.code {
        KeyCode::Esc | KeyCode::Char('q') => AppEvent::Quit,
        KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => AppEvent::Quit,
        KeyCode::Up | KeyCode::Char('k') => AppEvent::Previous,
        KeyCode::Down | KeyCode::Char('j') => AppEvent::Next,
        KeyCode::Char('s') | KeyCode::Enter => AppEvent::CycleStatus,
        KeyCode::Char('f') => AppEvent::File,
        KeyCode::Char('x') => AppEvent::DeleteForever,
        KeyCode::Char('e') => AppEvent::Export,
        KeyCode::Char('r') => AppEvent::Refresh,
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(map_key(key(KeyCode::Down)), Some(AppEvent::Next));
        assert_eq!(map_key(key(KeyCode::Char('k'))), Some(AppEvent::Previous));
        assert_eq!(map_key(key(KeyCode::Char('f'))), Some(AppEvent::File));
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::Quit)
        );
    }
}
