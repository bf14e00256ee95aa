//! Main TUI application

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::prelude::*;
use std::time::{Duration, Instant};

use super::home::HomeView;
use super::styles::Theme;
use crate::config::Config;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    home: HomeView,
    should_quit: bool,
    theme: Theme,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            home: HomeView::new(config.ui),
            should_quit: false,
            theme: Theme::from_name(&config.theme.name),
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            let redraw = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                        true
                    }
                    Some(Ok(Event::Resize(_, _))) => true,
                    Some(Ok(_)) => false,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = tick.tick() => self.home.expire_status(Instant::now()),
            };

            if redraw {
                terminal.draw(|f| self.render(f))?;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.home.render(frame, area, &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.home.handle_key(key) {
            match action {
                Action::Quit => self.should_quit = true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
}
