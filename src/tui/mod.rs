pub mod widgets;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::DefaultTerminal;

use crate::cli::ThemeMode;
use crate::config::ThemeConfig;
use crate::pipeline::assign::{Role, RolePalette};
use widgets::PaletteWidget;

/// State for the interactive preview.
pub struct TuiApp {
    pub light: RolePalette,
    pub dark: RolePalette,
    pub mode: ThemeMode,
    pub selected: usize,
    pub config: ThemeConfig,
    quit: bool,
}

impl TuiApp {
    pub fn new(
        light: RolePalette,
        dark: RolePalette,
        mode: ThemeMode,
        config: ThemeConfig,
    ) -> Self {
        Self {
            light,
            dark,
            mode,
            selected: 0,
            config,
            quit: false,
        }
    }

    pub fn palette(&self) -> &RolePalette {
        match self.mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn selected_role(&self) -> Role {
        Role::ALL[self.selected % Role::ALL.len()]
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Char('t') => self.mode = self.mode.toggled(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % Role::ALL.len();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = (self.selected + Role::ALL.len() - 1) % Role::ALL.len();
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(
            PaletteWidget::new(self.palette(), Some(self.selected_role()), &self.config),
            main,
        );
        frame.render_widget(
            Paragraph::new(" ←/→ select role   Tab toggle light/dark   q quit")
                .style(Style::default().fg(Color::DarkGray)),
            help,
        );
    }
}

/// Launch the preview and block until the user quits.
pub fn run(mut app: TuiApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut TuiApp) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}
