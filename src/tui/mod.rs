pub mod widgets;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::session::PaletteSession;
use crate::vision::VisionDeficiency;

use self::widgets::{DetailsWidget, PaletteWidget};

/// State for the interactive palette editor.
pub struct TuiApp {
    pub session: PaletteSession,
    pub selected: usize,
    pub simulation: Option<VisionDeficiency>,
    /// Hex being typed after pressing `a`; `None` outside input mode.
    pub input: Option<String>,
    pub status: String,
    pub should_quit: bool,
}

const HELP: &str = "a add  r random  d delete  c clear  g accessible  s simulate  v size  x reset history  ^Z undo  ^Y redo  q quit";

impl TuiApp {
    pub fn new(session: PaletteSession) -> Self {
        Self {
            session,
            selected: 0,
            simulation: None,
            input: None,
            status: String::new(),
            should_quit: false,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.palette().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn selected_id(&self) -> Option<String> {
        self.session
            .palette()
            .get(self.selected)
            .map(|c| c.id().to_string())
    }

    /// Apply one key press. Returns after updating state; never blocks.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('z') if ctrl && !shift => self.undo(),
            KeyCode::Char('z') | KeyCode::Char('Z') if ctrl => self.redo(),
            KeyCode::Char('y') if ctrl => self.redo(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Char('a') => {
                self.input = Some(String::from("#"));
                self.status = "type a hex color, Enter to add, Esc to cancel".into();
            }
            KeyCode::Char('r') => {
                let id = self.session.add_random_color();
                self.selected = self.session.palette().len().saturating_sub(1);
                self.status = format!("added random color {id}");
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    if let Err(e) = self.session.remove_color(&id) {
                        self.status = e.to_string();
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('c') => {
                self.session.clear();
                self.selected = 0;
                self.status = "cleared".into();
            }
            KeyCode::Char('g') => match self.session.generate_accessible() {
                Ok(0) => self.status = "palette is empty".into(),
                Ok(n) => self.status = format!("added {n} accessible colors"),
                Err(e) => self.status = e.to_string(),
            },
            KeyCode::Char('s') => {
                self.simulation = match self.simulation {
                    None => Some(VisionDeficiency::ALL[0]),
                    Some(VisionDeficiency::Achromatomaly) => None,
                    Some(kind) => Some(kind.next()),
                };
            }
            KeyCode::Char('v') => {
                let size = self.session.card_size().next();
                self.session.set_card_size(size);
            }
            KeyCode::Char('x') => {
                self.session.reset_history();
                self.status = "history reset".into();
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.input = None;
                self.status.clear();
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_hexdigit() || c == '#' => input.push(c),
            KeyCode::Enter => {
                let hex = input.clone();
                match self.session.add_color(&hex) {
                    Ok(id) => {
                        self.input = None;
                        self.selected = self.session.palette().len().saturating_sub(1);
                        self.status = format!("added {id}");
                    }
                    Err(e) => self.status = e.to_string(),
                }
            }
            _ => {}
        }
    }

    fn undo(&mut self) {
        self.status = if self.session.undo() {
            "undo".into()
        } else {
            "nothing to undo".into()
        };
        self.clamp_selection();
    }

    fn redo(&mut self) {
        self.status = if self.session.redo() {
            "redo".into()
        } else {
            "nothing to redo".into()
        };
        self.clamp_selection();
    }

    fn draw(&self, frame: &mut Frame) {
        let [header, body, details, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        let undo_mark = if self.session.can_undo() { "undo" } else { "    " };
        let redo_mark = if self.session.can_redo() { "redo" } else { "    " };
        frame.render_widget(
            Paragraph::new(format!(
                " {}  {} colors  accessibility {}%  [{undo_mark}] [{redo_mark}]",
                self.session.name(),
                self.session.palette().len(),
                self.session.accessibility_score(),
            ))
            .style(Style::default().add_modifier(Modifier::BOLD)),
            header,
        );

        frame.render_widget(
            PaletteWidget::new(self.session.palette(), Some(self.selected))
                .simulation(self.simulation)
                .card_size(self.session.card_size()),
            body,
        );
        frame.render_widget(
            DetailsWidget::new(self.session.palette().get(self.selected)),
            details,
        );

        let prompt = match &self.input {
            Some(input) => format!(" add: {input}"),
            None => format!(" {}", self.status),
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(prompt),
                Line::from(Span::styled(
                    format!(" {HELP}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ]),
            footer,
        );
    }
}

/// Launch the TUI application and return the session when the user quits.
pub fn run(app: TuiApp) -> Result<PaletteSession> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: TuiApp) -> Result<PaletteSession> {
    while !app.should_quit {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;
        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            debug!(code = ?key.code, "key");
            app.handle_key(key);
        }
    }
    Ok(app.session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> TuiApp {
        let session =
            PaletteSession::new(&Config::default(), Box::new(MemoryStore::new())).unwrap();
        TuiApp::new(session)
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut TuiApp, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn typed_hex_is_added() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        for c in "002868".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_none());
        assert_eq!(app.session.palette().len(), 6);
        assert_eq!(app.session.palette()[5].hex(), "#002868");
        assert_eq!(app.selected, 5);
    }

    #[test]
    fn bad_hex_stays_in_input_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_some());
        assert!(app.status.contains("invalid color"));
        assert_eq!(app.session.palette().len(), 5);

        press(&mut app, KeyCode::Esc);
        assert!(app.input.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn ctrl_z_and_ctrl_y() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.session.palette().is_empty());
        ctrl(&mut app, 'z');
        assert_eq!(app.session.palette().len(), 5);
        ctrl(&mut app, 'y');
        assert!(app.session.palette().is_empty());
        ctrl(&mut app, 'z');
        app.handle_key(KeyEvent::new(
            KeyCode::Char('Z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ));
        assert!(app.session.palette().is_empty());
    }

    #[test]
    fn delete_selected_and_clamp() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected, 4);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.session.palette().len(), 4);
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn simulation_cycles_back_to_none() {
        let mut app = app();
        for _ in 0..VisionDeficiency::ALL.len() {
            press(&mut app, KeyCode::Char('s'));
            assert!(app.simulation.is_some());
        }
        press(&mut app, KeyCode::Char('s'));
        assert!(app.simulation.is_none());
    }

    #[test]
    fn generate_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.session.palette().len(), 10);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn draws_header_and_palette() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buf = terminal.backend().buffer();
        let header: String = (0..100).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(header.contains("My Color Palette"), "got {header}");
        assert!(header.contains("5 colors"));
    }
}
