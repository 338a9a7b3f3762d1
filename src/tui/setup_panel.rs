use std::io;

use crossterm::{event::{self, Event, KeyCode, KeyEvent, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use anyhow::Result;
use ratatui::{layout::{Constraint, Direction, Layout}, prelude::CrosstermBackend, style::{Modifier, Style}, text::{Line, Span, Text}, widgets::{Block, Borders, Paragraph}, Frame, Terminal};

use crate::config::{Profile, DEFAULT_BASE_URL};

/// The fields edited during first-run setup
#[derive(Clone, Debug)]
struct SetupData {
    name: String,
    base_url: String,
    focused_field: FieldFocus,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FieldFocus {
    Name,
    BaseUrl,
}

impl SetupData {
    fn new(initial_url: Option<String>) -> Self {
        SetupData {
            name: "default".to_string(),
            base_url: initial_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            focused_field: FieldFocus::BaseUrl,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focused_field {
            FieldFocus::Name => &mut self.name,
            FieldFocus::BaseUrl => &mut self.base_url,
        }
    }

    fn into_profile(self) -> Option<Profile> {
        let name = self.name.trim();
        let base_url = self.base_url.trim();
        if name.is_empty() || base_url.is_empty() {
            return None;
        }
        Some(Profile::new(name, base_url))
    }
}

/// Runs a small TUI asking for a profile name and the service base URL.
/// Returns `None` when the user aborts with Esc.
pub fn setup_tui(initial_url: Option<String>) -> Result<Option<Profile>> {
    let mut data = SetupData::new(initial_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let accepted = loop {
        terminal.draw(|f| ui_setup(f, &data))?;

        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
            match code {
                KeyCode::Esc => break false,
                KeyCode::Enter => break true,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    data.focused_field = match data.focused_field {
                        FieldFocus::Name => FieldFocus::BaseUrl,
                        FieldFocus::BaseUrl => FieldFocus::Name,
                    };
                }
                KeyCode::Backspace => {
                    data.focused_mut().pop();
                }
                KeyCode::Char(c) => data.focused_mut().push(c),
                _ => {}
            }
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(if accepted { data.into_profile() } else { None })
}

fn field_text(value: &str, focused: bool) -> Text<'static> {
    let text = Text::raw(value.to_string());
    if focused {
        text.patch_style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        text
    }
}

fn ui_setup(frame: &mut Frame, data: &SetupData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(1)])
        .split(frame.area());

    let name = Paragraph::new(field_text(&data.name, data.focused_field == FieldFocus::Name))
        .block(Block::default().title("Profile name").borders(Borders::ALL));
    frame.render_widget(name, chunks[0]);

    let url = Paragraph::new(field_text(&data.base_url, data.focused_field == FieldFocus::BaseUrl))
        .block(Block::default().title("Service base URL").borders(Borders::ALL));
    frame.render_widget(url, chunks[1]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let instructions = vec![
        Line::from("No BrandGenius profile found. Tell the console where the generation service runs."),
        Line::default(),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("<Enter>", bold),
            Span::raw(" to save, "),
            Span::styled("<Esc>", bold),
            Span::raw(" to quit, "),
            Span::styled("<Tab>", bold),
            Span::raw(" to switch fields."),
        ]),
    ];
    let block = Block::default().title(" First-run setup ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Text::from(instructions)).block(block), chunks[2]);
}
