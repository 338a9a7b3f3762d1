use std::io;
use crossterm::{execute, terminal::{EnterAlternateScreen, LeaveAlternateScreen, enable_raw_mode, disable_raw_mode}};
use ratatui::{backend::CrosstermBackend, Terminal, Frame};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Set up the terminal in raw mode and enter the alternate screen
pub fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal to its previous state
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Draw banner messages, one per line
pub fn draw_banners(f: &mut Frame, area: Rect, banners: &[String]) {
    if banners.is_empty() {
        return;
    }
    let lines: Vec<Line> = banners
        .iter()
        .map(|b| Line::from(format!(" ▸ {}", b)).style(Style::default().fg(Color::Black).bg(Color::LightBlue)))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

/// Draw a blocking alert centred over everything else
pub fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered(f.area(), 60, 9);
    f.render_widget(Clear, area);
    let mut text = Text::from(message.to_string());
    text.lines.push(Line::default());
    text.lines.push(Line::from("Press any key to dismiss.".dark_gray()));
    let alert = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Alert ").borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    f.render_widget(alert, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    cell
}
