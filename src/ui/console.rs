use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::app::{App, Focus, Mode, ResultView};
use crate::brand::Field;
use crate::ui::{tabs, terminal};
use crate::widgets::selector::Selector;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Draw the whole Prompt Console
pub fn draw(f: &mut Frame, app: &App, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.banners.len() as u16),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    terminal::draw_banners(f, chunks[0], &app.banners);
    draw_tabs(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);
    draw_inputs(f, body[0], app);
    draw_result(f, body[1], app, tick);
    draw_status(f, chunks[3], app);

    if let Some(alert) = &app.alert {
        terminal::draw_alert(f, alert);
    }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Mode::all()
        .iter()
        .enumerate()
        .map(|(i, m)| Line::from(format!("F{} {}", i + 1, m.title())))
        .collect();
    let selected = Mode::all().iter().position(|m| *m == app.mode).unwrap_or(0);
    let mut title = format!(
        " BrandGenius Enterprise · {} ({}, {}) ",
        app.profile.name,
        app.profile.base_url,
        app.profile.api_revision.label()
    );
    if let Some(score) = app.audit_score {
        title.push_str(&format!("· last audit {}% ", score));
    }
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn input_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    Block::default().title(title).borders(Borders::ALL).border_style(style)
}

fn with_cursor(text: &str, focused: bool) -> String {
    if focused { format!("{}▏", text) } else { text.to_string() }
}

fn draw_inputs(f: &mut Frame, area: Rect, app: &App) {
    let context_height = if app.context_panel_visible { Constraint::Min(8) } else { Constraint::Length(0) };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3), context_height])
        .split(area);

    // Prompt
    let prompt_focused = app.focus == Focus::Prompt;
    let prompt_title = if app.mode == Mode::Audit { " Content to audit " } else { " Prompt " };
    let prompt = if app.prompt.is_empty() && !prompt_focused {
        Paragraph::new(app.mode.placeholder().dark_gray())
    } else {
        Paragraph::new(with_cursor(&app.prompt, prompt_focused))
    };
    f.render_widget(
        prompt.wrap(Wrap { trim: false }).block(input_block(prompt_title.to_string(), prompt_focused)),
        chunks[0],
    );

    // File
    let file_focused = app.focus == Focus::File;
    let file_title = format!(" {} ", app.mode.file_hint());
    let file_line = match &app.selected_file {
        Some(file) if !file_focused => Line::from(vec![
            Span::from("📎 "),
            Span::from(file.name.clone()).bold(),
            Span::from(format!("  {} · {} bytes", file.content_type, file.bytes.len())).dark_gray(),
        ]),
        _ if app.file_input.is_empty() && !file_focused => Line::from("Type a path, Enter to attach".dark_gray()),
        _ => Line::from(with_cursor(&app.file_input, file_focused)),
    };
    f.render_widget(Paragraph::new(file_line).block(input_block(file_title, file_focused)), chunks[1]);

    if app.context_panel_visible {
        draw_context_panel(f, chunks[2], app);
    }
}

fn draw_context_panel(f: &mut Frame, area: Rect, app: &App) {
    let any_focus = matches!(app.focus, Focus::Selector(_) | Focus::Context);
    let block = input_block(format!(" Brand context ({}) ", app.context.source().label()), any_focus);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, field) in [Field::Role, Field::Industry, Field::Tone, Field::Style].into_iter().enumerate() {
        let selector = Selector::new(&app.context, field, app.focus == Focus::Selector(field));
        f.render_widget(selector, chunks[i]);
    }

    let text_focused = app.focus == Focus::Context;
    let style = if text_focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let text = Paragraph::new(with_cursor(app.context.text(), text_focused))
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).title(" Instruction "));
    f.render_widget(text, chunks[4]);
}

fn draw_result(f: &mut Frame, area: Rect, app: &App, tick: usize) {
    if let Some(action) = app.pending {
        let frame = SPINNER[tick % SPINNER.len()];
        let waiting = Paragraph::new(format!("{} {}…", frame, action.label()))
            .block(Block::default().title(" Working ").borders(Borders::ALL));
        f.render_widget(waiting, area);
        return;
    }

    match &app.result {
        ResultView::Empty => {
            let idle = Paragraph::new(format!("Results appear here. Press Enter to {}.", app.mode.submit_label().to_lowercase()).dark_gray())
                .wrap(Wrap { trim: false })
                .block(Block::default().title(" Result ").borders(Borders::ALL));
            f.render_widget(idle, area);
        }
        ResultView::Text(text) => tabs::copywriter::draw_result(f, area, text, app.result_scroll),
        ResultView::Image(image) => tabs::studio::draw_result(f, area, image),
        ResultView::Audit(audit) => tabs::guardian::draw_result(f, area, audit, app.result_scroll),
        ResultView::Error(message) => {
            let err = Paragraph::new(message.clone().red().bold())
                .block(Block::default().title(" Result ").borders(Borders::ALL));
            f.render_widget(err, area);
        }
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let submit = match app.submit_blocker() {
        None => Span::from(format!(" ⏎ {} ", app.mode.submit_label())).black().on_green().bold(),
        Some(reason) => Span::from(format!(" {} (disabled: {}) ", app.mode.submit_label(), reason)).dark_gray(),
    };
    let help = Span::from(
        "  Tab focus · F1-F4 mode · ^E extract · ^U upload · ^X drop file · ^B context · ^Y copy · PgUp/PgDn scroll · ^C quit",
    )
    .dark_gray();
    f.render_widget(Paragraph::new(Line::from(vec![submit, help])), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::parse_audit;
    use crate::config::{Profile, DEFAULT_BASE_URL};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| draw(f, app, 0)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Positions of every cell run spelling `needle`, from row `top` down
    fn find_all(buf: &Buffer, needle: &str, top: u16) -> Vec<(u16, u16)> {
        let want: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
        let area = buf.area;
        let mut hits = Vec::new();
        for y in top..area.height {
            let row: Vec<&str> = (0..area.width).map(|x| buf[(x, y)].symbol()).collect();
            for (x, w) in row.windows(want.len()).enumerate() {
                if w.iter().zip(&want).all(|(a, b)| *a == b.as_str()) {
                    hits.push((x as u16, y));
                }
            }
        }
        hits
    }

    fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        find_all(buf, needle, 0).into_iter().next()
    }

    fn app() -> App {
        App::new(Profile::new("local", DEFAULT_BASE_URL))
    }

    #[test]
    fn audit_score_is_yellow_in_good_band() {
        let mut app = app();
        app.set_mode(Mode::Audit);
        let audit = parse_audit(r#"{"overall_score":85,"tone_score":80,"rubric_breakdown":[],"improvement_suggestions":[]}"#);
        app.audit_score = audit.score();
        app.result = ResultView::Audit(audit);

        let buf = render(&app);
        // the tab header (rows 0-2) repeats the last score uncoloured
        let hits = find_all(&buf, "85%", 3);
        assert_eq!(hits.len(), 1, "score shown once in the result area: {:?}", hits);
        let (x, y) = hits[0];
        assert_eq!(buf[(x, y)].fg, Color::Yellow);
        assert_eq!(find_all(&buf, "Good. Minor tweaks needed.", 3).len(), 1);
        assert!(find(&buf, "Overall score").is_none());
        assert!(find(&buf, "Tone alignment").is_some());
    }

    #[test]
    fn malformed_audit_shows_raw_text() {
        let mut app = app();
        app.result = ResultView::Audit(parse_audit("Looks on brand overall"));
        let buf = render(&app);
        assert!(find(&buf, "Looks on brand overall").is_some());
    }

    #[test]
    fn product_submit_is_disabled_without_file() {
        let mut app = app();
        app.set_mode(Mode::Product);
        app.prompt = "Marble counter".into();
        let buf = render(&app);
        assert!(find(&buf, "Swap Background (disabled: Select a product image first.)").is_some());
    }

    #[test]
    fn error_and_alert_are_rendered() {
        let mut app = app();
        app.result = ResultView::Error("Error generating image.".into());
        app.alert = Some("Could not read brand.pdf".into());
        let buf = render(&app);
        assert!(find(&buf, "Error generating image.").is_some());
        assert!(find(&buf, "Could not read brand.pdf").is_some());
        assert!(find(&buf, "Press any key to dismiss.").is_some());
    }

    #[test]
    fn text_result_is_rendered_as_markdown() {
        let mut app = app();
        app.result = ResultView::Text("## Spring launch\n\n- **Fresh** looks".into());
        let buf = render(&app);
        let (x, y) = find(&buf, "Spring launch").unwrap();
        assert_eq!(buf[(x, y)].fg, Color::Cyan);
        assert!(find(&buf, "• Fresh looks").is_some());
    }
}
