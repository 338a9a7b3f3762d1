use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::audit::{render_details, AuditOutcome, Verdict};
use crate::ui::markdown;

pub fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Excellent => Color::Green,
        Verdict::Good => Color::Yellow,
        Verdict::NeedsRevision => Color::Red,
    }
}

/// Draw the Brand Guardian audit: score line, bar, then the report
pub fn draw_result(f: &mut Frame, area: Rect, audit: &AuditOutcome, scroll: u16) {
    let AuditOutcome::Parsed { report, .. } = audit else {
        // unstructured answer, shown as-is
        let raw = Paragraph::new(audit.text().to_string())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(Block::default().title(" Audit Report ").borders(Borders::ALL));
        f.render_widget(raw, area);
        return;
    };

    let block = Block::default().title(" Audit Report ").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let verdict = Verdict::from_score(report.overall_score);
    let color = verdict_color(verdict);
    let headline = Line::from(vec![
        Span::styled(
            format!("{}%", report.overall_score),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(verdict.message(), Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(headline), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .percent(u16::from(report.overall_score))
        .label("");
    f.render_widget(gauge, chunks[1]);

    let body = Paragraph::new(markdown::render(&render_details(report)))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(body, chunks[3]);
}
