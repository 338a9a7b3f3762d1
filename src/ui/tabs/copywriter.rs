use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::markdown;

/// Draw a generated copy result as rendered markdown
pub fn draw_result(f: &mut Frame, area: Rect, text: &str, scroll: u16) {
    let body = Paragraph::new(markdown::render(text))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().title(" Generated Strategy ").borders(Borders::ALL));
    f.render_widget(body, area);
}
