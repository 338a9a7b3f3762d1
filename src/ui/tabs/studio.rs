use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::SavedImage;

/// Draw a generated image (Art Studio and Product Studio): where it landed and what it is
pub fn draw_result(f: &mut Frame, area: Rect, image: &SavedImage) {
    let lines = vec![
        Line::from("Image ready".green().bold()),
        Line::default(),
        Line::from(vec!["Saved to  ".dark_gray(), image.path.display().to_string().bold()]),
        Line::from(vec!["Size      ".dark_gray(), human_size(image.size).into()]),
        Line::from(vec!["Type      ".dark_gray(), image.content_type.clone().into()]),
        Line::default(),
        Line::from("Ctrl+Y copies the path.".dark_gray()),
    ];
    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(" Generated Asset ").borders(Borders::ALL));
    f.render_widget(body, area);
}

fn human_size(bytes: u64) -> String {
    match bytes {
        0..=1023 => format!("{} B", bytes),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1_048_576), "3.0 MB");
    }
}
