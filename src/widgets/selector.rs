use ratatui::{buffer::Buffer, layout::Rect, style::Stylize, text::{Line, Span}, widgets::Widget};

use crate::brand::{BrandContext, Field};

/// One-line dropdown stand-in: `Label  ‹ Value ›`, highlighted when focused
#[derive(Debug, Clone)]
pub struct Selector {
    label: &'static str,
    value: &'static str,
    focused: bool,
}

impl Selector {
    pub fn new(context: &BrandContext, field: Field, focused: bool) -> Self {
        Selector {
            label: field.label(),
            value: context.value_label(field),
            focused,
        }
    }
}

impl Widget for Selector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Span::from(format!("{:<13}", self.label)).dark_gray();
        let value = if self.focused {
            Span::from(format!("‹ {} ›", self.value)).yellow().bold()
        } else {
            Span::from(format!("  {}  ", self.value)).bold()
        };
        Line::from(vec![label, value]).render(area, buf);
    }
}
