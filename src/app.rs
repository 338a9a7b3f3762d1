// src/app.rs
use crate::audit::AuditOutcome;
use crate::brand::{BrandContext, Field};
use crate::config::Profile;
use crate::console::Action;
use crate::models::{Attachment, SavedImage};

/// Generation modes, one tab each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Copy,
    Image,
    Product,
    Audit,
}

impl Mode {
    /// Return all available modes in tab order
    pub fn all() -> &'static [Mode] {
        &[Mode::Copy, Mode::Image, Mode::Product, Mode::Audit]
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Copy => "Copywriter",
            Mode::Image => "Art Studio",
            Mode::Product => "Product Studio",
            Mode::Audit => "Brand Guardian",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Mode::Copy => "Generate Text",
            Mode::Image => "Generate Visual",
            Mode::Product => "Swap Background",
            Mode::Audit => "Audit Content",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Copy => "e.g., Write a LinkedIn post announcing our spring range...",
            Mode::Image => "e.g., A futuristic coffee shop at dawn...",
            Mode::Product => "e.g., Place the product on a marble kitchen counter...",
            Mode::Audit => "Paste the content to audit against the brand context...",
        }
    }

    pub fn file_hint(self) -> &'static str {
        match self {
            Mode::Copy => "Attach guidelines (optional)",
            Mode::Image => "Attach style reference (optional)",
            Mode::Product => "Product photo (required)",
            Mode::Audit => "Brand document for context extraction",
        }
    }
}

/// Which input receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    File,
    Selector(Field),
    Context,
}

impl Focus {
    fn order(context_visible: bool) -> &'static [Focus] {
        if context_visible {
            &[
                Focus::Prompt,
                Focus::File,
                Focus::Selector(Field::Role),
                Focus::Selector(Field::Industry),
                Focus::Selector(Field::Tone),
                Focus::Selector(Field::Style),
                Focus::Context,
            ]
        } else {
            &[Focus::Prompt, Focus::File]
        }
    }
}

/// What the result area shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Empty,
    Text(String),
    Image(SavedImage),
    Audit(AuditOutcome),
    Error(String),
}

/// Holds the Prompt Console session state
#[derive(Debug)]
pub struct App {
    /// Active service profile
    pub profile: Profile,
    pub mode: Mode,
    pub focus: Focus,
    /// Buffer for the prompt (or the content to audit)
    pub prompt: String,
    /// Path typed into the file box, attached on Enter
    pub file_input: String,
    pub selected_file: Option<Attachment>,
    pub context: BrandContext,
    pub context_panel_visible: bool,
    pub result: ResultView,
    /// Set while a request is in flight
    pub pending: Option<Action>,
    pub audit_score: Option<u8>,
    /// Error and status messages to display as banners
    pub banners: Vec<String>,
    /// Blocking message, dismissed by any key
    pub alert: Option<String>,
    pub result_scroll: u16,
    pub should_quit: bool,
}

const MAX_BANNERS: usize = 3;

impl App {
    pub fn new(profile: Profile) -> Self {
        App {
            profile,
            mode: Mode::Copy,
            focus: Focus::Prompt,
            prompt: String::new(),
            file_input: String::new(),
            selected_file: None,
            context: BrandContext::new(),
            context_panel_visible: true,
            result: ResultView::Empty,
            pending: None,
            audit_score: None,
            banners: Vec::new(),
            alert: None,
            result_scroll: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch tab. The selected file belongs to the tab it was picked on;
    /// prompt and context carry over.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.remove_file();
        }
    }

    /// Cycle to the next tab
    pub fn next_mode(&mut self) {
        let modes = Mode::all();
        if let Some(pos) = modes.iter().position(|m| *m == self.mode) {
            self.set_mode(modes[(pos + 1) % modes.len()]);
        }
    }

    /// Cycle to the previous tab
    pub fn prev_mode(&mut self) {
        let modes = Mode::all();
        if let Some(pos) = modes.iter().position(|m| *m == self.mode) {
            self.set_mode(modes[(pos + modes.len() - 1) % modes.len()]);
        }
    }

    pub fn next_focus(&mut self) {
        let order = Focus::order(self.context_panel_visible);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn prev_focus(&mut self) {
        let order = Focus::order(self.context_panel_visible);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    pub fn toggle_context_panel(&mut self) {
        self.context_panel_visible = !self.context_panel_visible;
        if !self.context_panel_visible && matches!(self.focus, Focus::Selector(_) | Focus::Context) {
            self.focus = Focus::Prompt;
        }
    }

    pub fn reveal_context_panel(&mut self) {
        self.context_panel_visible = true;
    }

    pub fn attach(&mut self, file: Attachment) {
        self.file_input = file.name.clone();
        self.selected_file = Some(file);
    }

    pub fn remove_file(&mut self) {
        self.selected_file = None;
        self.file_input.clear();
    }

    /// Move a selector; warns when that replaces extracted or edited text
    pub fn cycle_selector(&mut self, field: Field, forward: bool) {
        if let Some(replaced) = self.context.cycle(field, forward) {
            self.add_banner(format!("Brand context rebuilt from selectors; {} text replaced.", replaced.label()));
        }
    }

    /// Why the submit action is disabled, if it is
    pub fn submit_blocker(&self) -> Option<&'static str> {
        if self.is_loading() {
            return Some("A request is already running.");
        }
        if self.prompt.trim().is_empty() {
            return Some(match self.mode {
                Mode::Audit => "Enter the content to audit.",
                _ => "Enter a prompt first.",
            });
        }
        if self.mode == Mode::Product {
            match &self.selected_file {
                None => return Some("Select a product image first."),
                Some(f) if !f.is_image() => return Some("The product file must be an image."),
                Some(_) => {}
            }
        }
        None
    }

    /// Add a banner message (e.g. errors or status)
    pub fn add_banner(&mut self, msg: impl Into<String>) {
        self.banners.push(msg.into());
        if self.banners.len() > MAX_BANNERS {
            self.banners.remove(0);
        }
    }

    /// Dismiss the oldest banner
    pub fn dismiss_banner(&mut self) {
        if !self.banners.is_empty() {
            self.banners.remove(0);
        }
    }

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(5);
    }

    pub fn scroll_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(5);
    }

    /// Text that can be copied out of the result area
    pub fn result_text(&self) -> Option<String> {
        match &self.result {
            ResultView::Text(t) => Some(t.clone()),
            ResultView::Audit(a) => Some(a.text().to_string()),
            ResultView::Image(img) => Some(img.path.display().to_string()),
            ResultView::Empty | ResultView::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn app() -> App {
        App::new(Profile::new("test", DEFAULT_BASE_URL))
    }

    #[test]
    fn switching_tabs_clears_file_but_keeps_prompt_and_context() {
        let mut app = app();
        app.prompt = "Spring launch".into();
        app.context.set_extracted("Calm and warm.");
        app.attach(Attachment::new("guide.pdf", vec![1]));

        app.next_mode();
        assert_eq!(app.mode, Mode::Image);
        assert!(app.selected_file.is_none());
        assert!(app.file_input.is_empty());
        assert_eq!(app.prompt, "Spring launch");
        assert_eq!(app.context.text(), "Calm and warm.");

        app.prev_mode();
        app.prev_mode();
        assert_eq!(app.mode, Mode::Audit);
    }

    #[test]
    fn product_needs_prompt_and_image() {
        let mut app = app();
        app.set_mode(Mode::Product);
        assert!(app.submit_blocker().is_some());

        app.prompt = "On a beach".into();
        assert_eq!(app.submit_blocker(), Some("Select a product image first."));

        app.attach(Attachment::new("notes.txt", vec![1]));
        assert_eq!(app.submit_blocker(), Some("The product file must be an image."));

        app.attach(Attachment::new("shoe.png", vec![1]));
        assert!(app.submit_blocker().is_none());
    }

    #[test]
    fn other_modes_only_need_a_prompt() {
        let mut app = app();
        assert!(app.submit_blocker().is_some());
        app.prompt = "   ".into();
        assert!(app.submit_blocker().is_some());
        app.prompt = "Hello".into();
        for mode in [Mode::Copy, Mode::Image, Mode::Audit] {
            app.set_mode(mode);
            assert!(app.submit_blocker().is_none(), "{:?}", mode);
        }
    }

    #[test]
    fn focus_skips_hidden_context_panel() {
        let mut app = app();
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus, Focus::Selector(Field::Role));

        app.toggle_context_panel();
        assert_eq!(app.focus, Focus::Prompt);
        app.next_focus();
        app.next_focus();
        assert_eq!(app.focus, Focus::Prompt);
        app.prev_focus();
        assert_eq!(app.focus, Focus::File);
    }

    #[test]
    fn selector_change_after_extraction_raises_banner() {
        let mut app = app();
        app.cycle_selector(Field::Tone, true);
        assert!(app.banners.is_empty());

        app.context.set_extracted("From the PDF");
        app.cycle_selector(Field::Tone, true);
        assert_eq!(app.banners.len(), 1);
        assert!(app.banners[0].contains("extracted from file"));
    }

    #[test]
    fn banners_are_capped() {
        let mut app = app();
        for i in 0..5 {
            app.add_banner(format!("b{}", i));
        }
        assert_eq!(app.banners, vec!["b2", "b3", "b4"]);
        app.dismiss_banner();
        assert_eq!(app.banners, vec!["b3", "b4"]);
    }
}
