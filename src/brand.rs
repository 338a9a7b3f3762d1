//! Brand context: the instruction sent alongside every generation request.
//!
//! The text is either templated from four selector choices, extracted from
//! an uploaded document, or typed by hand. Whichever wrote last wins; the
//! mutators report when they replace text that came from somewhere else so
//! the console can say so.

/// Enumerated selector with a fixed, ordered set of options
pub trait Choice: Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    fn label(self) -> &'static str;

    fn cycled(self, forward: bool) -> Self {
        let all = Self::all();
        let pos = all.iter().position(|c| *c == self).unwrap_or(0);
        let next = if forward {
            (pos + 1) % all.len()
        } else {
            (pos + all.len() - 1) % all.len()
        };
        all[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    MarketingManager,
    Founder,
    SocialMediaManager,
    Copywriter,
    BrandStrategist,
}

impl Choice for Role {
    fn all() -> &'static [Self] {
        &[
            Role::MarketingManager,
            Role::Founder,
            Role::SocialMediaManager,
            Role::Copywriter,
            Role::BrandStrategist,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Role::MarketingManager => "Marketing Manager",
            Role::Founder => "Founder",
            Role::SocialMediaManager => "Social Media Manager",
            Role::Copywriter => "Copywriter",
            Role::BrandStrategist => "Brand Strategist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Technology,
    Retail,
    Healthcare,
    Finance,
    Hospitality,
}

impl Choice for Industry {
    fn all() -> &'static [Self] {
        &[
            Industry::Technology,
            Industry::Retail,
            Industry::Healthcare,
            Industry::Finance,
            Industry::Hospitality,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Retail => "Retail",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Hospitality => "Hospitality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Friendly,
    Bold,
    Playful,
    Luxurious,
}

impl Choice for Tone {
    fn all() -> &'static [Self] {
        &[
            Tone::Professional,
            Tone::Friendly,
            Tone::Bold,
            Tone::Playful,
            Tone::Luxurious,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Bold => "Bold",
            Tone::Playful => "Playful",
            Tone::Luxurious => "Luxurious",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualStyle {
    Minimalist,
    Vibrant,
    Corporate,
    Vintage,
    Futuristic,
}

impl Choice for VisualStyle {
    fn all() -> &'static [Self] {
        &[
            VisualStyle::Minimalist,
            VisualStyle::Vibrant,
            VisualStyle::Corporate,
            VisualStyle::Vintage,
            VisualStyle::Futuristic,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            VisualStyle::Minimalist => "Minimalist",
            VisualStyle::Vibrant => "Vibrant",
            VisualStyle::Corporate => "Corporate",
            VisualStyle::Vintage => "Vintage",
            VisualStyle::Futuristic => "Futuristic",
        }
    }
}

/// One of the four selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Role,
    Industry,
    Tone,
    Style,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Role => "Role",
            Field::Industry => "Industry",
            Field::Tone => "Tone",
            Field::Style => "Visual style",
        }
    }
}

/// Where the current context text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    Template,
    Extracted,
    Manual,
}

impl ContextSource {
    pub fn label(self) -> &'static str {
        match self {
            ContextSource::Template => "templated",
            ContextSource::Extracted => "extracted from file",
            ContextSource::Manual => "edited",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandContext {
    pub role: Role,
    pub industry: Industry,
    pub tone: Tone,
    pub style: VisualStyle,
    text: String,
    source: ContextSource,
}

impl Default for BrandContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BrandContext {
    pub fn new() -> Self {
        let mut ctx = BrandContext {
            role: Role::all()[0],
            industry: Industry::all()[0],
            tone: Tone::all()[0],
            style: VisualStyle::all()[0],
            text: String::new(),
            source: ContextSource::Template,
        };
        ctx.text = ctx.template();
        ctx
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> ContextSource {
        self.source
    }

    /// The sentence built from the four selectors
    pub fn template(&self) -> String {
        format!(
            "You are a {} in the {} industry. Write in a {} tone and keep visuals {}.",
            self.role.label(),
            self.industry.label().to_lowercase(),
            self.tone.label().to_lowercase(),
            self.style.label().to_lowercase(),
        )
    }

    pub fn value_label(&self, field: Field) -> &'static str {
        match field {
            Field::Role => self.role.label(),
            Field::Industry => self.industry.label(),
            Field::Tone => self.tone.label(),
            Field::Style => self.style.label(),
        }
    }

    /// Move one selector and rebuild the text. Returns the source that was
    /// overwritten when it was not the template.
    pub fn cycle(&mut self, field: Field, forward: bool) -> Option<ContextSource> {
        match field {
            Field::Role => self.role = self.role.cycled(forward),
            Field::Industry => self.industry = self.industry.cycled(forward),
            Field::Tone => self.tone = self.tone.cycled(forward),
            Field::Style => self.style = self.style.cycled(forward),
        }
        let replaced = self.replaced_by(ContextSource::Template);
        self.text = self.template();
        self.source = ContextSource::Template;
        replaced
    }

    /// Replace the text with what the service extracted from a document.
    /// Returns the source that was overwritten when it differs.
    pub fn set_extracted(&mut self, text: impl Into<String>) -> Option<ContextSource> {
        let replaced = self.replaced_by(ContextSource::Extracted);
        self.text = text.into();
        self.source = ContextSource::Extracted;
        replaced
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.source = ContextSource::Manual;
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
        self.source = ContextSource::Manual;
    }

    fn replaced_by(&self, incoming: ContextSource) -> Option<ContextSource> {
        if self.source != incoming {
            Some(self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_templated_text() {
        let ctx = BrandContext::new();
        assert_eq!(ctx.source(), ContextSource::Template);
        assert_eq!(
            ctx.text(),
            "You are a Marketing Manager in the technology industry. Write in a professional tone and keep visuals minimalist."
        );
    }

    #[test]
    fn every_selector_recomputes_the_template() {
        let mut ctx = BrandContext::new();
        assert_eq!(ctx.cycle(Field::Role, true), None);
        assert_eq!(ctx.cycle(Field::Industry, true), None);
        assert_eq!(ctx.cycle(Field::Tone, false), None);
        assert_eq!(ctx.cycle(Field::Style, true), None);
        assert_eq!(ctx.role, Role::Founder);
        assert_eq!(ctx.industry, Industry::Retail);
        assert_eq!(ctx.tone, Tone::Luxurious);
        assert_eq!(ctx.style, VisualStyle::Vibrant);
        assert_eq!(
            ctx.text(),
            "You are a Founder in the retail industry. Write in a luxurious tone and keep visuals vibrant."
        );
        // same choices, same sentence
        let mut other = BrandContext::new();
        other.role = Role::Founder;
        other.industry = Industry::Retail;
        other.tone = Tone::Luxurious;
        other.style = VisualStyle::Vibrant;
        assert_eq!(other.template(), ctx.text());
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(Role::BrandStrategist.cycled(true), Role::MarketingManager);
        assert_eq!(Role::MarketingManager.cycled(false), Role::BrandStrategist);
    }

    #[test]
    fn extraction_and_selectors_report_overwrites() {
        let mut ctx = BrandContext::new();
        assert_eq!(ctx.set_extracted("Use a calm voice."), Some(ContextSource::Template));
        assert_eq!(ctx.text(), "Use a calm voice.");
        assert_eq!(ctx.source(), ContextSource::Extracted);

        assert_eq!(ctx.cycle(Field::Tone, true), Some(ContextSource::Extracted));
        assert_eq!(ctx.source(), ContextSource::Template);
    }

    #[test]
    fn manual_edits_mark_the_source() {
        let mut ctx = BrandContext::new();
        ctx.pop_char();
        ctx.push_char('!');
        assert!(ctx.text().ends_with("minimalist!"));
        assert_eq!(ctx.source(), ContextSource::Manual);
        assert_eq!(ctx.set_extracted("doc"), Some(ContextSource::Manual));
    }
}
