//! Brand Guardian audit reports.
//!
//! The service returns the audit as a JSON document embedded in the text
//! response. It is parsed here and rendered to markdown; anything that does
//! not parse is handed back verbatim.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::parsing::{score_from_value, unfence};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditReport {
    #[serde(deserialize_with = "de_score")]
    pub overall_score: u8,
    #[serde(default, deserialize_with = "de_opt_score")]
    pub tone_score: Option<u8>,
    #[serde(default)]
    pub rubric_breakdown: Vec<RubricItem>,
    #[serde(default)]
    pub improvement_suggestions: Suggestions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RubricItem {
    Scored {
        #[serde(alias = "category", alias = "name")]
        criterion: String,
        #[serde(default)]
        score: Option<Value>,
        #[serde(default, alias = "feedback", alias = "notes")]
        comment: String,
    },
    Note(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Suggestions {
    Many(Vec<String>),
    One(String),
}

impl Default for Suggestions {
    fn default() -> Self {
        Suggestions::Many(Vec::new())
    }
}

impl Suggestions {
    fn items(&self) -> Vec<&str> {
        match self {
            Suggestions::Many(list) => list.iter().map(String::as_str).filter(|s| !s.trim().is_empty()).collect(),
            Suggestions::One(s) if s.trim().is_empty() => Vec::new(),
            Suggestions::One(s) => vec![s.as_str()],
        }
    }
}

fn de_score<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let v = Value::deserialize(d)?;
    score_from_value(&v).ok_or_else(|| serde::de::Error::custom(format!("invalid score: {}", v)))
}

fn de_opt_score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(score_from_value(&v))
}

/// Score band shown next to the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    NeedsRevision,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Verdict::Excellent,
            70..=89 => Verdict::Good,
            _ => Verdict::NeedsRevision,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::NeedsRevision => "Needs Revision",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent. Ready to publish.",
            Verdict::Good => "Good. Minor tweaks needed.",
            Verdict::NeedsRevision => "Needs Revision. Rework before publishing.",
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Verdict::Excellent => "🟢",
            Verdict::Good => "🟡",
            Verdict::NeedsRevision => "🔴",
        }
    }
}

/// Result of interpreting an audit response body
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    Parsed { report: AuditReport, markdown: String },
    Raw(String),
}

impl AuditOutcome {
    pub fn score(&self) -> Option<u8> {
        match self {
            AuditOutcome::Parsed { report, .. } => Some(report.overall_score),
            AuditOutcome::Raw(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            AuditOutcome::Parsed { markdown, .. } => markdown,
            AuditOutcome::Raw(raw) => raw,
        }
    }
}

pub fn parse_audit(raw: &str) -> AuditOutcome {
    match serde_json::from_str::<AuditReport>(unfence(raw)) {
        Ok(report) => {
            let markdown = render_markdown(&report);
            AuditOutcome::Parsed { report, markdown }
        }
        Err(e) => {
            tracing::debug!(error = %e, "audit response is not a report, showing raw text");
            AuditOutcome::Raw(raw.to_string())
        }
    }
}

pub fn score_bar(score: u8) -> String {
    let filled = (usize::from(score) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Full report: headline, bar and verdict, then the details
pub fn render_markdown(report: &AuditReport) -> String {
    let verdict = Verdict::from_score(report.overall_score);
    let mut out = String::from("## Brand Audit\n\n");
    out.push_str(&format!(
        "**Overall score: {}%** {} {}\n\n`{}`\n\n{}\n\n",
        report.overall_score,
        verdict.marker(),
        verdict.label(),
        score_bar(report.overall_score),
        verdict.message(),
    ));
    out.push_str(&render_details(report));
    out.trim_end().to_string()
}

/// Tone, rubric and suggestions, without the overall score
pub fn render_details(report: &AuditReport) -> String {
    let mut out = String::new();
    if let Some(tone) = report.tone_score {
        out.push_str(&format!("**Tone alignment:** {}%\n\n", tone));
    }

    if !report.rubric_breakdown.is_empty() {
        out.push_str("### Rubric\n\n");
        for item in &report.rubric_breakdown {
            match item {
                RubricItem::Scored { criterion, score, comment } => {
                    out.push_str(&format!("- **{}**", criterion));
                    if let Some(s) = score {
                        match s {
                            Value::String(s) => out.push_str(&format!(" ({})", s)),
                            Value::Null => {}
                            other => out.push_str(&format!(" ({})", other)),
                        }
                    }
                    if !comment.is_empty() {
                        out.push_str(&format!(": {}", comment));
                    }
                    out.push('\n');
                }
                RubricItem::Note(note) => out.push_str(&format!("- {}\n", note)),
            }
        }
        out.push('\n');
    }

    let suggestions = report.improvement_suggestions.items();
    if !suggestions.is_empty() {
        out.push_str("### Suggestions\n\n");
        for s in suggestions {
            out.push_str(&format!("- {}\n", s));
        }
    }
    out.trim_end().to_string()
}
