//! Prompt Console operations: capture a submission from the session state,
//! run it against the service, fold the outcome back into the state.
//!
//! `idle -> loading -> {result | error message | alert} -> idle`

use std::path::PathBuf;

use crate::app::{App, Mode, ResultView};
use crate::audit::{parse_audit, AuditOutcome};
use crate::clients::brand_client::BrandClient;
use crate::config::ApiRevision;
use crate::models::{Attachment, SavedImage, UploadAck};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GenerateCopy,
    GenerateImage,
    SwapBackground,
    AuditContent,
    ExtractContext,
    UploadBrandAssets,
}

impl Action {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Copy => Action::GenerateCopy,
            Mode::Image => Action::GenerateImage,
            Mode::Product => Action::SwapBackground,
            Mode::Audit => Action::AuditContent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::GenerateCopy => "Generating copy",
            Action::GenerateImage => "Generating visual",
            Action::SwapBackground => "Swapping background",
            Action::AuditContent => "Auditing content",
            Action::ExtractContext => "Extracting context",
            Action::UploadBrandAssets => "Uploading brand assets",
        }
    }

    /// Fixed text shown in the result area when the request fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::GenerateCopy => "Error generating text.",
            Action::GenerateImage => "Error generating image.",
            Action::SwapBackground => "Error swapping background.",
            Action::AuditContent => "Error auditing content.",
            Action::ExtractContext => "Could not extract brand context from the file.",
            Action::UploadBrandAssets => "Could not upload brand assets.",
        }
    }

    pub fn supported_by(self, revision: ApiRevision) -> bool {
        match self {
            Action::GenerateCopy | Action::GenerateImage => true,
            Action::SwapBackground | Action::AuditContent | Action::ExtractContext => revision == ApiRevision::Studio,
            Action::UploadBrandAssets => revision == ApiRevision::Guidelines,
        }
    }

    fn needs_prompt(self) -> bool {
        !matches!(self, Action::ExtractContext | Action::UploadBrandAssets)
    }

    fn alerts_on_failure(self) -> bool {
        !self.needs_prompt()
    }
}

/// Everything a request needs, captured so the state lock can be released
#[derive(Debug, Clone)]
pub struct Submission {
    pub action: Action,
    pub prompt: String,
    pub context: String,
    pub file: Option<Attachment>,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Text { text: String, extracted_context: Option<String> },
    Image(SavedImage),
    Audit(AuditOutcome),
    ContextExtracted(String),
    AssetsUploaded(UploadAck),
    /// Replaces the result area
    Failed(&'static str),
    /// Blocking dialog
    Alert(String),
}

impl App {
    /// Validate the session for `action` and enter the loading state
    pub fn begin(&mut self, action: Action) -> Result<Submission, String> {
        if !action.supported_by(self.profile.api_revision) {
            return Err(format!(
                "{} is not offered by the {} API.",
                action.label(),
                self.profile.api_revision.label()
            ));
        }
        if action.needs_prompt() {
            if let Some(reason) = self.submit_blocker() {
                return Err(reason.to_string());
            }
        } else {
            if self.is_loading() {
                return Err("A request is already running.".to_string());
            }
            if self.selected_file.is_none() {
                return Err("Select a file first.".to_string());
            }
        }
        let out_dir = self.profile.output_dir().map_err(|e| e.to_string())?;

        if action.needs_prompt() {
            self.result = ResultView::Empty;
            self.audit_score = None;
            self.result_scroll = 0;
        }
        self.pending = Some(action);
        tracing::info!(action = action.label(), mode = self.mode.title(), "submission started");

        Ok(Submission {
            action,
            prompt: self.prompt.clone(),
            context: self.context.text().to_string(),
            file: self.selected_file.clone(),
            out_dir,
        })
    }

    /// Apply a finished request and return to idle
    pub fn finish(&mut self, outcome: Outcome) {
        self.pending = None;
        match outcome {
            Outcome::Text { text, extracted_context } => {
                if let Some(extracted) = extracted_context {
                    self.apply_extracted(extracted);
                }
                self.result = ResultView::Text(text);
            }
            Outcome::Image(image) => {
                self.add_banner(format!("Saved {}", image.path.display()));
                self.result = ResultView::Image(image);
            }
            Outcome::Audit(audit) => {
                self.audit_score = audit.score();
                self.result = ResultView::Audit(audit);
            }
            Outcome::ContextExtracted(text) => {
                self.apply_extracted(text);
                self.add_banner("Brand context extracted from file.");
            }
            Outcome::AssetsUploaded(ack) => {
                match ack.preview {
                    Some(preview) => self.add_banner(format!("Brand assets: {} ({})", ack.status, preview)),
                    None => self.add_banner(format!("Brand assets: {}", ack.status)),
                }
            }
            Outcome::Failed(message) => {
                self.audit_score = None;
                self.result = ResultView::Error(message.to_string());
            }
            Outcome::Alert(message) => {
                self.alert = Some(message);
            }
        }
    }

    fn apply_extracted(&mut self, text: String) {
        if let Some(replaced) = self.context.set_extracted(text) {
            self.add_banner(format!("Extracted guidelines replaced the {} brand context.", replaced.label()));
        }
        self.reveal_context_panel();
    }
}

/// Run a submission. Every failure is logged and reduced to a fixed message.
pub async fn execute(client: &BrandClient, sub: Submission) -> Outcome {
    let Submission { action, prompt, context, file, out_dir } = sub;
    let result = match action {
        Action::GenerateCopy => client
            .generate_copy(&prompt, &context, file.as_ref())
            .await
            .map(|r| Outcome::Text { text: r.text, extracted_context: r.extracted_context }),
        Action::GenerateImage => client
            .generate_image(&prompt, &context, file.as_ref(), &out_dir)
            .await
            .map(Outcome::Image),
        Action::SwapBackground => match &file {
            Some(f) => client.swap_background(&prompt, &context, f, &out_dir).await.map(Outcome::Image),
            None => return Outcome::Failed(action.failure_message()),
        },
        Action::AuditContent => client
            .audit_content(&prompt, &context)
            .await
            .map(|raw| Outcome::Audit(parse_audit(&raw))),
        Action::ExtractContext => match &file {
            Some(f) => client.extract_context(f).await.map(Outcome::ContextExtracted),
            None => return Outcome::Alert(action.failure_message().to_string()),
        },
        Action::UploadBrandAssets => match &file {
            Some(f) => client.upload_brand_assets(f).await.map(Outcome::AssetsUploaded),
            None => return Outcome::Alert(action.failure_message().to_string()),
        },
    };

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(action = action.label(), error = %e, "request failed");
            if action.alerts_on_failure() {
                Outcome::Alert(format!("{}\n\n{}", action.failure_message(), e))
            } else {
                Outcome::Failed(action.failure_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::ContextSource;
    use crate::config::Profile;
    use crate::test_support::{serve, Canned};

    fn app_for(url: &str, revision: ApiRevision, out: &std::path::Path) -> App {
        let mut profile = Profile::new("test", url);
        profile.api_revision = revision;
        profile.output_dir = Some(out.to_path_buf());
        App::new(profile)
    }

    async fn run(app: &mut App, action: Action) {
        let sub = app.begin(action).unwrap();
        assert!(app.is_loading());
        let client = BrandClient::new(app.profile.base_url.clone(), app.profile.api_revision).unwrap();
        let outcome = execute(&client, sub).await;
        app.finish(outcome);
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn copy_without_file_renders_returned_text() {
        let (url, server) = serve(vec![Canned::json(r##"{"response":"# Headline\nBody"}"##)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Studio, dir.path());
        app.prompt = "Write a tagline".into();

        run(&mut app, Action::GenerateCopy).await;
        assert_eq!(app.result, ResultView::Text("# Headline\nBody".into()));

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /generate-copy"));
        assert!(requests[0].contains("Write a tagline"));
        assert!(requests[0].contains(app.context.text()));
    }

    #[tokio::test]
    async fn failed_copy_shows_fixed_message() {
        let (url, server) = serve(vec![Canned::error()]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Classic, dir.path());
        app.prompt = "Write".into();

        run(&mut app, Action::GenerateCopy).await;
        assert_eq!(app.result, ResultView::Error("Error generating text.".into()));
        assert!(app.alert.is_none());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn audit_scores_and_falls_back_to_raw_text() {
        let report = r#"{"response":"{\"overall_score\":85,\"tone_score\":80,\"rubric_breakdown\":[],\"improvement_suggestions\":[\"Trim\"]}"}"#;
        let (url, server) = serve(vec![Canned::json(report), Canned::json(r#"{"response":"not json at all"}"#)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Studio, dir.path());
        app.set_mode(Mode::Audit);
        app.prompt = "Our new shoes are rad".into();

        run(&mut app, Action::AuditContent).await;
        assert_eq!(app.audit_score, Some(85));
        assert!(matches!(app.result, ResultView::Audit(AuditOutcome::Parsed { .. })));

        run(&mut app, Action::AuditContent).await;
        assert_eq!(app.audit_score, None);
        assert_eq!(app.result, ResultView::Audit(AuditOutcome::Raw("not json at all".into())));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn extraction_overwrites_context_and_reveals_panel() {
        let (url, server) = serve(vec![Canned::json(r#"{"status":"success","extracted_text":"Always upbeat."}"#)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Studio, dir.path());
        app.context_panel_visible = false;
        app.attach(Attachment::new("brand.pdf", b"%PDF".to_vec()));

        run(&mut app, Action::ExtractContext).await;
        assert_eq!(app.context.text(), "Always upbeat.");
        assert_eq!(app.context.source(), ContextSource::Extracted);
        assert!(app.context_panel_visible);
        assert!(app.banners.iter().any(|b| b.contains("templated")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn failed_extraction_raises_alert() {
        let (url, server) = serve(vec![Canned::error()]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Studio, dir.path());
        let before = app.context.text().to_string();
        app.attach(Attachment::new("brand.pdf", vec![]));

        run(&mut app, Action::ExtractContext).await;
        assert!(app.alert.as_deref().unwrap().starts_with("Could not extract brand context"));
        assert_eq!(app.context.text(), before);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn uploaded_assets_are_acknowledged() {
        let (url, server) =
            serve(vec![Canned::json(r#"{"status":"Brand Guidelines Ingested","preview":"Calm and warm..."}"#)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Guidelines, dir.path());
        app.attach(Attachment::new("guide.txt", b"Calm and warm.".to_vec()));

        run(&mut app, Action::UploadBrandAssets).await;
        assert!(app.alert.is_none());
        assert_eq!(app.banners, vec!["Brand assets: Brand Guidelines Ingested (Calm and warm...)"]);
        assert_eq!(app.result, ResultView::Empty);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /upload-brand-assets"));
    }

    #[tokio::test]
    async fn unreadable_upload_raises_alert() {
        let (url, server) = serve(vec![Canned::json(r#"{"status":"Error reading file."}"#)]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Guidelines, dir.path());
        app.attach(Attachment::new("guide.pdf", b"%PDF-1.7".to_vec()));

        run(&mut app, Action::UploadBrandAssets).await;
        let alert = app.alert.as_deref().unwrap();
        assert!(alert.starts_with("Could not upload brand assets."));
        assert!(alert.contains("Error reading file."));
        assert!(app.banners.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn guidelines_copy_with_file_renders_text() {
        let (url, server) = serve(vec![
            Canned::json(r#"{"status":"Brand Guidelines Ingested","preview":"Be brief..."}"#),
            Canned::json(r#"{"response":"Brief launch note"}"#),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Guidelines, dir.path());
        app.prompt = "Announce the launch".into();
        app.attach(Attachment::new("guide.txt", b"Be brief.".to_vec()));

        run(&mut app, Action::GenerateCopy).await;
        assert_eq!(app.result, ResultView::Text("Brief launch note".into()));
        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /upload-brand-assets"));
        assert!(requests[1].starts_with("POST /generate-copy"));
    }

    #[tokio::test]
    async fn product_swap_saves_image() {
        let (url, server) = serve(vec![Canned::image(b"\x89PNGdata")]).await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for(&url, ApiRevision::Studio, dir.path());
        app.set_mode(Mode::Product);
        app.prompt = "Marble counter".into();
        app.attach(Attachment::new("mug.jpg", vec![0xff, 0xd8]));

        run(&mut app, Action::SwapBackground).await;
        let ResultView::Image(img) = &app.result else {
            panic!("expected image, got {:?}", app.result);
        };
        assert!(img.path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&img.path).unwrap(), b"\x89PNGdata");

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /swap-background"));
        assert!(requests[0].contains("filename=\"mug.jpg\""));
    }

    #[test]
    fn begin_refuses_invalid_submissions() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for("http://unused", ApiRevision::Studio, dir.path());

        assert_eq!(app.begin(Action::GenerateCopy).unwrap_err(), "Enter a prompt first.");
        app.set_mode(Mode::Product);
        app.prompt = "x".into();
        assert!(app.begin(Action::SwapBackground).is_err());
        assert!(!app.is_loading());
        assert_eq!(app.begin(Action::ExtractContext).unwrap_err(), "Select a file first.");

        app.set_mode(Mode::Copy);
        app.begin(Action::GenerateCopy).unwrap();
        assert_eq!(app.begin(Action::GenerateCopy).unwrap_err(), "A request is already running.");
    }

    #[test]
    fn revision_gates_operations() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_for("http://unused", ApiRevision::Classic, dir.path());
        app.prompt = "x".into();
        app.set_mode(Mode::Audit);
        let err = app.begin(Action::AuditContent).unwrap_err();
        assert!(err.contains("classic"));
        assert!(Action::UploadBrandAssets.supported_by(ApiRevision::Guidelines));
        assert!(!Action::ExtractContext.supported_by(ApiRevision::Guidelines));
    }
}
