use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Copy generation payload for /generate/copy and /generate-copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    pub prompt: String,
    pub context: String,
}

// Image generation payload for the JSON flavour of /generate-image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub context: String,
}

// Audit payload for /audit-content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    pub content_to_audit: String,
    pub context: String,
}

// Text responses carry the body under `result` or, on newer services, `response`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl TextResponse {
    /// The generated text, `result` first
    pub fn into_text(self) -> Option<String> {
        self.result.or(self.response)
    }
}

// Answer of /extract-context-from-file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub status: String,
    #[serde(default)]
    pub extracted_text: String,
}

// Answer of /upload-brand-assets. Failures still come back as 200, with an
// `Error...` status and no preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAck {
    pub status: String,
    #[serde(default)]
    pub preview: Option<String>,
}

impl UploadAck {
    pub fn is_ingested(&self) -> bool {
        self.preview.is_some() && !self.status.trim_start().to_ascii_lowercase().starts_with("error")
    }
}

/// A file picked by the user, held in memory until submission
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name).to_string();
        Attachment { name, bytes, content_type }
    }

    /// Read a file from disk, keeping only its file name
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Attachment::new(name, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Content type from the file extension; unknown types are sent as octet streams
pub fn guess_content_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// File extension for an image content type, `png` when unknown
pub fn image_extension(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

/// A binary image returned by the service and written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub size: u64,
    pub content_type: String,
}
