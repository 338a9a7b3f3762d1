// src/clients/brand_client.rs

use serde_json::json;
use std::path::Path;

use crate::config::ApiRevision;
use crate::errors::ClientError;
use crate::models::{
    Attachment, AuditRequest, CopyRequest, ExtractResponse, ImageRequest, SavedImage, TextResponse, UploadAck,
};
use crate::utils::http::{ApiCall, FormField, HttpClient, Payload};

/// Text produced by a copy generation, plus the context the service
/// extracted from an attached file on the way
#[derive(Debug, Clone, PartialEq)]
pub struct CopyResult {
    pub text: String,
    pub extracted_context: Option<String>,
}

/// Client for the BrandGenius generation service
pub struct BrandClient {
    http: HttpClient,
    revision: ApiRevision,
}

impl BrandClient {
    pub fn new(base_url: impl Into<String>, revision: ApiRevision) -> Result<Self, ClientError> {
        let http = HttpClient::new(base_url)?;
        Ok(BrandClient { http, revision })
    }

    /// Copy generation without a file: JSON `{prompt, context}`
    pub fn copy_call(&self, prompt: &str, context: &str) -> ApiCall {
        let path = match self.revision {
            ApiRevision::Classic => "/generate/copy",
            ApiRevision::Guidelines | ApiRevision::Studio => "/generate-copy",
        };
        let body = CopyRequest { prompt: prompt.to_string(), context: context.to_string() };
        ApiCall { path, payload: Payload::Json(json!(body)) }
    }

    /// Copy generation with the file inline (classic services only)
    pub fn copy_with_file_call(&self, prompt: &str, context: &str, file: &Attachment) -> Result<ApiCall, ClientError> {
        match self.revision {
            ApiRevision::Classic => Ok(ApiCall {
                path: "/generate/copy-with-file",
                payload: Payload::Form(vec![
                    text("prompt", prompt),
                    file_field(file),
                    text("context", context),
                ]),
            }),
            _ => Err(ClientError::Unsupported("Inline copy attachments")),
        }
    }

    pub fn image_call(&self, prompt: &str, context: &str, file: Option<&Attachment>) -> ApiCall {
        match self.revision {
            ApiRevision::Guidelines => {
                let body = ImageRequest { prompt: prompt.to_string(), context: context.to_string() };
                ApiCall { path: "/generate-image", payload: Payload::Json(json!(body)) }
            }
            ApiRevision::Classic | ApiRevision::Studio => {
                let mut fields = vec![text("prompt", prompt), text("context", context)];
                if let Some(f) = file {
                    fields.push(file_field(f));
                }
                let path = if self.revision == ApiRevision::Classic { "/generate/image" } else { "/generate-visual" };
                ApiCall { path, payload: Payload::Form(fields) }
            }
        }
    }

    pub fn swap_background_call(&self, prompt: &str, context: &str, file: &Attachment) -> Result<ApiCall, ClientError> {
        match self.revision {
            ApiRevision::Studio => Ok(ApiCall {
                path: "/swap-background",
                payload: Payload::Form(vec![file_field(file), text("prompt", prompt), text("context", context)]),
            }),
            _ => Err(ClientError::Unsupported("Background swap")),
        }
    }

    pub fn upload_assets_call(&self, file: &Attachment) -> Result<ApiCall, ClientError> {
        match self.revision {
            ApiRevision::Guidelines => Ok(ApiCall {
                path: "/upload-brand-assets",
                payload: Payload::Form(vec![file_field(file)]),
            }),
            _ => Err(ClientError::Unsupported("Brand asset upload")),
        }
    }

    pub fn extract_call(&self, file: &Attachment) -> Result<ApiCall, ClientError> {
        match self.revision {
            ApiRevision::Studio => Ok(ApiCall {
                path: "/extract-context-from-file",
                payload: Payload::Form(vec![file_field(file)]),
            }),
            _ => Err(ClientError::Unsupported("Context extraction")),
        }
    }

    pub fn audit_call(&self, content: &str, context: &str) -> Result<ApiCall, ClientError> {
        match self.revision {
            ApiRevision::Studio => {
                let body = AuditRequest { content_to_audit: content.to_string(), context: context.to_string() };
                Ok(ApiCall { path: "/audit-content", payload: Payload::Json(json!(body)) })
            }
            _ => Err(ClientError::Unsupported("Content audit")),
        }
    }

    /// Generate marketing copy. An attached file travels inline on classic
    /// services; newer ones ingest it first and then generate.
    pub async fn generate_copy(
        &self,
        prompt: &str,
        context: &str,
        file: Option<&Attachment>,
    ) -> Result<CopyResult, ClientError> {
        let Some(file) = file else {
            let text = self.text(&self.copy_call(prompt, context)).await?;
            return Ok(CopyResult { text, extracted_context: None });
        };

        match self.revision {
            ApiRevision::Classic => {
                let call = self.copy_with_file_call(prompt, context, file)?;
                let text = self.text(&call).await?;
                Ok(CopyResult { text, extracted_context: None })
            }
            ApiRevision::Guidelines => {
                let ack = self.upload_brand_assets(file).await?;
                tracing::info!(status = %ack.status, "brand assets ingested before copy generation");
                let text = self.text(&self.copy_call(prompt, context)).await?;
                Ok(CopyResult { text, extracted_context: None })
            }
            ApiRevision::Studio => {
                let extracted = self.extract_context(file).await?;
                let text = self.text(&self.copy_call(prompt, &extracted)).await?;
                Ok(CopyResult { text, extracted_context: Some(extracted) })
            }
        }
    }

    pub async fn generate_image(
        &self,
        prompt: &str,
        context: &str,
        file: Option<&Attachment>,
        out_dir: &Path,
    ) -> Result<SavedImage, ClientError> {
        let call = self.image_call(prompt, context, file);
        self.http.download(&call, out_dir, "visual").await
    }

    pub async fn swap_background(
        &self,
        prompt: &str,
        context: &str,
        file: &Attachment,
        out_dir: &Path,
    ) -> Result<SavedImage, ClientError> {
        let call = self.swap_background_call(prompt, context, file)?;
        self.http.download(&call, out_dir, "product").await
    }

    /// Upload a guidelines document. An ack without a preview means the
    /// service could not read the file.
    pub async fn upload_brand_assets(&self, file: &Attachment) -> Result<UploadAck, ClientError> {
        let call = self.upload_assets_call(file)?;
        let ack: UploadAck = self.http.json(&call).await?;
        if !ack.is_ingested() {
            return Err(ClientError::Service(ack.status));
        }
        Ok(ack)
    }

    /// Extract brand guidelines from a document. Blank extractions count as failures.
    pub async fn extract_context(&self, file: &Attachment) -> Result<String, ClientError> {
        let call = self.extract_call(file)?;
        let resp: ExtractResponse = self.http.json(&call).await?;
        if resp.extracted_text.trim().is_empty() {
            return Err(ClientError::Status {
                status: reqwest::StatusCode::UNPROCESSABLE_ENTITY,
                body: resp.status,
            });
        }
        Ok(resp.extracted_text)
    }

    /// Audit content against the brand context; returns the raw response text
    pub async fn audit_content(&self, content: &str, context: &str) -> Result<String, ClientError> {
        let call = self.audit_call(content, context)?;
        self.text(&call).await
    }

    async fn text(&self, call: &ApiCall) -> Result<String, ClientError> {
        let resp: TextResponse = self.http.json(call).await?;
        resp.into_text()
            .ok_or_else(|| ClientError::Service("response carried no text".to_string()))
    }
}

fn text(name: &'static str, value: &str) -> FormField {
    FormField::Text { name, value: value.to_string() }
}

fn file_field(file: &Attachment) -> FormField {
    FormField::File { name: "file", attachment: file.clone() }
}
