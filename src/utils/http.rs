use chrono::Local;
use futures::StreamExt;
use reqwest::{header::CONTENT_TYPE, multipart, Client, Response};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::errors::ClientError;
use crate::models::{image_extension, Attachment, SavedImage};

/// One field of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: &'static str, value: String },
    File { name: &'static str, attachment: Attachment },
}

/// Request body, independent of the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Form(Vec<FormField>),
}

#[cfg(test)]
impl Payload {
    /// Text value of a named field (JSON key or form text part)
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Payload::Json(v) => v.get(name).and_then(|v| v.as_str()),
            Payload::Form(fields) => fields.iter().find_map(|f| match f {
                FormField::Text { name: n, value } if *n == name => Some(value.as_str()),
                _ => None,
            }),
        }
    }

    pub fn file(&self, name: &str) -> Option<&Attachment> {
        match self {
            Payload::Json(_) => None,
            Payload::Form(fields) => fields.iter().find_map(|f| match f {
                FormField::File { name: n, attachment } if *n == name => Some(attachment),
                _ => None,
            }),
        }
    }
}

/// A fully composed POST against the service
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub path: &'static str,
    pub payload: Payload,
}

/// A simple HTTP client wrapper for the generation service
pub struct HttpClient {
    client: Client,
    pub base_url: String,
}

impl HttpClient {
    /// Create a new HttpClient
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL including scheme and host, e.g. "http://127.0.0.1:8000"
    ///
    /// No timeout is configured; reqwest's defaults apply.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(HttpClient {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Send a call and fail on non-success statuses
    pub async fn send(&self, call: &ApiCall) -> Result<Response, ClientError> {
        let url = self.url(call.path);
        tracing::debug!(%url, "sending request");
        let request = match &call.payload {
            Payload::Json(body) => self.client.post(&url).json(body),
            Payload::Form(fields) => self.client.post(&url).multipart(to_form(fields)?),
        };
        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            let bytes = res.bytes().await.unwrap_or_default();
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(%url, %status, "service rejected request");
            return Err(ClientError::Status { status, body });
        }
        tracing::info!(%url, %status, "request completed");
        Ok(res)
    }

    /// Perform a call and deserialize the JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(&self, call: &ApiCall) -> Result<T, ClientError> {
        let res = self.send(call).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Perform a call whose response is an image and stream it into `dir`
    pub async fn download(&self, call: &ApiCall, dir: &Path, stem: &str) -> Result<SavedImage, ClientError> {
        let res = self.send(call).await?;
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        tokio::fs::create_dir_all(dir).await?;
        let file_name = format!(
            "{}-{}.{}",
            stem,
            Local::now().format("%Y%m%d-%H%M%S%.3f"),
            image_extension(&content_type)
        );
        let path = dir.join(file_name);
        let mut file = tokio::fs::File::create(&path).await?;

        let mut byte_stream = res.bytes_stream();
        let mut size = 0u64;
        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(SavedImage { path, size, content_type })
    }
}

fn to_form(fields: &[FormField]) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(*name, value.clone()),
            FormField::File { name, attachment } => {
                let part = multipart::Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.name.clone())
                    .mime_str(&attachment.content_type)?;
                form.part(*name, part)
            }
        };
    }
    Ok(form)
}
