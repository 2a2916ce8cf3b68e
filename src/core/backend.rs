use crate::utils::constants::{PROCESS_ENDPOINT, UPLOAD_FIELD_NAME};
use anyhow::{Error, anyhow};
use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::future::Future;

/// A file picked by the user, as received from the browser.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// The remote image-processing service. It accepts one file and answers
/// with the identifier its three artifacts will be published under.
pub trait ProcessingBackend: Send + Sync + 'static {
    fn process(&self, upload: ImageUpload) -> impl Future<Output = Result<String, Error>> + Send;
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn process_url(&self) -> String {
        format!("{}/{}", self.base_url, PROCESS_ENDPOINT)
    }
}

impl ProcessingBackend for HttpBackend {
    async fn process(&self, upload: ImageUpload) -> Result<String, Error> {
        let url = self.process_url();
        let size = upload.data.len();

        let mut part = Part::stream_with_length(upload.data, size as u64)
            .file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::info!("posting {} ({} bytes) to {}", upload.file_name, size, url);
        let started = std::time::Instant::now();

        let response = self.http_client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "processing backend answered {} - {}",
                status,
                error_text
            ));
        }

        let body: Value = response.json().await?;
        let id = identifier_from_json(body)?;
        tracing::info!("backend assigned {} in {:?}", id, started.elapsed());

        Ok(id)
    }
}

/// The backend answers with a bare JSON scalar. Strings are taken as-is,
/// numbers by their decimal form.
pub fn identifier_from_json(value: Value) -> Result<String, Error> {
    let id = match value {
        Value::String(id) => id,
        Value::Number(n) => n.to_string(),
        other => return Err(anyhow!("expected a scalar identifier, got {}", other)),
    };
    if id.trim().is_empty() {
        return Err(anyhow!("backend returned an empty identifier"));
    }
    Ok(id)
}
