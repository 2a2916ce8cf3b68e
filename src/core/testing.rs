use crate::core::backend::{ImageUpload, ProcessingBackend};
use anyhow::{Error, anyhow};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub fn sample_upload() -> ImageUpload {
    ImageUpload {
        file_name: "cat.png".to_string(),
        content_type: Some("image/png".to_string()),
        data: Bytes::from_static(b"\x89PNG\r\n"),
    }
}

/// Hands out `{prefix}-{n}` identifiers, counting calls.
#[derive(Default)]
pub struct StaticBackend {
    prefix: String,
    calls: AtomicUsize,
}

impl StaticBackend {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProcessingBackend for StaticBackend {
    async fn process(&self, _upload: ImageUpload) -> Result<String, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{}-{}", self.prefix, n))
    }
}

pub struct FailingBackend;

impl ProcessingBackend for FailingBackend {
    async fn process(&self, _upload: ImageUpload) -> Result<String, Error> {
        Err(anyhow!("connection refused"))
    }
}

/// Holds every request until the gate is opened.
pub struct GatedBackend {
    id: String,
    gate: Arc<Notify>,
}

impl GatedBackend {
    pub fn new(id: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let backend = Self {
            id: id.to_string(),
            gate: gate.clone(),
        };
        (backend, gate)
    }
}

impl ProcessingBackend for GatedBackend {
    async fn process(&self, _upload: ImageUpload) -> Result<String, Error> {
        self.gate.notified().await;
        Ok(self.id.clone())
    }
}
