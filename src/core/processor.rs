use crate::core::backend::{ImageUpload, ProcessingBackend};
use crate::core::image::ProcessedImage;
use crate::core::progress::{ProgressTicker, Timings};
use crate::core::state::{ProcessorState, ProcessorStatus};
use anyhow::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Returned when an upload is requested while another one is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadInProgress;

impl fmt::Display for UploadInProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an upload is already in progress")
    }
}

impl std::error::Error for UploadInProgress {}

pub struct ImageProcessor<B> {
    backend: B,
    base_url: String,
    timings: Timings,
    state: Arc<Mutex<ProcessorState>>,
}

impl<B: ProcessingBackend> ImageProcessor<B> {
    pub fn new(backend: B, base_url: impl Into<String>) -> Self {
        Self {
            backend,
            base_url: base_url.into(),
            timings: Timings::default(),
            state: Arc::new(Mutex::new(ProcessorState::new())),
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends one file to the backend and records the resulting image set.
    ///
    /// `loading` stays set from here until the settle delay after success,
    /// or until the failure is recorded. On failure the image list is left
    /// exactly as it was.
    pub async fn upload(&self, upload: ImageUpload) -> Result<ProcessedImage, Error> {
        if !self.state.lock().await.begin_upload() {
            return Err(UploadInProgress.into());
        }

        let ticker = ProgressTicker::spawn(self.state.clone(), self.timings);
        let file_name = upload.file_name.clone();

        match self.backend.process(upload).await {
            Ok(id) => {
                ticker.stop();
                let image = ProcessedImage::new(id, &self.base_url);
                self.state.lock().await.complete(image.clone());
                tracing::info!("processed {} as {}", file_name, image.id);

                self.schedule_settle();
                Ok(image)
            }
            Err(e) => {
                ticker.stop();
                tracing::error!("Upload failed: {:?}", e);
                self.state.lock().await.fail();
                Err(e)
            }
        }
    }

    fn schedule_settle(&self) {
        let state = self.state.clone();
        let delay = self.timings.settle_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.lock().await.settle();
        });
    }

    pub async fn status(&self) -> ProcessorStatus {
        self.state.lock().await.status()
    }

    pub async fn images(&self) -> Vec<ProcessedImage> {
        self.state.lock().await.images().to_vec()
    }

    /// Status and images read under one lock, for rendering.
    pub async fn snapshot(&self) -> (ProcessorStatus, Vec<ProcessedImage>) {
        let state = self.state.lock().await;
        (state.status(), state.images().to_vec())
    }

    pub async fn clear(&self) -> usize {
        let removed = self.state.lock().await.clear();
        tracing::info!("discarded {} processed images", removed);
        removed
    }
}
