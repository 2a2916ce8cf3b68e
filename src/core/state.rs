use crate::core::image::ProcessedImage;
use crate::utils::constants::PROGRESS_COMPLETE;
use serde::{Deserialize, Serialize};

/// Snapshot of the transient UI flags, served by `/status`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorStatus {
    pub loading: bool,
    pub progress: u8,
    pub image_count: usize,
}

/// Everything the image processor owns: the processed images, newest
/// first, plus the `loading` flag and the `progress` value in `[0, 100]`.
#[derive(Debug, Default)]
pub struct ProcessorState {
    images: Vec<ProcessedImage>,
    loading: bool,
    progress: u8,
}

impl ProcessorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an attempt. Returns false while another attempt is still
    /// loading, which keeps a single writer at a time.
    pub fn begin_upload(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.progress = 0;
        true
    }

    /// One tick of the simulated progress. Returns whether further ticks
    /// can still move the value.
    pub fn advance_progress(&mut self, step: u8, cap: u8) -> bool {
        let cap = cap.min(PROGRESS_COMPLETE);
        if !self.loading || self.progress >= cap {
            return false;
        }
        self.progress = self.progress.saturating_add(step).min(cap);
        self.progress < cap
    }

    pub fn complete(&mut self, image: ProcessedImage) {
        if self.images.iter().any(|existing| existing.id == image.id) {
            tracing::warn!("backend reused identifier {}", image.id);
        }
        self.progress = PROGRESS_COMPLETE;
        self.images.insert(0, image);
    }

    pub fn settle(&mut self) {
        self.progress = 0;
        self.loading = false;
    }

    pub fn fail(&mut self) {
        self.progress = 0;
        self.loading = false;
    }

    /// Drops every record. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.images.len();
        self.images.clear();
        removed
    }

    pub fn images(&self) -> &[ProcessedImage] {
        &self.images
    }

    #[cfg(test)]
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn status(&self) -> ProcessorStatus {
        ProcessorStatus {
            loading: self.loading,
            progress: self.progress,
            image_count: self.images.len(),
        }
    }
}
