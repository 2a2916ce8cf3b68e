use crate::core::image::ProcessedImage;
use crate::core::processor::ImageProcessor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub struct AppState<B> {
    pub processor: Arc<ImageProcessor<B>>,
}

impl<B> AppState<B> {
    pub fn new(processor: ImageProcessor<B>) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}

// Response structure
#[derive(Serialize, Debug, Deserialize, Clone)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub image: Option<ProcessedImage>,
}

impl UploadResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            image: None,
        }
    }
}

#[derive(Serialize, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ClearResponse {
    pub removed: usize,
}
