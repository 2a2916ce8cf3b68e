use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three artifacts the processing backend publishes for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageVariant {
    Grayscale,
    Corrupted,
    Recovered,
}

impl ImageVariant {
    /// Display order: source, damaged, repaired.
    pub const ALL: [ImageVariant; 3] = [
        ImageVariant::Grayscale,
        ImageVariant::Corrupted,
        ImageVariant::Recovered,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ImageVariant::Grayscale => "Grayscale",
            ImageVariant::Corrupted => "Corrupted",
            ImageVariant::Recovered => "Recovered",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    pub grayscale: String,
    pub corrupted: String,
    pub recovered: String,
}

impl ImageUrls {
    pub fn derive(base_url: &str, id: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            grayscale: format!("{}/images/grayscale-{}.jpg", base, id),
            corrupted: format!("{}/images/corrupted_image-{}.png", base, id),
            recovered: format!("{}/images/recovered_image-{}.png", base, id),
        }
    }

    pub fn get(&self, variant: ImageVariant) -> &str {
        match variant {
            ImageVariant::Grayscale => &self.grayscale,
            ImageVariant::Corrupted => &self.corrupted,
            ImageVariant::Recovered => &self.recovered,
        }
    }
}

// Never mutated once built; the list only ever grows at the front or is discarded whole.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub id: String,
    pub urls: ImageUrls,
    pub timestamp: DateTime<Utc>,
}

impl ProcessedImage {
    pub fn new(id: String, base_url: &str) -> Self {
        Self::captured_at(id, base_url, Utc::now())
    }

    pub fn captured_at(id: String, base_url: &str, timestamp: DateTime<Utc>) -> Self {
        let urls = ImageUrls::derive(base_url, &id);
        Self { id, urls, timestamp }
    }
}
