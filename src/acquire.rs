//! Image acquisition
//!
//! Sources produce the one RGB image a drawing job consumes: a local file,
//! or thumbnails downloaded from a list of URLs supplied by an external
//! image-search collaborator (URL discovery itself is out of scope here).

use crate::error::EngineError;
use crate::progress::{self, Progress, ProgressSender};
use crate::quantize;
use async_trait::async_trait;
use image::{DynamicImage, RgbImage};
use reqwest::{header, Client};
use std::path::PathBuf;

/// Downloaded thumbnails are shrunk into this bounding box
pub const THUMBNAIL_SIZE: u32 = 200;

/// Some image hosts refuse requests without a browser user agent
const USER_AGENT: &str = "Mozilla/5.0";

/// Produces one decoded image.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self) -> Result<DynamicImage, EngineError>;
}

/// An image file on disk.
pub struct LocalImage {
    path: PathBuf,
}

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImageSource for LocalImage {
    async fn fetch(&self) -> Result<DynamicImage, EngineError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// An image behind a URL.
pub struct RemoteImage {
    client: Client,
    url: String,
}

impl RemoteImage {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ImageSource for RemoteImage {
    async fn fetch(&self) -> Result<DynamicImage, EngineError> {
        tracing::debug!("downloading image from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EngineError::Fetch(format!(
                "{} returned status {}",
                self.url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Download a batch of candidate thumbnails.
///
/// Each URL is fetched, decoded, shrunk to the thumbnail box and normalized
/// to RGB. A failed item is logged and skipped; the batch never aborts on a
/// single bad URL. Progress is reported per item, counting skipped ones.
pub async fn fetch_thumbnails(
    client: &Client,
    urls: &[String],
    progress: Option<&ProgressSender>,
) -> Vec<RgbImage> {
    let total = urls.len();
    let mut thumbnails = Vec::new();

    for (i, url) in urls.iter().enumerate() {
        progress::emit(progress, Progress::Downloading { done: i + 1, total });

        let source = RemoteImage::new(client.clone(), url.clone());
        match source.fetch().await {
            Ok(img) => thumbnails.push(thumbnail_rgb(&img)),
            Err(e) => tracing::warn!("skipping thumbnail {}: {}", url, e),
        }
    }

    tracing::info!("fetched {} of {} thumbnails", thumbnails.len(), total);
    thumbnails
}

/// Shrink an image into the thumbnail bounding box as plain RGB.
pub fn thumbnail_rgb(img: &DynamicImage) -> RgbImage {
    quantize::shrink_to_fit(&img.to_rgb8(), THUMBNAIL_SIZE, THUMBNAIL_SIZE)
}
