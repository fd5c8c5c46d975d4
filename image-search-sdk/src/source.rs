// ABOUTME: Resolves the submission image from a file, a file re-encoded as Base64, or a URL
// ABOUTME: Shows the resolved image in the source region before any request is sent

use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;
use url::Url;

use crate::constants::captions::SOURCE_IMAGE;
use crate::error::SearchError;
use crate::render::DisplayRegion;
use crate::types::SubmissionImage;
use crate::Result;

/// Encode bytes as a `data:` URI, sniffing the MIME type from the content
pub fn encode_data_uri(bytes: &[u8]) -> String {
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn selected(path: Option<&Path>) -> Result<&Path> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(SearchError::NoFileSelected),
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| SearchError::FileRead(format!("{} is not a file", path.display())))
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| SearchError::FileRead(format!("{}: {}", path.display(), e)))
}

fn display_url(path: &Path) -> String {
    std::path::absolute(path)
        .ok()
        .and_then(|absolute| Url::from_file_path(absolute).ok())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

pub struct ImageSource<R> {
    region: R,
}

impl<R: DisplayRegion> ImageSource<R> {
    pub fn new(region: R) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    fn show(&mut self, image_url: &str) {
        self.region.clear();
        self.region.append(image_url, SOURCE_IMAGE);
    }

    /// File mode: the raw bytes are uploaded as they are
    pub async fn from_file(&mut self, path: Option<&Path>) -> Result<SubmissionImage> {
        let path = selected(path)?;
        let file_name = file_name(path)?;
        let bytes = read(path).await?;

        self.show(&display_url(path));
        Ok(SubmissionImage::LocalFile { bytes, file_name })
    }

    /// Base64 mode: the file is re-encoded as a data URI
    pub async fn from_file_base64(&mut self, path: Option<&Path>) -> Result<SubmissionImage> {
        let path = selected(path)?;
        let file_name = file_name(path)?;
        let bytes = read(path).await?;

        self.show(&display_url(path));
        Ok(SubmissionImage::Base64Payload {
            data_uri: encode_data_uri(&bytes),
            file_name,
        })
    }

    /// URL mode: the service fetches the image itself. Surrounding
    /// whitespace is dropped, the rest is sent as typed.
    pub fn from_url(&mut self, url: &str) -> Result<SubmissionImage> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SearchError::MissingUrl);
        }
        if Url::parse(url).is_err() {
            return Err(SearchError::InvalidUrl(url.to_string()));
        }

        self.show(url);
        Ok(SubmissionImage::RemoteUrl(url.to_string()))
    }
}
