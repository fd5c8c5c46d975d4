// ABOUTME: Data model shared by the request builder, gateway and renderers
// ABOUTME: Submission images, image documents, result items and the service response envelope

use crate::constants::status;
use crate::error::SearchError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The image a single import or search action submits.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionImage {
    /// Raw file contents, sent as a multipart upload
    LocalFile { bytes: Vec<u8>, file_name: String },
    /// File contents re-encoded as a `data:` URI
    Base64Payload { data_uri: String, file_name: String },
    /// A URL the service fetches itself
    RemoteUrl(String),
}

impl SubmissionImage {
    pub fn mode(&self) -> SourceMode {
        match self {
            SubmissionImage::LocalFile { .. } => SourceMode::File,
            SubmissionImage::Base64Payload { .. } => SourceMode::Base64,
            SubmissionImage::RemoteUrl(_) => SourceMode::Url,
        }
    }
}

/// How the submission image reaches the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    File,
    Base64,
    Url,
}

impl SourceMode {
    pub fn import_operation(self) -> Operation {
        match self {
            SourceMode::File => Operation::ImportByUpload,
            SourceMode::Base64 => Operation::ImportByBase64,
            SourceMode::Url => Operation::ImportByUrl,
        }
    }

    pub fn search_operation(self) -> Operation {
        match self {
            SourceMode::File => Operation::SearchByUpload,
            SourceMode::Base64 => Operation::SearchByBase64,
            SourceMode::Url => Operation::SearchByUrl,
        }
    }
}

/// The named operations the search service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ImportByUpload,
    ImportByBase64,
    ImportByUrl,
    SearchByUpload,
    SearchByBase64,
    SearchByUrl,
    GetImageDoc,
    RemoveImageDoc,
}

impl Operation {
    /// Path segment under the API prefix
    pub fn name(self) -> &'static str {
        match self {
            Operation::ImportByUpload => "ImportByUpload",
            Operation::ImportByBase64 => "ImportByBase64",
            Operation::ImportByUrl => "ImportByUrl",
            Operation::SearchByUpload => "SearchByUpload",
            Operation::SearchByBase64 => "SearchByBase64",
            Operation::SearchByUrl => "SearchByUrl",
            Operation::GetImageDoc => "GetImageDoc",
            Operation::RemoveImageDoc => "RemoveImageDoc",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a stored image. The id is always generated client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDoc {
    pub id: String,
    pub url: String,
}

/// One image returned by a search or a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub url: String,
    /// Similarity score, only present on search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub collection: String,
    /// Any other fields the service stored or computed for the image
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ResultItem {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            score: None,
            collection: collection.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Response body shared by every operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceResponse {
    /// Correlation id echoed back by the service
    #[serde(default)]
    pub interface_seq_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub match_images: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Option<serde_json::Value>,
}

impl ServiceResponse {
    pub fn success() -> Self {
        Self {
            status: status::SUCCESS.to_string(),
            ..Default::default()
        }
    }

    pub fn failure(status: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            msg: Some(msg.into()),
            ..Default::default()
        }
    }

    pub fn with_match_images(mut self, items: &[ResultItem]) -> Self {
        self.match_images = serde_json::to_value(items).ok();
        self
    }

    pub fn with_images(mut self, items: &[ResultItem]) -> Self {
        self.images = serde_json::to_value(items).ok();
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == status::SUCCESS
    }

    fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SearchError::Application {
                status: self.status,
                message: self.msg.unwrap_or_default(),
            })
        }
    }

    /// Success carries nothing beyond the status
    pub fn into_ack(self) -> Result<()> {
        self.ensure_success().map(|_| ())
    }

    /// Scored results of a search, in the service's ranking order
    pub fn into_match_images(self) -> Result<Vec<ResultItem>> {
        let response = self.ensure_success()?;
        decode_items(response.match_images)
    }

    /// Unscored results of a listing, in the service's order
    pub fn into_images(self) -> Result<Vec<ResultItem>> {
        let response = self.ensure_success()?;
        decode_items(response.images)
    }
}

fn decode_items(value: Option<serde_json::Value>) -> Result<Vec<ResultItem>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::ImportByUpload.to_string(), "ImportByUpload");
        assert_eq!(Operation::GetImageDoc.name(), "GetImageDoc");
        assert_eq!(
            SourceMode::Base64.import_operation(),
            Operation::ImportByBase64
        );
        assert_eq!(SourceMode::Url.search_operation(), Operation::SearchByUrl);
        assert_eq!(
            SourceMode::File.search_operation(),
            Operation::SearchByUpload
        );
    }

    #[test]
    fn test_submission_image_mode() {
        let image = SubmissionImage::RemoteUrl("http://example.com/a.jpg".to_string());
        assert_eq!(image.mode(), SourceMode::Url);
        let image = SubmissionImage::LocalFile {
            bytes: vec![1, 2, 3],
            file_name: "a.jpg".to_string(),
        };
        assert_eq!(image.mode(), SourceMode::File);
    }

    #[test]
    fn test_search_response_keeps_ranking_and_extra_fields() {
        let response: ServiceResponse = serde_json::from_value(json!({
            "interface_seq_id": "abc",
            "status": "00000",
            "msg": "success",
            "match_images": [
                {"id": "x", "url": "u2", "score": 0.92, "distance": 0.3, "collection": "c"},
                {"id": "y", "url": "u3", "score": 0.5, "collection": "c"}
            ]
        }))
        .unwrap();

        let items = response.into_match_images().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "x");
        assert_eq!(items[0].score, Some(0.92));
        assert_eq!(items[0].extra.get("distance"), Some(&json!(0.3)));
        assert_eq!(items[1].id, "y");
    }

    #[test]
    fn test_listing_items_have_no_score() {
        let response: ServiceResponse = serde_json::from_value(json!({
            "status": "00000",
            "images": [{"id": "a1", "url": "u1", "collection": "demo"}]
        }))
        .unwrap();

        let items = response.into_images().unwrap();
        assert_eq!(items, vec![ResultItem::new("a1", "u1", "demo")]);
    }

    #[test]
    fn test_failure_status_becomes_application_error() {
        let response: ServiceResponse =
            serde_json::from_value(json!({"status": "50001", "msg": "bad pipeline"})).unwrap();

        match response.into_ack() {
            Err(SearchError::Application { status, message }) => {
                assert_eq!(status, "50001");
                assert_eq!(message, "bad pipeline");
            }
            other => panic!("Expected application error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let images = ServiceResponse::success().into_images().unwrap();
        let matches = ServiceResponse::success().into_match_images().unwrap();
        assert!(images.is_empty());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_ack_ignores_unexpected_images_shape() {
        let response: ServiceResponse =
            serde_json::from_value(json!({"status": "00000", "images": 3})).unwrap();
        assert!(response.into_ack().is_ok());
    }

    #[test]
    fn test_malformed_items_are_invalid_response() {
        let response: ServiceResponse =
            serde_json::from_value(json!({"status": "00000", "images": [{"url": 3}]})).unwrap();
        assert!(matches!(
            response.into_images(),
            Err(SearchError::InvalidResponse(_))
        ));
    }
}
