// ABOUTME: Test helper utilities: canned service responses, stub gateways and recording ports
// ABOUTME: Provides mockito-based helpers and in-memory doubles for unit testing the controller

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::gateway::ImageSearchGateway;
use crate::render::{DisplayRegion, Notice, Notifier, RegionEntry};
use crate::request::{OperationPayload, RequestEnvelope};
use crate::types::{Operation, ResultItem, ServiceResponse};
use crate::Result;

pub async fn mock_search_server() -> ServerGuard {
    Server::new_async().await
}

pub fn mock_success_response() -> serde_json::Value {
    json!({
        "interface_seq_id": "",
        "status": "00000",
        "msg": "success"
    })
}

pub fn mock_failure_response() -> serde_json::Value {
    json!({
        "interface_seq_id": "",
        "status": "50001",
        "msg": "bad pipeline"
    })
}

pub fn mock_listing_response() -> serde_json::Value {
    json!({
        "interface_seq_id": "",
        "status": "00000",
        "msg": "success",
        "images": [
            {
                "id": "a1",
                "url": "u1",
                "collection": "demo"
            }
        ]
    })
}

pub fn mock_search_response() -> serde_json::Value {
    json!({
        "interface_seq_id": "",
        "status": "00000",
        "msg": "success",
        "match_images": [
            {
                "id": "x",
                "url": "u2",
                "score": 0.92,
                "distance": 0.41,
                "collection": "c"
            },
            {
                "id": "y",
                "url": "u3",
                "score": 0.61,
                "distance": 0.97,
                "collection": "c"
            }
        ]
    })
}

/// Gateway returning queued responses (success when the queue is empty)
/// and recording every dispatched envelope.
#[derive(Default)]
pub struct StubGateway {
    responses: Mutex<VecDeque<Result<ServiceResponse>>>,
    calls: Mutex<Vec<(Operation, RequestEnvelope)>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: ServiceResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_error(self, error: crate::SearchError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(Operation, RequestEnvelope)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls().into_iter().map(|(op, _)| op).collect()
    }
}

#[async_trait]
impl ImageSearchGateway for StubGateway {
    async fn dispatch(
        &self,
        operation: Operation,
        envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((operation, envelope.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ServiceResponse::success()))
    }
}

/// Gateway keeping imported images in memory, per collection.
#[derive(Default)]
pub struct InMemoryGateway {
    store: Mutex<Vec<ResultItem>>,
}

impl InMemoryGateway {
    pub fn stored_ids(&self) -> Vec<String> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    fn in_collection(&self, collection: &str) -> Vec<ResultItem> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.collection == collection)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ImageSearchGateway for InMemoryGateway {
    async fn dispatch(
        &self,
        operation: Operation,
        envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse> {
        let response = match operation {
            Operation::ImportByUpload | Operation::ImportByBase64 | Operation::ImportByUrl => {
                if let Some(doc) = envelope.payload.image_doc() {
                    self.store.lock().unwrap().push(ResultItem::new(
                        doc.id.clone(),
                        doc.url.clone(),
                        envelope.collection.clone(),
                    ));
                }
                ServiceResponse::success()
            }
            Operation::SearchByUpload | Operation::SearchByBase64 | Operation::SearchByUrl => {
                let matches: Vec<ResultItem> = self
                    .in_collection(&envelope.collection)
                    .into_iter()
                    .map(|item| item.with_score(1.0))
                    .collect();
                ServiceResponse::success().with_match_images(&matches)
            }
            Operation::GetImageDoc => {
                let items = self.in_collection(&envelope.collection);
                ServiceResponse::success().with_images(&items)
            }
            Operation::RemoveImageDoc => {
                if let OperationPayload::ImageRemoval { field_values, .. } = &envelope.payload {
                    self.store
                        .lock()
                        .unwrap()
                        .retain(|item| &item.id != field_values);
                }
                ServiceResponse::success()
            }
        };
        Ok(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEvent {
    Clear,
    Append { image_url: String, caption: String },
}

/// Region recording every clear and append, in order.
#[derive(Debug, Default)]
pub struct RecordingRegion {
    events: Vec<RegionEvent>,
}

impl RecordingRegion {
    pub fn events(&self) -> Vec<RegionEvent> {
        self.events.clone()
    }

    /// Entries visible after replaying the recorded events
    pub fn entries(&self) -> Vec<RegionEntry> {
        let mut entries = Vec::new();
        for event in &self.events {
            match event {
                RegionEvent::Clear => entries.clear(),
                RegionEvent::Append { image_url, caption } => entries.push(RegionEntry {
                    image_url: image_url.clone(),
                    caption: caption.clone(),
                }),
            }
        }
        entries
    }
}

impl DisplayRegion for RecordingRegion {
    fn clear(&mut self) {
        self.events.push(RegionEvent::Clear);
    }

    fn append(&mut self, image_url: &str, caption: &str) {
        self.events.push(RegionEvent::Append {
            image_url: image_url.to_string(),
            caption: caption.to_string(),
        });
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Region whose events stay readable through a clone while a controller owns it.
#[derive(Debug, Clone, Default)]
pub struct SharedRegion {
    events: Arc<Mutex<Vec<RegionEvent>>>,
}

impl SharedRegion {
    pub fn events(&self) -> Vec<RegionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DisplayRegion for SharedRegion {
    fn clear(&mut self) {
        self.events.lock().unwrap().push(RegionEvent::Clear);
    }

    fn append(&mut self, image_url: &str, caption: &str) {
        self.events.lock().unwrap().push(RegionEvent::Append {
            image_url: image_url.to_string(),
            caption: caption.to_string(),
        });
    }
}

/// Gateway capturing what a region held at the moment each operation was
/// dispatched. Always answers with success.
pub struct SnapshotGateway {
    region: SharedRegion,
    snapshots: Mutex<Vec<Vec<RegionEvent>>>,
}

impl SnapshotGateway {
    pub fn new(region: SharedRegion) -> Self {
        Self {
            region,
            snapshots: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshots(&self) -> Vec<Vec<RegionEvent>> {
        self.snapshots.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSearchGateway for SnapshotGateway {
    async fn dispatch(
        &self,
        _operation: Operation,
        _envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse> {
        self.snapshots.lock().unwrap().push(self.region.events());
        Ok(ServiceResponse::success())
    }
}
