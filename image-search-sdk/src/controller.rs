// ABOUTME: Orchestrates one user action: resolve source, build request, call gateway, render or notify
// ABOUTME: Each action is an independent round trip; the controller keeps no state between actions

use log::debug;
use std::path::Path;

use crate::error::{ErrorCategory, SearchError};
use crate::gateway::ImageSearchGateway;
use crate::render::{DisplayRegion, Notice, NoticeKind, Notifier, RenderMode, ResultRenderer};
use crate::request::{FormParams, ImageFilter, RequestBuilder};
use crate::source::ImageSource;
use crate::types::{ResultItem, SubmissionImage};
use crate::Result;

mod messages {
    pub const IMPORTED: &str = "Image imported";
    pub const REMOVED: &str = "Image removed";
    pub const IMPORT_FAILED: &str = "Image import failed";
    pub const SEARCH_FAILED: &str = "Image search failed";
    pub const LISTING_FAILED: &str = "Listing images failed";
    pub const REMOVAL_FAILED: &str = "Removing image failed";
}

/// Owns the gateway, both display regions and the notifier. The source
/// region is only written by [`ImageSource`], the destination region only by
/// [`ResultRenderer`].
pub struct ImageSearchController<G, S, D, N> {
    gateway: G,
    requests: RequestBuilder,
    source: ImageSource<S>,
    results: ResultRenderer<D>,
    notifier: N,
}

impl<G, S, D, N> ImageSearchController<G, S, D, N>
where
    G: ImageSearchGateway,
    S: DisplayRegion,
    D: DisplayRegion,
    N: Notifier,
{
    pub fn new(
        gateway: G,
        params: FormParams,
        source_region: S,
        destination_region: D,
        notifier: N,
    ) -> Self {
        Self::with_requests(
            gateway,
            RequestBuilder::new(params),
            source_region,
            destination_region,
            notifier,
        )
    }

    pub fn with_requests(
        gateway: G,
        requests: RequestBuilder,
        source_region: S,
        destination_region: D,
        notifier: N,
    ) -> Self {
        Self {
            gateway,
            requests,
            source: ImageSource::new(source_region),
            results: ResultRenderer::new(destination_region),
            notifier,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn params(&self) -> &FormParams {
        self.requests.params()
    }

    pub fn source_region(&self) -> &S {
        self.source.region()
    }

    pub fn destination_region(&self) -> &D {
        self.results.region()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        debug!("notify ({:?}): {}", kind, message);
        self.notifier.notify(&Notice::new(kind, message));
    }

    /// Report a failed action and hand the error back to the caller
    fn fail(&self, context: &str, err: SearchError) -> SearchError {
        match err.category() {
            ErrorCategory::Validation => self.notify(NoticeKind::Validation, err.to_string()),
            ErrorCategory::Application | ErrorCategory::Transport => {
                self.notify(NoticeKind::Failure, format!("{}: {}", context, err))
            }
        }
        err
    }

    pub async fn import(&mut self, file: Option<&Path>) -> Result<()> {
        match self.source.from_file(file).await {
            Ok(image) => self.submit_import(image).await,
            Err(err) => Err(self.fail(messages::IMPORT_FAILED, err)),
        }
    }

    pub async fn import_base64(&mut self, file: Option<&Path>) -> Result<()> {
        match self.source.from_file_base64(file).await {
            Ok(image) => self.submit_import(image).await,
            Err(err) => Err(self.fail(messages::IMPORT_FAILED, err)),
        }
    }

    pub async fn import_url(&mut self, url: &str) -> Result<()> {
        match self.source.from_url(url) {
            Ok(image) => self.submit_import(image).await,
            Err(err) => Err(self.fail(messages::IMPORT_FAILED, err)),
        }
    }

    pub async fn search(&mut self, file: Option<&Path>) -> Result<Vec<ResultItem>> {
        match self.source.from_file(file).await {
            Ok(image) => self.submit_search(image).await,
            Err(err) => Err(self.fail(messages::SEARCH_FAILED, err)),
        }
    }

    pub async fn search_base64(&mut self, file: Option<&Path>) -> Result<Vec<ResultItem>> {
        match self.source.from_file_base64(file).await {
            Ok(image) => self.submit_search(image).await,
            Err(err) => Err(self.fail(messages::SEARCH_FAILED, err)),
        }
    }

    pub async fn search_url(&mut self, url: &str) -> Result<Vec<ResultItem>> {
        match self.source.from_url(url) {
            Ok(image) => self.submit_search(image).await,
            Err(err) => Err(self.fail(messages::SEARCH_FAILED, err)),
        }
    }

    /// List stored images of the configured collection, one page at a time
    pub async fn get_images(&mut self, filter: Option<ImageFilter>) -> Result<Vec<ResultItem>> {
        let envelope = self.requests.image_query(filter);
        match self.gateway.get_image_doc(&envelope).await {
            Ok(items) => {
                self.results.render(&items, RenderMode::Listing);
                Ok(items)
            }
            Err(err) => Err(self.fail(messages::LISTING_FAILED, err)),
        }
    }

    pub async fn remove_image(&mut self, id: &str) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            let err = SearchError::MissingImageId;
            return Err(self.fail(messages::REMOVAL_FAILED, err));
        }

        let envelope = self.requests.image_removal(id);
        match self.gateway.remove_image_doc(&envelope).await {
            Ok(()) => {
                let message = format!("{} ({})", messages::REMOVED, id);
                self.notify(NoticeKind::Success, message);
                Ok(())
            }
            Err(err) => Err(self.fail(messages::REMOVAL_FAILED, err)),
        }
    }

    async fn submit_import(&mut self, image: SubmissionImage) -> Result<()> {
        let mode = image.mode();
        let envelope = self.requests.import(image);
        let id = envelope
            .payload
            .image_doc()
            .map(|doc| doc.id.clone())
            .unwrap_or_default();

        match self.gateway.import(mode, &envelope).await {
            Ok(()) => {
                let message = format!("{} ({})", messages::IMPORTED, id);
                self.notify(NoticeKind::Success, message);
                Ok(())
            }
            Err(err) => Err(self.fail(messages::IMPORT_FAILED, err)),
        }
    }

    async fn submit_search(&mut self, image: SubmissionImage) -> Result<Vec<ResultItem>> {
        let mode = image.mode();
        let envelope = self.requests.search(image);

        match self.gateway.search(mode, &envelope).await {
            Ok(items) => {
                self.results.render(&items, RenderMode::Search);
                Ok(items)
            }
            Err(err) => Err(self.fail(messages::SEARCH_FAILED, err)),
        }
    }
}
