// ABOUTME: Gateway abstraction over the search service's named operations
// ABOUTME: One required dispatch method; typed per-operation methods are built on top of it

use async_trait::async_trait;
use std::sync::Arc;

use crate::request::RequestEnvelope;
use crate::types::{Operation, ResultItem, ServiceResponse, SourceMode};
use crate::Result;

/// Single point of contact with the search service.
///
/// Implementors only provide [`dispatch`](ImageSearchGateway::dispatch): one
/// attempt of one operation, returning the decoded response or a transport
/// failure. The typed methods turn the response into an acknowledgement or a
/// result list and map a non-success status to
/// [`SearchError::Application`](crate::SearchError::Application).
#[async_trait]
pub trait ImageSearchGateway: Send + Sync {
    /// Execute one operation with the given envelope
    async fn dispatch(
        &self,
        operation: Operation,
        envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse>;

    async fn import_by_upload(&self, envelope: &RequestEnvelope) -> Result<()> {
        self.dispatch(Operation::ImportByUpload, envelope)
            .await?
            .into_ack()
    }

    async fn import_by_base64(&self, envelope: &RequestEnvelope) -> Result<()> {
        self.dispatch(Operation::ImportByBase64, envelope)
            .await?
            .into_ack()
    }

    async fn import_by_url(&self, envelope: &RequestEnvelope) -> Result<()> {
        self.dispatch(Operation::ImportByUrl, envelope)
            .await?
            .into_ack()
    }

    async fn search_by_upload(&self, envelope: &RequestEnvelope) -> Result<Vec<ResultItem>> {
        self.dispatch(Operation::SearchByUpload, envelope)
            .await?
            .into_match_images()
    }

    async fn search_by_base64(&self, envelope: &RequestEnvelope) -> Result<Vec<ResultItem>> {
        self.dispatch(Operation::SearchByBase64, envelope)
            .await?
            .into_match_images()
    }

    async fn search_by_url(&self, envelope: &RequestEnvelope) -> Result<Vec<ResultItem>> {
        self.dispatch(Operation::SearchByUrl, envelope)
            .await?
            .into_match_images()
    }

    async fn get_image_doc(&self, envelope: &RequestEnvelope) -> Result<Vec<ResultItem>> {
        self.dispatch(Operation::GetImageDoc, envelope)
            .await?
            .into_images()
    }

    async fn remove_image_doc(&self, envelope: &RequestEnvelope) -> Result<()> {
        self.dispatch(Operation::RemoveImageDoc, envelope)
            .await?
            .into_ack()
    }

    /// Import through the operation matching how the image was submitted
    async fn import(&self, mode: SourceMode, envelope: &RequestEnvelope) -> Result<()> {
        match mode {
            SourceMode::File => self.import_by_upload(envelope).await,
            SourceMode::Base64 => self.import_by_base64(envelope).await,
            SourceMode::Url => self.import_by_url(envelope).await,
        }
    }

    /// Search through the operation matching how the image was submitted
    async fn search(
        &self,
        mode: SourceMode,
        envelope: &RequestEnvelope,
    ) -> Result<Vec<ResultItem>> {
        match mode {
            SourceMode::File => self.search_by_upload(envelope).await,
            SourceMode::Base64 => self.search_by_base64(envelope).await,
            SourceMode::Url => self.search_by_url(envelope).await,
        }
    }
}

#[async_trait]
impl<G: ImageSearchGateway + ?Sized> ImageSearchGateway for Arc<G> {
    async fn dispatch(
        &self,
        operation: Operation,
        envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse> {
        (**self).dispatch(operation, envelope).await
    }
}
