// ABOUTME: Default implementation of ImageSearchGateway for SearchClient over HTTP
// ABOUTME: Sends JSON or multipart bodies, decodes the shared response envelope and checks the echo

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};

use crate::gateway::ImageSearchGateway;
use crate::request::{MultipartBody, RequestBody, RequestEnvelope};
use crate::types::{Operation, ServiceResponse};
use crate::{Result, SearchClient};

fn multipart_form(body: MultipartBody) -> Result<Form> {
    let mime = infer::get(&body.bytes).map(|kind| kind.mime_type());
    let mut file = Part::bytes(body.bytes).file_name(body.file_name);
    if let Some(mime) = mime {
        file = file.mime_str(mime)?;
    }

    let mut form = Form::new().part("file", file);
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    Ok(form)
}

#[async_trait]
impl ImageSearchGateway for SearchClient {
    async fn dispatch(
        &self,
        operation: Operation,
        envelope: &RequestEnvelope,
    ) -> Result<ServiceResponse> {
        let url = self.endpoint(operation);
        debug!(
            "dispatching {} [{}] to {}",
            operation, envelope.correlation_id, url
        );

        let request = match envelope.body()? {
            RequestBody::Json(body) => self.http().post(&url).json(&body),
            RequestBody::Multipart(body) => {
                self.http().post(&url).multipart(multipart_form(body)?)
            }
        };

        let response = request.send().await?.error_for_status()?;
        let body: ServiceResponse = response.json().await?;

        if let Some(echoed) = body.interface_seq_id.as_deref() {
            if !echoed.is_empty() && echoed != envelope.correlation_id {
                warn!(
                    "{} answered for correlation id {} but {} was sent",
                    operation, echoed, envelope.correlation_id
                );
            }
        }
        debug!(
            "{} [{}] finished with status {}",
            operation, envelope.correlation_id, body.status
        );

        Ok(body)
    }
}
