// ABOUTME: Builds request envelopes for every service operation from form parameters
// ABOUTME: Injects fresh correlation ids and client-generated image ids, and encodes wire bodies

use crate::constants::paging::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
use crate::correlation::CorrelationIdGenerator;
use crate::types::{ImageDoc, SubmissionImage};
use crate::Result;
use serde::Serialize;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Form fields shared by all actions.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct FormParams {
    /// Backend processing profile
    #[builder(setter(into))]
    pub pipeline: String,

    #[builder(default, setter(into))]
    pub collection: String,

    /// Directory file-derived image urls are synthesized under
    #[builder(default, setter(into))]
    pub image_path: String,

    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    #[builder(default = FIRST_PAGE)]
    pub page_num: u32,
}

/// Filter values: one string matches by equality, a list by membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValues {
    One(String),
    Many(Vec<String>),
}

impl From<Vec<String>> for FieldValues {
    fn from(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            FieldValues::One(values.remove(0))
        } else {
            FieldValues::Many(values)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilter {
    pub field_name: String,
    pub field_values: FieldValues,
}

impl ImageFilter {
    pub fn new(field_name: impl Into<String>, field_values: impl Into<FieldValues>) -> Self {
        Self {
            field_name: field_name.into(),
            field_values: field_values.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationPayload {
    Upload {
        file_name: String,
        bytes: Vec<u8>,
        image_doc: Option<ImageDoc>,
    },
    Base64 {
        data_uri: String,
        image_doc: Option<ImageDoc>,
    },
    Url {
        url: String,
        image_doc: Option<ImageDoc>,
    },
    ImageQuery {
        filter: Option<ImageFilter>,
        page_size: u32,
        page_num: u32,
    },
    ImageRemoval {
        field_name: String,
        field_values: String,
    },
}

impl OperationPayload {
    pub fn image_doc(&self) -> Option<&ImageDoc> {
        match self {
            OperationPayload::Upload { image_doc, .. }
            | OperationPayload::Base64 { image_doc, .. }
            | OperationPayload::Url { image_doc, .. } => image_doc.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub correlation_id: String,
    pub pipeline: String,
    pub collection: String,
    pub payload: OperationPayload,
}

/// Encoded body of a request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Text parts, sent after the `file` part in this order
    pub fields: Vec<(&'static str, String)>,
}

#[derive(Serialize)]
struct ImageBody<'a> {
    interface_seq_id: &'a str,
    pipeline: &'a str,
    collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_doc: Option<&'a ImageDoc>,
}

#[derive(Serialize)]
struct FieldQueryBody<'a> {
    interface_seq_id: &'a str,
    collection: &'a str,
    field_name: Option<&'a str>,
    field_values: Option<&'a FieldValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_num: Option<u32>,
}

impl RequestEnvelope {
    fn image_body<'a>(
        &'a self,
        file: Option<&'a str>,
        url: Option<&'a str>,
        image_doc: Option<&'a ImageDoc>,
    ) -> ImageBody<'a> {
        ImageBody {
            interface_seq_id: &self.correlation_id,
            pipeline: &self.pipeline,
            collection: &self.collection,
            file,
            url,
            image_doc,
        }
    }

    /// Encode the envelope the way the service expects it on the wire
    pub fn body(&self) -> Result<RequestBody> {
        let body = match &self.payload {
            OperationPayload::Upload {
                file_name,
                bytes,
                image_doc,
            } => {
                let mut fields = vec![
                    ("interface_seq_id", self.correlation_id.clone()),
                    ("pipeline", self.pipeline.clone()),
                    ("collection", self.collection.clone()),
                ];
                if let Some(doc) = image_doc {
                    fields.push(("image_doc", serde_json::to_string(doc)?));
                }
                return Ok(RequestBody::Multipart(MultipartBody {
                    file_name: file_name.clone(),
                    bytes: bytes.clone(),
                    fields,
                }));
            }
            OperationPayload::Base64 {
                data_uri,
                image_doc,
            } => {
                let doc = image_doc.as_ref();
                serde_json::to_value(self.image_body(Some(data_uri.as_str()), None, doc))?
            }
            OperationPayload::Url { url, image_doc } => {
                let doc = image_doc.as_ref();
                serde_json::to_value(self.image_body(None, Some(url.as_str()), doc))?
            }
            OperationPayload::ImageQuery {
                filter,
                page_size,
                page_num,
            } => serde_json::to_value(FieldQueryBody {
                interface_seq_id: &self.correlation_id,
                collection: &self.collection,
                field_name: filter.as_ref().map(|f| f.field_name.as_str()),
                field_values: filter.as_ref().map(|f| &f.field_values),
                page_size: Some(*page_size),
                page_num: Some(*page_num),
            })?,
            OperationPayload::ImageRemoval {
                field_name,
                field_values,
            } => {
                let values = FieldValues::One(field_values.clone());
                serde_json::to_value(FieldQueryBody {
                    interface_seq_id: &self.correlation_id,
                    collection: &self.collection,
                    field_name: Some(field_name.as_str()),
                    field_values: Some(&values),
                    page_size: None,
                    page_num: None,
                })?
            }
        };

        Ok(RequestBody::Json(body))
    }
}

/// Turns submission images and form parameters into request envelopes.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    params: FormParams,
    ids: CorrelationIdGenerator,
}

impl RequestBuilder {
    pub fn new(params: FormParams) -> Self {
        Self {
            params,
            ids: CorrelationIdGenerator::default(),
        }
    }

    pub fn with_id_generator(mut self, ids: CorrelationIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn params(&self) -> &FormParams {
        &self.params
    }

    fn envelope(&self, payload: OperationPayload) -> RequestEnvelope {
        RequestEnvelope {
            correlation_id: self.ids.generate(),
            pipeline: self.params.pipeline.clone(),
            collection: self.params.collection.clone(),
            payload,
        }
    }

    /// Pseudo-path recorded as the url of file-derived imports. Not fetchable
    /// over the network; it names where the file lives on the importing host.
    pub fn pseudo_path(&self, file_name: &str) -> String {
        let dir = self.params.image_path.trim_matches('/');
        if dir.is_empty() {
            format!("file:///{}", file_name)
        } else {
            format!("file:///{}/{}", dir, file_name)
        }
    }

    fn new_image_doc(url: String) -> ImageDoc {
        ImageDoc {
            id: Uuid::new_v4().to_string(),
            url,
        }
    }

    pub fn import(&self, image: SubmissionImage) -> RequestEnvelope {
        let payload = match image {
            SubmissionImage::LocalFile { bytes, file_name } => OperationPayload::Upload {
                image_doc: Some(Self::new_image_doc(self.pseudo_path(&file_name))),
                file_name,
                bytes,
            },
            SubmissionImage::Base64Payload {
                data_uri,
                file_name,
            } => OperationPayload::Base64 {
                data_uri,
                image_doc: Some(Self::new_image_doc(self.pseudo_path(&file_name))),
            },
            SubmissionImage::RemoteUrl(url) => OperationPayload::Url {
                image_doc: Some(Self::new_image_doc(url.clone())),
                url,
            },
        };
        self.envelope(payload)
    }

    pub fn search(&self, image: SubmissionImage) -> RequestEnvelope {
        let payload = match image {
            SubmissionImage::LocalFile { bytes, file_name } => OperationPayload::Upload {
                file_name,
                bytes,
                image_doc: None,
            },
            SubmissionImage::Base64Payload { data_uri, .. } => OperationPayload::Base64 {
                data_uri,
                image_doc: None,
            },
            SubmissionImage::RemoteUrl(url) => OperationPayload::Url {
                url,
                image_doc: None,
            },
        };
        self.envelope(payload)
    }

    pub fn image_query(&self, filter: Option<ImageFilter>) -> RequestEnvelope {
        self.envelope(OperationPayload::ImageQuery {
            filter,
            page_size: self.params.page_size,
            page_num: self.params.page_num,
        })
    }

    pub fn image_removal(&self, id: &str) -> RequestEnvelope {
        self.envelope(OperationPayload::ImageRemoval {
            field_name: "id".to_string(),
            field_values: id.to_string(),
        })
    }
}
