//! Wire types of the File Depot REST API.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Error, ServerError};

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageItem {
    pub id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub size: u64,
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Extracted text, only filled when requested with `with_content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Server-managed fields this client has no dedicated slot for.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UploadUrlResponse {
    pub id: String,
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    #[serde(rename = "expirySeconds")]
    pub expiry_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DownloadUrlResponse {
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
    #[serde(rename = "expirySeconds")]
    pub expiry_seconds: u64,
}

/// A segment of a stored file, as produced by the service's chunker.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chunk {
    pub index: u32,
    pub content: String,
    /// Only present when requested with `with_embedding`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConfirmUploadRequest<'a> {
    pub id: &'a str,
    #[serde(rename = "fileName")]
    pub file_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchDownloadRequest<'a> {
    pub ids: &'a [String],
}

/// The `{success, message, data}` wrapper around every JSON response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub code: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns `data` as sent when the service reports success.
    pub fn into_data(self) -> Result<Option<T>, ServerError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ServerError::new(
                self.code,
                self.message
                    .unwrap_or_else(|| "Server reported failure".to_owned()),
            ))
        }
    }

    /// Like [`Envelope::into_data`] but a successful envelope must carry a payload.
    pub fn into_required_data(self) -> Result<T, ServerError> {
        self.into_data()?
            .ok_or_else(|| ServerError::new(None, "No data in response"))
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes a response body. An empty body means the service gave no answer.
    pub fn parse(body: &str) -> Result<Self, Error> {
        if body.trim().is_empty() {
            return Err(ServerError::new(None, "No response from server").into());
        }
        serde_json::from_str(body)
            .map_err(|e| ClientError::SerdeJSONError(e, body.to_owned()).into())
    }
}
