use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{
    BatchDownloadRequest, Chunk, ConfirmUploadRequest, DownloadUrlResponse, Envelope,
    StorageItem, UploadUrlResponse,
};
use crate::config::{parse_base_url, ClientBuilder, Config};
use crate::error::{ClientError, Error, ServerError};
use crate::validate::{
    require_max_length, require_non_blank, require_non_empty_ids, require_path_id,
    MAX_FILE_NAME_LEN,
};

/// Operations offered by the File Depot service.
///
/// Every method validates its arguments first and returns
/// [`Error::InvalidArgument`] without touching the network when they are malformed.
#[async_trait]
pub trait FileDepot: Send + Sync {
    /// Reserves a file id and returns a presigned URL to `PUT` the content to.
    async fn prepare_upload(&self) -> Result<UploadUrlResponse, Error>;

    /// Tells the service the content was uploaded. Without `file_name` the
    /// service names the file after its id.
    async fn confirm_upload(&self, id: &str, file_name: Option<&str>)
        -> Result<StorageItem, Error>;

    async fn get_file_metadata(&self, id: &str, with_content: bool)
        -> Result<StorageItem, Error>;

    async fn get_download_url(&self, id: &str) -> Result<DownloadUrlResponse, Error>;

    /// Soft deletes the files.
    async fn delete_files(&self, ids: &[String]) -> Result<(), Error>;

    /// Downloads the files packed in a single ZIP archive.
    async fn download_batch(&self, ids: &[String]) -> Result<Vec<u8>, Error>;

    async fn get_chunks(&self, id: &str, with_embedding: bool) -> Result<Vec<Chunk>, Error>;
}

/// [`FileDepot`] over HTTP.
///
/// Cloning is cheap, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFileDepotClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpFileDepotClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        ClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        ClientBuilder::from(config).build()
    }

    /// Uses a caller-configured `reqwest::Client` (proxies, TLS, default headers...).
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self::from_parts(http, parse_base_url(base_url)?))
    }

    pub(crate) fn from_parts(http: reqwest::Client, base_url: Url) -> Self {
        HttpFileDepotClient { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport, also used for presigned transfers.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "file depot request");
        let response = self.http.execute(request).await?;
        debug!(status = %response.status(), "file depot response");
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>, Error> {
        let response = self.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_from_status(status, body));
        }
        Envelope::parse(&body)
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        self.fetch::<T>(request)
            .await?
            .into_required_data()
            .map_err(server_failure)
    }
}

fn server_failure(e: ServerError) -> Error {
    warn!(code = ?e.code(), message = e.message(), "file depot reported failure");
    Error::Server(e)
}

/// Error bodies may still carry an envelope; prefer its message over the bare status.
fn error_from_status(status: StatusCode, body: String) -> Error {
    if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&body) {
        if let Err(e) = envelope.into_data() {
            return server_failure(e);
        }
    }
    ClientError::UnexpectedStatus(status, body).into()
}

#[async_trait]
impl FileDepot for HttpFileDepotClient {
    async fn prepare_upload(&self) -> Result<UploadUrlResponse, Error> {
        let url = self.endpoint(&["api", "files", "prepare-upload"]);
        self.call(self.http.post(url).header(CONTENT_TYPE, "application/json"))
            .await
    }

    async fn confirm_upload(
        &self,
        id: &str,
        file_name: Option<&str>,
    ) -> Result<StorageItem, Error> {
        require_non_blank(id, "id")?;
        require_max_length(file_name, MAX_FILE_NAME_LEN, "fileName")?;

        let url = self.endpoint(&["api", "files", "confirm-upload"]);
        let body = ConfirmUploadRequest { id, file_name };
        self.call(self.http.post(url).json(&body)).await
    }

    async fn get_file_metadata(
        &self,
        id: &str,
        with_content: bool,
    ) -> Result<StorageItem, Error> {
        require_path_id(id, "id")?;

        let mut request = self.http.get(self.endpoint(&["api", "files", id]));
        if with_content {
            request = request.query(&[("withContent", "true")]);
        }
        self.call(request).await
    }

    async fn get_download_url(&self, id: &str) -> Result<DownloadUrlResponse, Error> {
        require_path_id(id, "id")?;

        let url = self.endpoint(&["api", "files", id, "download-url"]);
        self.call(self.http.get(url)).await
    }

    async fn delete_files(&self, ids: &[String]) -> Result<(), Error> {
        require_non_empty_ids(ids, "ids")?;

        let url = self.endpoint(&["api", "files", "delete"]);
        self.fetch::<Value>(self.http.post(url).json(ids))
            .await?
            .into_data()
            .map(|_| ())
            .map_err(server_failure)
    }

    async fn download_batch(&self, ids: &[String]) -> Result<Vec<u8>, Error> {
        require_non_empty_ids(ids, "ids")?;

        let url = self.endpoint(&["api", "files", "download", "batch"]);
        let response = self
            .execute(self.http.post(url).json(&BatchDownloadRequest { ids }))
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(error_from_status(status, body));
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_chunks(&self, id: &str, with_embedding: bool) -> Result<Vec<Chunk>, Error> {
        require_path_id(id, "id")?;

        let mut request = self.http.get(self.endpoint(&["api", "files", id, "chunks"]));
        if with_embedding {
            request = request.query(&[("withEmbedding", "true")]);
        }
        self.call(request).await
    }
}
