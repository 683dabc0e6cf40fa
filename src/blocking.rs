//! A blocking File Depot client for callers without an async runtime.
//!
//! ```no_run
//! let client = filedepot::blocking::FileDepotClient::new("http://localhost:8080")?;
//! let prepared = client.prepare_upload()?;
//! println!("upload to {}", prepared.upload_url);
//! # Ok::<(), filedepot::Error>(())
//! ```
//!
//! Calling these methods from inside an async runtime panics, use
//! [`HttpFileDepotClient`] there instead.

use tokio::runtime::{Builder, Runtime};

use crate::api::{Chunk, DownloadUrlResponse, StorageItem, UploadUrlResponse};
use crate::client::{FileDepot, HttpFileDepotClient};
use crate::config::{ClientBuilder, Config};
use crate::error::Error;

pub struct FileDepotClient {
    inner: HttpFileDepotClient,
    runtime: Runtime,
}

impl FileDepotClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::from_builder(ClientBuilder::new(base_url))
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::from_builder(ClientBuilder::from(config))
    }

    pub fn from_builder(builder: ClientBuilder) -> Result<Self, Error> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("filedepot-blocking")
            .enable_all()
            .build()?;
        Ok(FileDepotClient {
            inner: builder.build()?,
            runtime,
        })
    }

    /// The async client driven by this facade.
    pub fn inner(&self) -> &HttpFileDepotClient {
        &self.inner
    }

    pub fn prepare_upload(&self) -> Result<UploadUrlResponse, Error> {
        self.runtime.block_on(self.inner.prepare_upload())
    }

    pub fn confirm_upload(&self, id: &str, file_name: Option<&str>) -> Result<StorageItem, Error> {
        self.runtime
            .block_on(self.inner.confirm_upload(id, file_name))
    }

    pub fn get_file_metadata(&self, id: &str, with_content: bool) -> Result<StorageItem, Error> {
        self.runtime
            .block_on(self.inner.get_file_metadata(id, with_content))
    }

    pub fn get_download_url(&self, id: &str) -> Result<DownloadUrlResponse, Error> {
        self.runtime.block_on(self.inner.get_download_url(id))
    }

    pub fn delete_files(&self, ids: &[String]) -> Result<(), Error> {
        self.runtime.block_on(self.inner.delete_files(ids))
    }

    pub fn download_batch(&self, ids: &[String]) -> Result<Vec<u8>, Error> {
        self.runtime.block_on(self.inner.download_batch(ids))
    }

    pub fn get_chunks(&self, id: &str, with_embedding: bool) -> Result<Vec<Chunk>, Error> {
        self.runtime
            .block_on(self.inner.get_chunks(id, with_embedding))
    }
}
