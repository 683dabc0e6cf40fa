//! `filedepot` is a client for the File Depot storage service.
//!
//! These features are supported:
//! * Every File Depot REST operation: preparing and confirming uploads, file metadata,
//!   presigned download URLs, soft deletion, ZIP batch downloads and file chunks.
//! * Argument validation before anything is sent.
//! * One-call uploads and downloads through the presigned URLs, with progress reporting.
//! * A blocking client for code without an async runtime.
//!
//! ## Errors
//! Every operation returns [`Error`], which is one of
//! * [`Error::InvalidArgument`]: blank id, empty id list, file name over 255 characters...
//! * [`Error::Server`]: the service answered `success: false`, the message is kept as sent.
//! * [`Error::Client`]: network, timeout or decoding failures on our side.
//!
//! ## Example
//!
//! To upload a file and read its metadata back:
//! ```no_run
//! use filedepot::{FileDepot, HttpFileDepotClient};
//! # async fn run() -> Result<(), filedepot::Error> {
//! let client = HttpFileDepotClient::new("http://localhost:8080")?;
//!
//! let item = filedepot::helper::upload(
//!     &client,
//!     &mut std::fs::File::open("report.pdf")?,
//!     Some("report.pdf"),  // file name, `None` makes the service use the id
//!     Some("application/pdf"),  // content type sent to the object store
//!     None,  // progress listener
//! )
//! .await?;
//!
//! let metadata = client.get_file_metadata(&item.id, false).await?;
//! assert_eq!(metadata.file_name, "report.pdf");
//! # Ok(())
//! # }
//! ```
//!
//! To fetch several files as one ZIP archive:
//! ```no_run
//! # use filedepot::{FileDepot, HttpFileDepotClient};
//! # async fn run(client: HttpFileDepotClient) -> Result<(), filedepot::Error> {
//! let ids = vec!["6f1c...".to_owned(), "a2b9...".to_owned()];
//! let zip = client.download_batch(&ids).await?;
//! std::fs::write("files.zip", zip)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod helper;
pub mod transfer;
pub mod validate;

pub use api::{Chunk, DownloadUrlResponse, StorageItem, UploadUrlResponse};
pub use client::{FileDepot, HttpFileDepotClient};
pub use config::{ClientBuilder, Config};
pub use error::{ClientError, Error, ServerError};
