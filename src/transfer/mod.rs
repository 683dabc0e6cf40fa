//! Moving file content to and from the presigned URLs handed out by the service.
//!
//! The object store behind a presigned URL speaks plain HTTP, not the envelope
//! protocol, so these requests bypass [`crate::client`] and only reuse its transport.

use std::sync::{Arc, Mutex};

pub mod downloader;
pub mod uploader;

/// Called with `(name, transferred bytes, total bytes)` as content moves.
/// `total` is 0 when the server did not announce a length.
pub type ProgressListener = Arc<Mutex<dyn FnMut(Arc<String>, usize, usize) + Send + Sync + 'static>>;
