//! One-call upload and download flows on top of [`HttpFileDepotClient`].

use std::{io, sync::Arc};

use tracing::debug;

use crate::api::StorageItem;
use crate::client::{FileDepot, HttpFileDepotClient};
use crate::error::Error;
use crate::transfer::{downloader, uploader, ProgressListener};
use crate::validate::{require_max_length, require_path_id, MAX_FILE_NAME_LEN};

/// Uploads everything `reader` yields as a new file.
///
/// Runs `prepare_upload`, `PUT`s the content to the returned presigned URL and
/// confirms it. Without `file_name` the service names the file after its id.
/// The progress listener receives the file name (or the id) as its label.
pub async fn upload(
    client: &HttpFileDepotClient,
    reader: &mut (impl io::Read + Send),
    file_name: Option<&str>,
    content_type: Option<&str>,
    progress_listener: Option<ProgressListener>,
) -> Result<StorageItem, Error> {
    require_max_length(file_name, MAX_FILE_NAME_LEN, "fileName")?;

    let mut data = vec![];
    reader.read_to_end(&mut data)?;

    let prepared = client.prepare_upload().await?;
    debug!(id = %prepared.id, len = data.len(), "prepared upload");

    let label = Arc::new(file_name.unwrap_or(&prepared.id).to_owned());
    uploader::put_presigned(
        client.http_client(),
        &prepared.upload_url,
        data,
        content_type,
        label,
        progress_listener,
    )
    .await?;

    client.confirm_upload(&prepared.id, file_name).await
}

/// Downloads the content of file `id` into `writer`, returning the bytes written.
pub async fn download(
    client: &HttpFileDepotClient,
    id: &str,
    writer: impl io::Write + Send,
    progress_listener: Option<ProgressListener>,
) -> Result<u64, Error> {
    require_path_id(id, "id")?;

    let target = client.get_download_url(id).await?;
    downloader::get_presigned(
        client.http_client(),
        &target.download_url,
        writer,
        Arc::new(id.to_owned()),
        progress_listener,
    )
    .await
}
