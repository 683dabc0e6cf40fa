use core::task::Poll;
use std::{cmp, io, sync::Arc};

use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Body, Client,
};
use tracing::debug;

use super::ProgressListener;
use crate::error::{ClientError, Error};

const PIECE_SIZE: usize = 1024 * 32;

/// `PUT`s `data` to a presigned upload URL.
///
/// The body is streamed in 32 KiB pieces so `progress_listener` sees it advance.
/// Content-Length is always sent since object stores refuse chunked uploads.
pub async fn put_presigned(
    http: &Client,
    url: &str,
    data: Vec<u8>,
    content_type: Option<&str>,
    name: Arc<String>,
    progress_listener: Option<ProgressListener>,
) -> Result<(), Error> {
    let total_len = data.len();
    let body = Body::wrap_stream(ProgressStream {
        name,
        data: Arc::new(data),
        cursor: 0,
        progress_listener,
    });

    let mut request = http
        .put(url)
        .header(CONTENT_LENGTH, total_len)
        .body(body);
    if let Some(content_type) = content_type {
        request = request.header(CONTENT_TYPE, content_type);
    }

    debug!(len = total_len, "uploading to presigned url");
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(ClientError::UnexpectedStatus(status, body).into());
    }
    Ok(())
}

#[derive(Clone)]
pub struct ProgressStream {
    name: Arc<String>,
    data: Arc<Vec<u8>>,
    cursor: usize,
    progress_listener: Option<ProgressListener>,
}

impl futures::Stream for ProgressStream {
    type Item = io::Result<Vec<u8>>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        _: &mut std::task::Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let total_len = self.data.len();
        let remain_len = total_len - self.cursor;

        if remain_len == 0 {
            Poll::Ready(None)
        } else {
            let start_index = self.cursor;
            self.cursor += cmp::min(remain_len, PIECE_SIZE);
            let piece = self.data[start_index..self.cursor].to_vec();

            if let Some(pl) = self.progress_listener.as_ref() {
                if let Ok(mut f) = pl.lock() {
                    f(self.name.clone(), self.cursor, total_len);
                }
            }

            Poll::Ready(Some(Ok(piece)))
        }
    }
}
