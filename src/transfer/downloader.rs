use reqwest::Client;
use tracing::debug;

use std::{io, sync::Arc};

use super::ProgressListener;
use crate::error::{ClientError, Error};

/// `GET`s a presigned download URL into `writer`, returning the bytes written.
pub async fn get_presigned<W: io::Write>(
    http: &Client,
    url: &str,
    writer: W,
    name: Arc<String>,
    progress_listener: Option<ProgressListener>,
) -> Result<u64, Error> {
    let mut downloader = Downloader::new(progress_listener, writer);
    downloader.download(http, name, url).await
}

/// Streams the object behind a presigned download URL into `next_writer`.
pub struct Downloader<W: io::Write> {
    progress_listener: Option<ProgressListener>,
    next_writer: W,
}

impl<W: io::Write> Downloader<W> {
    pub fn new(progress_listener: Option<ProgressListener>, next_writer: W) -> Self {
        Downloader {
            progress_listener,
            next_writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.next_writer
    }

    /// Returns the number of bytes written.
    pub async fn download(
        &mut self,
        http: &Client,
        name: Arc<String>,
        url: &str,
    ) -> Result<u64, Error> {
        let mut resp = http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(ClientError::UnexpectedStatus(status, body).into());
        }

        let total_len = resp
            .content_length()
            .map_or(0, |len| usize::try_from(len).unwrap_or(usize::MAX));
        debug!(len = total_len, "downloading from presigned url");

        let mut written_len = 0;
        while let Some(chunk) = resp.chunk().await? {
            self.next_writer.write_all(chunk.as_ref())?;
            written_len += chunk.len();

            if let Some(pl) = self.progress_listener.as_ref() {
                if let Ok(mut f) = pl.lock() {
                    f(name.clone(), written_len, total_len);
                }
            }
        }
        self.next_writer.flush()?;

        Ok(written_len as u64)
    }
}
