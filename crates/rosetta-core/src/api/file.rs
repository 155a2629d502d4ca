//! Streamed results of the CSV export endpoints.

use std::io;
use std::path::Path;
use std::pin::Pin;

use futures::TryStreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use tokio::io::{AsyncBufRead, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::debug;

use super::Result;

/// Readable export body, positioned at the first byte.
pub type BodyStream = Pin<Box<dyn AsyncBufRead + Send>>;

/// A downloaded export: status, headers and the body as a stream.
pub struct FileResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BodyStream,
}

impl std::fmt::Debug for FileResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl FileResponse {
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let stream = response.bytes_stream().map_err(io::Error::other);

        Self {
            status,
            headers,
            body: Box::pin(StreamReader::new(stream)),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// True for 206 Partial Content.
    pub fn is_partial(&self) -> bool {
        self.status == StatusCode::PARTIAL_CONTENT
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn stream(&mut self) -> &mut BodyStream {
        &mut self.body
    }

    pub fn into_stream(self) -> BodyStream {
        self.body
    }

    /// Write the rest of the body to `path`, returning the number of bytes written.
    pub async fn save_to(mut self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let mut file = tokio::fs::File::create(path).await?;
        let written = tokio::io::copy_buf(&mut self.body, &mut file).await?;
        file.flush().await?;

        debug!(path = %path.display(), bytes = written, "Saved export");
        Ok(written)
    }
}
