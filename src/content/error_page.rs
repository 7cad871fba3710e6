use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{ResponseHead, StatusCode};
use crate::http::writer::write_head;

/// A classified failure, ready to be rendered for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub long_message: String,
    /// Offending method or filename, inserted verbatim as raw bytes.
    pub cause: Vec<u8>,
}

impl ErrorPage {
    pub fn new(
        status: StatusCode,
        long_message: impl Into<String>,
        cause: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            long_message: long_message.into(),
            cause: cause.into(),
        }
    }

    pub fn short_message(&self) -> &'static str {
        self.status.reason_phrase()
    }

    /// HTML body. Nothing is escaped.
    pub fn body(&self) -> Vec<u8> {
        let mut body = format!(
            "<html><title>Tiny Error</title><body bgcolor=ffffff>\r\n\
             {}: {}\r\n\
             <p>{}: ",
            self.status.as_u16(),
            self.short_message(),
            self.long_message,
        )
        .into_bytes();
        body.extend_from_slice(&self.cause);
        body.extend_from_slice(b"\r\n<hr><em>The Tiny Web server</em>\r\n");
        body
    }
}

pub async fn send_error<W>(stream: &mut W, page: &ErrorPage) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_head(stream, &ResponseHead::error(page.status)).await?;
    stream.write_all(&page.body()).await?;
    stream.flush().await
}
