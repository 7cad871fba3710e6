use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::ResponseHead;

const HTTP_VERSION: &str = "HTTP/1.0";

pub fn serialize_head(head: &ResponseHead) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        head.status.as_u16(),
        head.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    for (k, v) in &head.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    if head.terminated {
        buf.put_slice(b"\r\n");
    }

    buf
}

/// Writes a serialized head and flushes it so it reaches the peer before any
/// body bytes produced elsewhere.
pub async fn write_head<W>(stream: &mut W, head: &ResponseHead) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let buf = serialize_head(head);
    stream.write_all(&buf).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::StatusCode;

    #[test]
    fn open_head_has_no_blank_line() {
        let buf = serialize_head(&ResponseHead::dynamic("Tiny Web Server"));
        assert_eq!(&buf[..], b"HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\n");
    }

    #[test]
    fn error_head_is_terminated() {
        let buf = serialize_head(&ResponseHead::error(StatusCode::NotFound));
        assert_eq!(&buf[..], b"HTTP/1.0 404 Not found\r\nContent-type: text/html\r\n\r\n");
    }
}
