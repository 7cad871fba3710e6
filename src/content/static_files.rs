use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ServeError;
use crate::http::mime::content_type;
use crate::http::response::ResponseHead;
use crate::http::writer::write_head;

/// Sends a file the caller already checked is a readable regular file.
///
/// Body bytes are streamed through a fixed buffer and capped at `size`, the
/// length announced in the head.
pub async fn serve_static<W>(
    stream: &mut W,
    server: &str,
    path: &Path,
    size: u64,
) -> Result<(), ServeError>
where
    W: AsyncWrite + Unpin,
{
    let head = ResponseHead::static_file(server, size, content_type(path));
    write_head(stream, &head).await?;

    let file = tokio::fs::File::open(path).await?;
    let sent = copy_body(file, size, stream).await?;
    if sent < size {
        tracing::warn!(path = %path.display(), sent, size, "File shrank while being served");
    }

    Ok(())
}

async fn copy_body<R, W>(source: R, size: u64, stream: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut limited = source.take(size);
    let sent = tokio::io::copy(&mut limited, stream).await?;
    stream.flush().await?;
    Ok(sent)
}
