use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::error::ServeError;
use crate::http::response::ResponseHead;
use crate::http::writer::write_head;

const RELAY_BUFFER: usize = 8192;

/// How long output left in the pipe is still relayed once the program exits.
///
/// Background processes can keep the pipe open after the program is gone;
/// their output is not waited for.
const DRAIN_IDLE: Duration = Duration::from_millis(50);

/// Runs an executable and streams its stdout to the client.
///
/// The 200 head is sent before the program starts, so a spawn failure leaves
/// the client with a head and no body. The program gets no arguments and
/// `QUERY_STRING` on top of the server's own environment. Returns once the
/// program itself has exited.
pub async fn serve_dynamic<W>(
    stream: &mut W,
    server: &str,
    path: &Path,
    query_string: &OsStr,
) -> Result<(), ServeError>
where
    W: AsyncWrite + Unpin,
{
    write_head(stream, &ResponseHead::dynamic(server)).await?;

    let mut child = Command::new(path)
        .env("QUERY_STRING", query_string)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ServeError::Execution {
            path: path.to_path_buf(),
            source,
        })?;

    let relayed = match child.stdout.take() {
        Some(stdout) => relay(&mut child, stdout, stream).await,
        None => child.wait().await.map(|status| (status, 0)),
    };

    let (status, bytes) = match relayed {
        Ok(done) => done,
        Err(err) => {
            // Reap the child even when the client went away mid-relay.
            let _ = child.wait().await;
            return Err(err.into());
        }
    };

    if status.success() {
        tracing::debug!(path = %path.display(), %status, bytes, "CGI program finished");
    } else {
        tracing::warn!(path = %path.display(), %status, bytes, "CGI program exited unsuccessfully");
    }
    stream.flush().await?;

    Ok(())
}

/// Copies program output until the program exits, then drains what is
/// still pending in the pipe.
async fn relay<R, W>(
    child: &mut Child,
    mut stdout: R,
    stream: &mut W,
) -> std::io::Result<(ExitStatus, u64)>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; RELAY_BUFFER];
    let mut bytes = 0u64;

    let status = loop {
        tokio::select! {
            status = child.wait() => break status?,
            n = stdout.read(&mut buf) => {
                let n = n?;
                if n == 0 {
                    return Ok((child.wait().await?, bytes));
                }
                stream.write_all(&buf[..n]).await?;
                bytes += n as u64;
            }
        }
    };

    while let Ok(n) = tokio::time::timeout(DRAIN_IDLE, stdout.read(&mut buf)).await {
        let n = n?;
        if n == 0 {
            break;
        }
        stream.write_all(&buf[..n]).await?;
        bytes += n as u64;
    }

    Ok((status, bytes))
}
