use tokio::io::AsyncRead;

use crate::error::ServeError;
use crate::http::reader::LineReader;
use crate::http::request::Request;

/// Splits a request line into method, target and version.
///
/// Tokens are separated by ASCII whitespace. The target keeps its raw bytes.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ServeError> {
    let mut parts = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => Ok(Request::new(
            String::from_utf8_lossy(method),
            target,
            String::from_utf8_lossy(version),
        )),
        (method, ..) => Err(ServeError::MalformedRequest {
            line: String::from_utf8_lossy(line.trim_ascii_end()).into_owned(),
            method: String::from_utf8_lossy(method.unwrap_or_default()).into_owned(),
        }),
    }
}

/// Reads and drops header lines up to the blank line ending the head.
///
/// Returns the number of header lines discarded. EOF also ends the head.
pub async fn consume_headers<S>(reader: &mut LineReader<S>) -> std::io::Result<usize>
where
    S: AsyncRead + Unpin,
{
    let mut count = 0;

    loop {
        let line = reader.read_line().await?;
        if line.is_empty() || line == b"\r\n" || line == b"\n" {
            return Ok(count);
        }

        tracing::trace!(
            header = %String::from_utf8_lossy(line.trim_ascii_end()),
            "Discarding header"
        );
        count += 1;
    }
}
