use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Default longest line handed out in one piece.
pub const MAX_LINE: usize = 8192;

/// Buffered line reader over a connected stream.
///
/// Lines longer than `max_line` bytes are cut; the remainder comes back on
/// the next call. The wrapped stream stays reachable for writing.
pub struct LineReader<S> {
    inner: BufReader<S>,
    max_line: usize,
}

impl<S: AsyncRead + Unpin> LineReader<S> {
    pub fn new(stream: S) -> Self {
        Self::with_max_line(stream, MAX_LINE)
    }

    pub fn with_max_line(stream: S, max_line: usize) -> Self {
        Self {
            inner: BufReader::new(stream),
            max_line: max_line.max(1),
        }
    }

    /// Next line including its terminator, as raw bytes. Empty means EOF.
    pub async fn read_line(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut limited = (&mut self.inner).take(self.max_line as u64);
        limited.read_until(b'\n', &mut buf).await?;
        Ok(buf)
    }

    /// Exactly `n` bytes, or `UnexpectedEof` if the peer closes first.
    pub async fn read_exact(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf).await?;
        Ok(buf)
    }

    pub fn get_mut(&mut self) -> &mut S {
        self.inner.get_mut()
    }
}
