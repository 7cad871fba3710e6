/// HTTP status codes the server can produce.
///
/// This is the complete outcome set:
/// - `Ok` (200): file or CGI output follows
/// - `Forbidden` (403): not a regular file, or missing read/execute permission
/// - `NotFound` (404): resolved path does not exist
/// - `NotImplemented` (501): any method other than GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the short message sent on the status line.
    ///
    /// The 404 phrase is "Not found", lowercase, as Tiny has always sent it.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Status line plus ordered header lines.
///
/// Bodies are never held here: static files and CGI output are streamed
/// straight to the connection after the head is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusCode,
    /// Header lines in emission order.
    pub headers: Vec<(String, String)>,
    /// Whether the blank line ending the head is ours to send.
    ///
    /// CGI responses leave it to the program, which writes its own headers.
    pub terminated: bool,
}

impl ResponseHead {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Builder for response heads in a fluent style.
///
/// # Example
///
/// ```
/// # use tiny::http::response::{ResponseBuilder, StatusCode};
/// let head = ResponseBuilder::new(StatusCode::Ok)
///     .header("Server", "Tiny Web Server")
///     .header("Content-type", "text/html")
///     .build();
/// assert_eq!(head.headers.len(), 2);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    terminated: bool,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            terminated: true,
        }
    }

    /// Appends a header line. Order is preserved on the wire.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Leaves the head open so a CGI program can add its own header lines.
    pub fn open(mut self) -> Self {
        self.terminated = false;
        self
    }

    pub fn build(self) -> ResponseHead {
        ResponseHead {
            status: self.status,
            headers: self.headers,
            terminated: self.terminated,
        }
    }
}

impl ResponseHead {
    /// Head for a static file: server, length and type, then the blank line.
    pub fn static_file(server: &str, size: u64, content_type: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Server", server)
            .header("Content-length", size.to_string())
            .header("Content-type", content_type)
            .build()
    }

    /// First part of a CGI response; the program writes the rest.
    pub fn dynamic(server: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Server", server)
            .open()
            .build()
    }

    /// Head for an error page. Error pages carry no server or length header.
    pub fn error(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .header("Content-type", "text/html")
            .build()
    }
}
