/// A parsed request line.
///
/// Lives only for the request it was read from. Headers are never stored:
/// the parser reads and discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token as sent, e.g. "GET" or "get"
    pub method: String,
    /// Request target as raw bytes, e.g. b"/cgi-bin/adder?1&2"
    ///
    /// Kept undecoded so file names that are not UTF-8 still resolve.
    pub target: Vec<u8>,
    /// Version token, typically "HTTP/1.0" or "HTTP/1.1"
    pub version: String,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        target: impl Into<Vec<u8>>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
        }
    }

    /// GET is the only method served, compared case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::request::Request;
    /// assert!(Request::new("get", "/", "HTTP/1.0").is_get());
    /// assert!(!Request::new("POST", "/", "HTTP/1.0").is_get());
    /// ```
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}
