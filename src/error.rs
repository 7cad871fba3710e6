//! Failure taxonomy for a single request.
//!
//! Classified failures become an HTML error page; everything else aborts the
//! connection without a response.

use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::content::error_page::ErrorPage;
use crate::http::response::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Request line did not split into exactly three tokens.
    #[error("malformed request line: {line:?}")]
    MalformedRequest { line: String, method: String },

    #[error("method {0} is not implemented")]
    UnsupportedMethod(String),

    #[error("{} does not exist", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("permission denied for {}", .path.display())]
    PermissionDenied { path: PathBuf, dynamic: bool },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spawning the CGI program failed after the 200 head went out.
    #[error("failed to run {}: {source}", .path.display())]
    Execution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServeError {
    /// Error page for classified failures, `None` for connection-level ones.
    pub fn outcome(&self) -> Option<ErrorPage> {
        match self {
            ServeError::MalformedRequest { method, .. } | ServeError::UnsupportedMethod(method) => {
                Some(ErrorPage::new(
                    StatusCode::NotImplemented,
                    "Tiny does not implement this method",
                    method.as_bytes(),
                ))
            }
            ServeError::ResourceNotFound(path) => Some(ErrorPage::new(
                StatusCode::NotFound,
                "Tiny couldn't find this file",
                path.as_os_str().as_bytes(),
            )),
            ServeError::PermissionDenied { path, dynamic } => {
                let long = if *dynamic {
                    "Tiny couldn't run the CGI program"
                } else {
                    "Tiny couldn't read the file"
                };
                Some(ErrorPage::new(
                    StatusCode::Forbidden,
                    long,
                    path.as_os_str().as_bytes(),
                ))
            }
            ServeError::Io(_) | ServeError::Execution { .. } => None,
        }
    }
}
