//! Mapping request targets onto the document root.
//!
//! Paths are built by byte concatenation. There is no `..` handling and no
//! percent-decoding, so targets can name files outside the root.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;

/// How a resolved resource is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// File copied to the client as-is
    Static,
    /// Program whose output becomes the response
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub kind: ResourceKind,
    pub path: PathBuf,
    /// Raw bytes after the first `?`; always empty for static resources.
    pub query_string: OsString,
}

pub struct Resolver {
    document_root: Vec<u8>,
    default_document: Vec<u8>,
    cgi_marker: Vec<u8>,
}

impl Resolver {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            document_root: site.document_root.clone().into_bytes(),
            default_document: site.default_document.clone().into_bytes(),
            cgi_marker: site.cgi_marker.clone().into_bytes(),
        }
    }

    /// Classifies `target` and builds its filesystem path byte for byte.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::path::Path;
    /// # use tiny::config::SiteConfig;
    /// # use tiny::content::resolver::{Resolver, ResourceKind};
    /// let resolver = Resolver::new(&SiteConfig::default());
    ///
    /// let res = resolver.resolve(b"/");
    /// assert_eq!(res.kind, ResourceKind::Static);
    /// assert_eq!(res.path, Path::new("./home.html"));
    ///
    /// let res = resolver.resolve(b"/cgi-bin/adder?1&2");
    /// assert_eq!(res.kind, ResourceKind::Dynamic);
    /// assert_eq!(res.path, Path::new("./cgi-bin/adder"));
    /// assert_eq!(res.query_string, "1&2");
    /// ```
    pub fn resolve(&self, target: &[u8]) -> ResolvedResource {
        if contains(target, &self.cgi_marker) {
            let (uri, query) = match target.iter().position(|&b| b == b'?') {
                Some(at) => (&target[..at], &target[at + 1..]),
                None => (target, &b""[..]),
            };
            return ResolvedResource {
                kind: ResourceKind::Dynamic,
                path: self.rooted(uri, false),
                query_string: OsString::from_vec(query.to_vec()),
            };
        }

        ResolvedResource {
            kind: ResourceKind::Static,
            path: self.rooted(target, target.ends_with(b"/")),
            query_string: OsString::new(),
        }
    }

    fn rooted(&self, uri: &[u8], default_document: bool) -> PathBuf {
        let mut raw = self.document_root.clone();
        raw.extend_from_slice(uri);
        if default_document {
            raw.extend_from_slice(&self.default_document);
        }
        PathBuf::from(OsString::from_vec(raw))
    }
}

/// Substring test over raw bytes. An empty needle always matches.
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

/// What a `stat` of the resolved path tells the dispatcher.
///
/// Permission flags are the owner bits of the mode, not an access check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    pub exists: bool,
    pub is_regular_file: bool,
    pub is_readable: bool,
    pub is_executable: bool,
    pub size: u64,
}

impl FileStat {
    /// Any failure to stat counts as a missing file.
    pub async fn inspect(path: &Path) -> Self {
        match tokio::fs::metadata(path).await {
            Ok(meta) => {
                let mode = meta.permissions().mode();
                Self {
                    exists: true,
                    is_regular_file: meta.is_file(),
                    is_readable: mode & 0o400 != 0,
                    is_executable: mode & 0o100 != 0,
                    size: meta.len(),
                }
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "stat failed");
                Self::default()
            }
        }
    }

    /// Whether a resource of `kind` may be served from this file.
    pub fn permits(&self, kind: ResourceKind) -> bool {
        self.is_regular_file
            && match kind {
                ResourceKind::Static => self.is_readable,
                ResourceKind::Dynamic => self.is_executable,
            }
    }
}
