use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::content::resolver::contains;

/// Content type for a resolved file path.
///
/// Markers are matched anywhere in the path, first hit wins, so
/// `./page.html.bak` is still served as `text/html`.
pub fn content_type(path: &Path) -> &'static str {
    const TYPES: [(&[u8], &str); 4] = [
        (b".html", "text/html"),
        (b".gif", "image/gif"),
        (b".png", "image/png"),
        (b".jpg", "image/jpeg"),
    ];

    let raw = path.as_os_str().as_bytes();
    TYPES
        .iter()
        .find(|(marker, _)| contains(raw, marker))
        .map(|(_, mime)| *mime)
        .unwrap_or("text/plain")
}
