#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use tiny::config::SiteConfig;
use tiny::http::connection::handle_connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A scratch document root, removed on drop.
pub struct DocRoot {
    pub path: PathBuf,
}

impl DocRoot {
    pub fn new(name: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tiny-{}-{}-{}",
            name,
            std::process::id(),
            id
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn file(&self, rel: &str, content: &[u8], mode: u32) -> PathBuf {
        let full = self.path.join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
        std::fs::set_permissions(&full, std::fs::Permissions::from_mode(mode)).unwrap();
        full
    }

    pub fn root(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            document_root: self.root(),
            ..SiteConfig::default()
        }
    }

    pub fn join(&self, rel: &str) -> String {
        format!("{}{}", self.root(), rel)
    }
}

impl Drop for DocRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Script answering with the sum of the two `&`-separated numbers in
/// `QUERY_STRING`.
pub const ADDER: &[u8] = b"#!/bin/sh\n\
a=${QUERY_STRING%%&*}\n\
b=${QUERY_STRING#*&}\n\
printf 'Content-type: text/html\\r\\n\\r\\n'\n\
printf 'The answer is: %d + %d = %d\\n' \"$a\" \"$b\" $((a + b))\n";

/// Feeds `request` to a fresh handler over an in-memory pipe and returns
/// everything the handler wrote.
pub async fn exchange(request: &[u8], site: &SiteConfig) -> anyhow::Result<Vec<u8>> {
    let (mut client, server) = tokio::io::duplex(1 << 20);
    client.write_all(request).await?;
    client.shutdown().await?;

    handle_connection(server, site).await?;

    let mut out = Vec::new();
    client.read_to_end(&mut out).await?;
    Ok(out)
}

pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no blank line");
    let head = String::from_utf8_lossy(&raw[..end + 2]).into_owned();
    (head, raw[end + 4..].to_vec())
}
