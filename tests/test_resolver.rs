mod common;

use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use common::DocRoot;
use tiny::config::SiteConfig;
use tiny::content::resolver::{FileStat, Resolver, ResourceKind};

fn resolver() -> Resolver {
    Resolver::new(&SiteConfig::default())
}

#[test]
fn test_static_target_is_prefixed_with_root() {
    for target in ["/home.html", "/img/logo.png", "/a?b=c", "/../etc/passwd"] {
        let res = resolver().resolve(target.as_bytes());

        assert_eq!(res.kind, ResourceKind::Static);
        assert_eq!(res.path, Path::new(&format!(".{}", target)));
        assert!(res.query_string.is_empty());
    }
}

#[test]
fn test_directory_target_gets_default_document() {
    assert_eq!(resolver().resolve(b"/").path, Path::new("./home.html"));
    assert_eq!(resolver().resolve(b"/docs/").path, Path::new("./docs/home.html"));
}

#[test]
fn test_dynamic_target_splits_query_string() {
    let res = resolver().resolve(b"/cgi-bin/adder?a=1&b=2");

    assert_eq!(res.kind, ResourceKind::Dynamic);
    assert_eq!(res.path, Path::new("./cgi-bin/adder"));
    assert_eq!(res.query_string, "a=1&b=2");
}

#[test]
fn test_dynamic_target_without_query() {
    let res = resolver().resolve(b"/cgi-bin/env");

    assert_eq!(res.kind, ResourceKind::Dynamic);
    assert_eq!(res.path, Path::new("./cgi-bin/env"));
    assert_eq!(res.query_string, "");
}

#[test]
fn test_dynamic_splits_at_first_question_mark() {
    let res = resolver().resolve(b"/cgi-bin/echo?x?y");

    assert_eq!(res.path, Path::new("./cgi-bin/echo"));
    assert_eq!(res.query_string, "x?y");
}

#[test]
fn test_marker_anywhere_in_target_is_dynamic() {
    let res = resolver().resolve(b"/scripts/mycgi-bin-tool?1");

    assert_eq!(res.kind, ResourceKind::Dynamic);
    assert_eq!(res.path, Path::new("./scripts/mycgi-bin-tool"));
}

#[test]
fn test_dynamic_target_ending_in_slash_keeps_path() {
    let res = resolver().resolve(b"/cgi-bin/");
    assert_eq!(res.path, Path::new("./cgi-bin/"));
}

#[test]
fn test_non_utf8_target_is_kept_byte_for_byte() {
    let res = resolver().resolve(b"/caf\xe9.txt");

    assert_eq!(res.kind, ResourceKind::Static);
    assert_eq!(res.path.as_os_str().as_bytes(), b"./caf\xe9.txt");
}

#[test]
fn test_non_utf8_query_string_is_kept() {
    let res = resolver().resolve(b"/cgi-bin/echo?n\xe9");

    assert_eq!(res.query_string.as_bytes(), b"n\xe9");
}

#[test]
fn test_custom_site_settings() {
    let site = SiteConfig {
        document_root: "/srv/www".to_string(),
        default_document: "index.html".to_string(),
        cgi_marker: "dyn".to_string(),
        ..SiteConfig::default()
    };
    let resolver = Resolver::new(&site);

    assert_eq!(resolver.resolve(b"/").path, Path::new("/srv/www/index.html"));
    assert_eq!(resolver.resolve(b"/cgi-bin/adder").kind, ResourceKind::Static);
    assert_eq!(resolver.resolve(b"/dyn/run?q").path, Path::new("/srv/www/dyn/run"));
}

#[tokio::test]
async fn test_file_stat_regular_file() {
    let root = DocRoot::new("stat-file");
    root.file("page.html", b"0123456789", 0o644);

    let stat = FileStat::inspect(Path::new(&root.join("/page.html"))).await;

    assert!(stat.exists);
    assert!(stat.is_regular_file);
    assert!(stat.is_readable);
    assert!(!stat.is_executable);
    assert_eq!(stat.size, 10);
    assert!(stat.permits(ResourceKind::Static));
    assert!(!stat.permits(ResourceKind::Dynamic));
}

#[tokio::test]
async fn test_file_stat_missing() {
    let root = DocRoot::new("stat-missing");

    let stat = FileStat::inspect(Path::new(&root.join("/nope.html"))).await;

    assert_eq!(stat, FileStat::default());
    assert!(!stat.exists);
}

#[tokio::test]
async fn test_file_stat_directory_is_not_regular() {
    let root = DocRoot::new("stat-dir");

    let stat = FileStat::inspect(Path::new(&root.root())).await;

    assert!(stat.exists);
    assert!(!stat.is_regular_file);
    assert!(!stat.permits(ResourceKind::Static));
}

#[tokio::test]
async fn test_file_stat_uses_owner_mode_bits() {
    let root = DocRoot::new("stat-mode");
    root.file("secret.txt", b"x", 0o000);
    root.file("run", b"#!/bin/sh\n", 0o700);

    let secret = FileStat::inspect(Path::new(&root.join("/secret.txt"))).await;
    assert!(!secret.is_readable);
    assert!(!secret.permits(ResourceKind::Static));

    let run = FileStat::inspect(Path::new(&root.join("/run"))).await;
    assert!(run.is_executable);
    assert!(run.permits(ResourceKind::Dynamic));
}
