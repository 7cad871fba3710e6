//! Tiny - a minimal HTTP/1.0 web server
//!
//! Serves GET requests with static files from a document root or with the
//! output of CGI programs.

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod server;
