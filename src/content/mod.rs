//! What gets sent back for a request.
//!
//! Resolution of targets to files and the three ways of answering: a static
//! file, the output of a CGI program, or an HTML error page.

pub mod cgi;
pub mod error_page;
pub mod resolver;
pub mod static_files;

pub use error_page::ErrorPage;
pub use resolver::{FileStat, ResolvedResource, Resolver, ResourceKind};
