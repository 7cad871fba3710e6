//! HTTP/1.0 protocol engine.
//!
//! One request per connection, GET only, answered from the document root.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine and `handle_connection`
//! - **`reader`**: buffered line reads over the connected stream
//! - **`parser`**: request line parsing and header discard
//! - **`request`**: the parsed request line
//! - **`response`**: status outcomes and response heads with a builder
//! - **`writer`**: serializes and writes response heads
//! - **`mime`**: content type sniffing from the file name
//!
//! # Connection State Machine
//!
//! ```text
//!   ReadRequestLine ──(EOF)──────────────────────────────┐
//!         │                                              │
//!   ValidateMethod ──(not GET)──► RespondError(501) ─────┤
//!         │                                              │
//!    ReadHeaders                                         │
//!         │                                              │
//!      Resolve                                           │
//!         │                                              │
//!       Stat ──────(missing)────► RespondError(404) ─────┤
//!         │                                              │
//!     Dispatch ───(forbidden)───► RespondError(403) ─────┤
//!         ├──► ServeStatic ──────────────────────────────┤
//!         └──► ServeDynamic ─────────────────────────────┴──► Done
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tiny::config::SiteConfig;
//! use tiny::http::connection::handle_connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let site = SiteConfig::default();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         if let Err(e) = handle_connection(socket, &site).await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
