use std::ffi::OsString;
use std::path::PathBuf;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::SiteConfig;
use crate::content::cgi::serve_dynamic;
use crate::content::error_page::{send_error, ErrorPage};
use crate::content::resolver::{FileStat, ResolvedResource, Resolver, ResourceKind};
use crate::content::static_files::serve_static;
use crate::error::ServeError;
use crate::http::parser::{consume_headers, parse_request_line};
use crate::http::reader::LineReader;
use crate::http::request::Request;

/// Serves exactly one request on `stream`, then returns.
///
/// Classified failures are answered with an error page. I/O and spawn
/// failures come back as errors and the caller should drop the connection.
pub async fn handle_connection<S>(stream: S, site: &SiteConfig) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut conn = Connection::new(stream, site);
    conn.run().await
}

pub struct Connection<'a, S> {
    reader: LineReader<S>,
    site: &'a SiteConfig,
    resolver: Resolver,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    ReadRequestLine,
    ValidateMethod(Request),
    ReadHeaders(Request),
    Resolve(Request),
    Stat(ResolvedResource),
    Dispatch(ResolvedResource, FileStat),
    ServeStatic { path: PathBuf, size: u64 },
    ServeDynamic { path: PathBuf, query_string: OsString },
    RespondError(ErrorPage),
    Done,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: &'a SiteConfig) -> Self {
        Self {
            reader: LineReader::with_max_line(stream, site.max_line),
            site,
            resolver: Resolver::new(site),
            state: ConnectionState::ReadRequestLine,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Done);

            self.state = match state {
                ConnectionState::Done => break,
                state => match self.step(state).await {
                    Ok(next) => next,
                    Err(err) => match err.outcome() {
                        Some(page) => ConnectionState::RespondError(page),
                        None => return Err(err.into()),
                    },
                },
            };
        }

        Ok(())
    }

    async fn step(&mut self, state: ConnectionState) -> Result<ConnectionState, ServeError> {
        let next = match state {
            ConnectionState::ReadRequestLine => {
                let line = self.reader.read_line().await?;
                if line.is_empty() {
                    // Peer closed before sending anything
                    return Ok(ConnectionState::Done);
                }
                tracing::info!(
                    request = %String::from_utf8_lossy(line.trim_ascii_end()),
                    "Request line"
                );
                ConnectionState::ValidateMethod(parse_request_line(&line)?)
            }

            ConnectionState::ValidateMethod(req) => {
                if !req.is_get() {
                    return Err(ServeError::UnsupportedMethod(req.method));
                }
                ConnectionState::ReadHeaders(req)
            }

            ConnectionState::ReadHeaders(req) => {
                let discarded = consume_headers(&mut self.reader).await?;
                tracing::trace!(discarded, "Headers consumed");
                ConnectionState::Resolve(req)
            }

            ConnectionState::Resolve(req) => {
                let resource = self.resolver.resolve(&req.target);
                tracing::debug!(
                    uri = %String::from_utf8_lossy(&req.target),
                    path = %resource.path.display(),
                    kind = ?resource.kind,
                    "Resolved request target"
                );
                ConnectionState::Stat(resource)
            }

            ConnectionState::Stat(resource) => {
                let stat = FileStat::inspect(&resource.path).await;
                if !stat.exists {
                    return Err(ServeError::ResourceNotFound(resource.path));
                }
                ConnectionState::Dispatch(resource, stat)
            }

            ConnectionState::Dispatch(resource, stat) => {
                if !stat.permits(resource.kind) {
                    return Err(ServeError::PermissionDenied {
                        path: resource.path,
                        dynamic: resource.kind == ResourceKind::Dynamic,
                    });
                }
                match resource.kind {
                    ResourceKind::Static => ConnectionState::ServeStatic {
                        path: resource.path,
                        size: stat.size,
                    },
                    ResourceKind::Dynamic => ConnectionState::ServeDynamic {
                        path: resource.path,
                        query_string: resource.query_string,
                    },
                }
            }

            ConnectionState::ServeStatic { path, size } => {
                serve_static(self.reader.get_mut(), &self.site.server_name, &path, size).await?;
                ConnectionState::Done
            }

            ConnectionState::ServeDynamic { path, query_string } => {
                serve_dynamic(
                    self.reader.get_mut(),
                    &self.site.server_name,
                    &path,
                    &query_string,
                )
                .await?;
                ConnectionState::Done
            }

            ConnectionState::RespondError(page) => {
                tracing::warn!(
                    status = page.status.as_u16(),
                    cause = %String::from_utf8_lossy(&page.cause),
                    "Sending error response"
                );
                send_error(self.reader.get_mut(), &page).await?;
                ConnectionState::Done
            }

            ConnectionState::Done => ConnectionState::Done,
        };

        Ok(next)
    }
}
