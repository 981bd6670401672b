use std::sync::Arc;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::parser::read_request_head;
use crate::http::request::RequestHead;
use crate::http::resolve::{DocumentRoot, Resource};
use crate::http::response::ResponseHead;
use crate::http::template::Substitutions;
use crate::http::writer::ResponseWriter;

/// Serves exactly one request over `stream`, then closes it.
///
/// Failures are logged; the client may see a truncated response.
pub async fn handle<S>(stream: S, config: Arc<Config>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    debug!("Handling connection");
    if let Err(e) = Connection::new(stream, config).run().await {
        tracing::error!("Output error: {:#}", e);
    }
    debug!("Done handling connection");
}

/// One client connection, driven from request to close.
pub struct Connection<S> {
    stream: S,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(RequestHead),
    Streaming(Resource),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the state machine to completion. The stream is shut down on
    /// every path, including errors.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        self.state = ConnectionState::Closed;

        let shutdown = self.stream.shutdown().await;
        result?;
        shutdown.context("failed to close connection")?;
        Ok(())
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let head = self.read_request().await;
                    self.state = ConnectionState::Resolving(head);
                }

                ConnectionState::Resolving(head) => {
                    let resource = self.resolve(&head).await;
                    self.state = ConnectionState::Streaming(resource);
                }

                ConnectionState::Streaming(resource) => {
                    self.respond(resource).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> RequestHead {
        let mut reader = BufReader::new(&mut self.stream);
        let head = read_request_head(&mut reader, self.config.read_timeout()).await;

        if let Some(e) = head.error {
            warn!(error = %e, lines = head.lines_read, "Request head cut short");
        }

        head
    }

    async fn resolve(&self, head: &RequestHead) -> Resource {
        match head.get_target() {
            Some(target) => {
                let resource = DocumentRoot::from_config(&self.config).locate(target).await;
                info!(
                    path = target,
                    found = matches!(resource, Resource::Found(_)),
                    "Resolved request"
                );
                resource
            }
            None => {
                debug!(request_line = ?head.request_line, "No servable request line");
                Resource::NotFound
            }
        }
    }

    async fn respond(&mut self, resource: Resource) -> anyhow::Result<()> {
        let mut writer = ResponseWriter::new(&mut self.stream);

        match resource {
            Resource::Found(found) => {
                let file = File::open(&found.path)
                    .await
                    .with_context(|| format!("failed to open {}", found.path.display()))?;

                writer.write_head(&ResponseHead::ok(found.content_type)).await?;

                if found.content_type.is_templated() {
                    let subs = Substitutions::new(self.config.server_name.as_str());
                    writer.write_templated(BufReader::new(file), &subs).await?;
                } else {
                    writer.write_raw(file).await?;
                }

                debug!(
                    content_type = found.content_type.as_str(),
                    bytes = writer.written(),
                    "Response written"
                );
            }

            Resource::NotFound => {
                let head = ResponseHead::not_found(self.config.legacy_not_found_status);
                writer.write_head(&head).await?;
                writer.write_not_found_page().await?;

                debug!(status = head.status.as_u16(), "Not-found page written");
            }
        }

        writer.finish().await?;
        Ok(())
    }
}
