//! A thin Tokio driver that feeds lines into an [`IrcClient`].
//!
//! The engine itself does no I/O. [`Connection`] owns the line framing and
//! writes whatever the engine asks for, highest priority first within each
//! batch. Framing goes through [`LineCodec`], so a garbled or over-long
//! line is skipped rather than ending the session. Rate limiting and TLS are
//! left to the caller, who can wrap any `AsyncRead + AsyncWrite` stream.

use std::cmp::Reverse;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::client::IrcClient;
use crate::command::Outbound;
use crate::error::{ProtocolError, Result};
use crate::line::LineCodec;

/// A line-framed connection to a server.
pub struct Connection<S> {
    framed: Framed<S, LineCodec>,
}

impl Connection<TcpStream> {
    /// Open a TCP connection with keepalive enabled.
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("connecting to {}", addr))?;
        Ok(Self::tcp(stream))
    }

    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }
        Self::new(stream)
    }

    fn enable_keepalive(stream: &TcpStream) -> anyhow::Result<()> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    /// Next line without its terminator, or `None` once the peer has closed.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        self.framed.next().await.transpose()
    }

    /// Write one command, CRLF-terminated.
    pub async fn send(&mut self, out: &Outbound) -> Result<()> {
        debug!("-> {}", out.command);
        self.framed.send(out.command.to_string()).await?;
        Ok(())
    }

    /// Write a batch, highest priority first. Equal priorities keep their
    /// order.
    pub async fn send_all(&mut self, mut batch: Vec<Outbound>) -> Result<()> {
        batch.sort_by_key(|out| Reverse(out.priority));
        for out in &batch {
            debug!("-> {}", out.command);
            self.framed.feed(out.command.to_string()).await?;
        }
        SinkExt::<String>::flush(&mut self.framed).await?;
        Ok(())
    }

    /// Feed every received line to `client` and write its replies.
    ///
    /// Returns [`ProtocolError::ConnectionClosed`] when the peer closes the
    /// stream.
    pub async fn run(&mut self, client: &mut IrcClient) -> Result<()> {
        while let Some(line) = self.read_line().await? {
            let outbound = client.process_line(&line);
            if !outbound.is_empty() {
                self.send_all(outbound).await?;
            }
        }
        Err(ProtocolError::ConnectionClosed)
    }
}
