use bytes::BytesMut;
use tokio::time::{sleep, timeout};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, info, warn};

use crate::core::{CommandTag, ControlConfig, Error, FilterEdges, Result};
use crate::network::Transport;
use crate::protocol::{Command, Correlator, CorrelatorState, Disposition, PacketCodec};

/// Everything one control session needs, built once at startup
pub struct ControlContext<T> {
    /// Configuration
    config: ControlConfig,
    /// Status and command channels
    transport: T,
    /// Packet codec
    codec: PacketCodec,
    /// Outstanding command, if any
    correlator: Correlator,
}

impl<T: Transport> ControlContext<T> {
    /// Creates a session over an opened transport
    pub fn new(config: ControlConfig, transport: T) -> Self {
        ControlContext {
            config,
            transport,
            codec: PacketCodec::new(),
            correlator: Correlator::new(),
        }
    }

    /// Returns the session configuration
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Returns the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the correlator state
    pub fn state(&self) -> CorrelatorState {
        self.correlator.state()
    }

    /// Sends a command for `edges` with a fresh tag.
    ///
    /// Only one command may be sent per session. A failed or short send is
    /// logged and the tag stays registered.
    pub async fn submit(&mut self, edges: FilterEdges) -> Result<CommandTag> {
        let command = Command::new(edges);
        let mut buf = BytesMut::with_capacity(self.codec.max_packet_size());
        self.codec.encode(command, &mut buf)?;
        self.correlator.register(command.tag)?;

        match self.transport.send(&buf).await {
            Ok(sent) if sent == buf.len() => {
                info!(tag = %command.tag, low = edges.low, high = edges.high, "command sent");
            }
            Ok(sent) => warn!(sent, len = buf.len(), "command send was short"),
            Err(e) => warn!(error = %e, "command send failed"),
        }
        Ok(command.tag)
    }

    /// Waits for the status that ends the session.
    ///
    /// With a command outstanding this is the status echoing its tag,
    /// otherwise the first status with valid edges. Waits forever unless
    /// the configuration sets a deadline.
    pub async fn wait(&mut self) -> Result<FilterEdges> {
        if let Some(edges) = self.correlator.result() {
            return Ok(edges);
        }
        if matches!(self.correlator.state(), CorrelatorState::Idle) {
            self.correlator.watch()?;
        }

        match self.config.deadline {
            Some(limit) => timeout(limit, self.receive_loop())
                .await
                .map_err(|_| Error::NoAcknowledgement(limit))?,
            None => self.receive_loop().await,
        }
    }

    /// Sends a command when edges are given, then waits for the status
    pub async fn run(&mut self, request: Option<FilterEdges>) -> Result<FilterEdges> {
        if let Some(edges) = request {
            self.submit(edges).await?;
        }
        self.wait().await
    }

    async fn receive_loop(&mut self) -> Result<FilterEdges> {
        let mut buf = BytesMut::zeroed(self.codec.max_packet_size());

        loop {
            let len = match self.transport.receive(&mut buf[..]).await {
                Ok(len) => len,
                Err(e) => {
                    warn!(error = %e, "status receive failed");
                    sleep(self.config.retry_delay).await;
                    continue;
                }
            };
            // Only the bytes of this datagram go to the codec
            let mut datagram = BytesMut::from(&buf[..len]);
            let Some(packet) = self.codec.decode(&mut datagram)? else {
                continue;
            };

            match self.correlator.observe(&packet) {
                Disposition::Accepted(edges) => {
                    info!(tag = ?packet.tag, low = edges.low, high = edges.high, "status accepted");
                    return Ok(edges);
                }
                disposition => {
                    debug!(?disposition, truncated = packet.truncated, "status discarded");
                }
            }
        }
    }
}
