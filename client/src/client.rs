//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Async TCP driver

use crate::{
    ClientConfig, ClientError, ClientHandler, ClientResult, ConnectionEvent, Session, SessionEvent,
};
use mudlink_telnetcodec::gmcp::GmcpMessage;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, timeout};
use tracing::{debug, error, info, warn};

/// User input for a running [`TerminalClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// Send a line of text.
    Send(String),
    /// Send a GMCP message.
    SendGmcp(GmcpMessage),
    /// The viewport changed size.
    Resize(u16, u16),
    /// Close the connection and stop.
    Disconnect,
}

/// Why a connection ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    /// The user asked to disconnect.
    Requested,
    /// The server closed the connection.
    Closed,
}

///
/// Async MUD client
///
/// Drives one [`Session`] per live connection over TCP. Inbound bytes go to
/// the session, queued outbound bytes go to the socket, session timers run
/// between reads, and events go to the [`ClientHandler`]. When the
/// connection drops the client reconnects according to its config.
///
pub struct TerminalClient {
    config: ClientConfig,
    commands: mpsc::Receiver<ClientCommand>,
    commands_open: bool,
}

impl TerminalClient {
    /// Create a client and the sender used to feed it commands
    pub fn new(config: ClientConfig) -> (Self, mpsc::Sender<ClientCommand>) {
        let (sender, commands) = mpsc::channel(64);
        (
            Self {
                config,
                commands,
                commands_open: true,
            },
            sender,
        )
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Connect and run until the user disconnects or reconnection gives up
    pub async fn run<H: ClientHandler>(&mut self, handler: Arc<H>) -> ClientResult<()> {
        let mut attempts = 0;
        loop {
            handler
                .on_event(SessionEvent::Connection(ConnectionEvent::Connecting))
                .await;
            info!("Connecting to {}", self.config.address());

            let (session, result) = match self.connect_once().await {
                Ok(stream) => {
                    attempts = 0;
                    let mut session = Session::new(&self.config)?;
                    let result = self.drive(&mut session, stream, &handler).await;
                    (Some(session), result)
                }
                Err(e) => (None, Err(e)),
            };
            if let Err(e) = &result {
                attempts += 1;
                warn!("Connection lost: {}", e);
            }

            let exhausted = self
                .config
                .max_reconnect_attempts
                .is_some_and(|max| attempts >= max);
            let will_retry = result != Ok(Outcome::Requested)
                && self.config.auto_reconnect
                && !exhausted;
            match session {
                Some(mut session) => deliver(&handler, session.disconnect(will_retry)).await,
                None => {
                    let event = ConnectionEvent::Disconnected { will_retry };
                    handler.on_event(SessionEvent::Connection(event)).await;
                }
            }

            if !will_retry {
                return match result {
                    Ok(_) => Ok(()),
                    Err(_) if self.config.auto_reconnect && exhausted => {
                        error!("Giving up after {} attempts", attempts);
                        Err(ClientError::ReconnectionFailed(attempts))
                    }
                    Err(e) => Err(e),
                };
            }
            if !handler.on_reconnect_attempt(attempts + 1).await {
                info!("Reconnection cancelled by handler");
                return Ok(());
            }
            sleep(self.config.reconnect_delay).await;
        }
    }

    async fn connect_once(&self) -> ClientResult<TcpStream> {
        let address = self.config.address();
        match timeout(self.config.connect_timeout, TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => {
                stream.set_nodelay(true)?;
                info!("Connected to {}", address);
                Ok(stream)
            }
            Ok(Err(e)) => {
                warn!("Failed to connect to {}: {}", address, e);
                Err(e.into())
            }
            Err(_) => {
                warn!("Connection to {} timed out", address);
                Err(ClientError::ConnectionTimeout)
            }
        }
    }

    async fn drive<H: ClientHandler>(
        &mut self,
        session: &mut Session,
        stream: TcpStream,
        handler: &Arc<H>,
    ) -> ClientResult<Outcome> {
        let (mut reader, mut writer) = stream.into_split();
        let mut buffer = vec![0u8; self.config.buffer_size];

        deliver(handler, session.connect()).await;
        let outcome = loop {
            if session.has_outbound() {
                writer.write_all(&session.take_outbound()).await?;
            }
            let deadline = session.next_deadline();
            tokio::select! {
                read = reader.read(&mut buffer) => match read? {
                    0 => break Outcome::Closed,
                    n => deliver(handler, session.on_bytes(&buffer[..n])).await,
                },
                command = self.commands.recv(), if self.commands_open => match command {
                    Some(ClientCommand::Send(line)) => session.send_line(&line),
                    Some(ClientCommand::SendGmcp(message)) => {
                        if !session.send_gmcp(&message) {
                            warn!("GMCP not negotiated, dropping {}", message.package());
                        }
                    }
                    Some(ClientCommand::Resize(cols, rows)) => {
                        deliver(handler, session.resize(cols, rows)).await;
                    }
                    Some(ClientCommand::Disconnect) => break Outcome::Requested,
                    None => self.commands_open = false,
                },
                () = wait_for(deadline) => {
                    deliver(handler, session.poll_timers(Instant::now())).await;
                }
            }
        };

        if outcome == Outcome::Requested {
            if session.has_outbound() {
                writer.write_all(&session.take_outbound()).await?;
            }
            if let Err(e) = writer.shutdown().await {
                debug!("Shutdown after disconnect failed: {}", e);
            }
        }
        Ok(outcome)
    }
}

async fn deliver<H: ClientHandler>(handler: &Arc<H>, events: Vec<SessionEvent>) {
    for event in events {
        handler.on_event(event).await;
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline.into()).await,
        None => futures::future::pending().await,
    }
}
