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

//! Event handler trait for the async client

use crate::{ConnectionEvent, SessionEvent};
use async_trait::async_trait;
use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_telnetcodec::msdp::MsdpValue;
use mudlink_telnetcodec::zmp::ZmpCommand;
use mudlink_terminal::DisplayEvent;

/// Handler for client events
///
/// Implement this trait to receive session events. Every method has a
/// no-op default. [`ClientHandler::on_event`] fans events out to the
/// specific methods; override it to see the raw stream instead.
#[async_trait]
pub trait ClientHandler: Send + Sync + 'static {
    /// Called for every event, in arrival order
    async fn on_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Output(display) => self.on_output(&display).await,
            SessionEvent::Connection(connection) => self.on_connection(connection).await,
            SessionEvent::Gmcp(message) => self.on_gmcp(&message).await,
            SessionEvent::Msdp(variables) => self.on_msdp(&variables).await,
            SessionEvent::Zmp(command) => self.on_zmp(&command).await,
            SessionEvent::EchoChanged(remote) => self.on_echo_changed(remote).await,
            SessionEvent::EncodingChanged(name) => self.on_encoding_changed(&name).await,
            SessionEvent::Error(message) => self.on_error(&message).await,
        }
    }

    /// Called when terminal output is ready
    async fn on_output(&self, _display: &[DisplayEvent]) {}

    /// Called when the connection state changes
    async fn on_connection(&self, _event: ConnectionEvent) {}

    /// Called for GMCP messages no route consumed
    async fn on_gmcp(&self, _message: &GmcpMessage) {}

    /// Called when MSDP variables arrive
    async fn on_msdp(&self, _variables: &[(String, MsdpValue)]) {}

    /// Called for ZMP commands the client does not answer itself
    async fn on_zmp(&self, _command: &ZmpCommand) {}

    /// Called when the server starts or stops echoing input
    async fn on_echo_changed(&self, _remote_echo: bool) {}

    /// Called after CHARSET negotiation switched encodings
    async fn on_encoding_changed(&self, _encoding: &str) {}

    /// Called for recoverable protocol errors
    async fn on_error(&self, _message: &str) {}

    /// Called before a reconnection attempt. Return `false` to give up.
    async fn on_reconnect_attempt(&self, _attempt: usize) -> bool {
        true
    }
}
