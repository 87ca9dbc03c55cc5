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

use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_telnetcodec::msdp::MsdpValue;
use mudlink_telnetcodec::zmp::ZmpCommand;
use mudlink_terminal::DisplayEvent;

/// Connection lifecycle as seen by the user interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A TCP connect is in flight.
    Connecting,
    /// The transport is up and negotiation may begin.
    Connected,
    /// The transport is gone.
    Disconnected {
        /// A reconnect attempt is scheduled.
        will_retry: bool,
    },
}

/// Everything a session reports upward, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Terminal output.
    Output(Vec<DisplayEvent>),
    /// Connection lifecycle change.
    Connection(ConnectionEvent),
    /// GMCP message no registered route consumed.
    Gmcp(GmcpMessage),
    /// MSDP variables.
    Msdp(Vec<(String, MsdpValue)>),
    /// ZMP command outside the `zmp.` package.
    Zmp(ZmpCommand),
    /// Server took over (`true`) or released (`false`) echoing.
    EchoChanged(bool),
    /// The inbound and outbound encoding changed to this proper name.
    EncodingChanged(String),
    /// Recoverable protocol error, already formatted for display.
    Error(String),
}

impl ConnectionEvent {
    /// Human readable status line for this event.
    pub fn status_line(&self, config: &crate::ClientConfig) -> String {
        use crate::format::{self, format_template};
        let port = config.port.to_string();
        let delay = config.reconnect_delay.as_secs().to_string();
        let named = [
            ("host", config.host.as_str()),
            ("port", port.as_str()),
            ("delay", delay.as_str()),
        ];
        let template = match self {
            ConnectionEvent::Connecting => format::CONNECTING,
            ConnectionEvent::Connected => format::CONNECTED,
            ConnectionEvent::Disconnected { will_retry: false } => format::DISCONNECTED,
            ConnectionEvent::Disconnected { will_retry: true } => format::RECONNECTING,
        };
        format_template(template, &[], &named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use std::time::Duration;

    #[test]
    fn test_status_lines() {
        let config =
            ClientConfig::new("mud.org", 4000).with_reconnect_delay(Duration::from_secs(3));
        assert_eq!(
            ConnectionEvent::Connected.status_line(&config),
            "Connected to mud.org:4000."
        );
        assert_eq!(
            ConnectionEvent::Disconnected { will_retry: true }.status_line(&config),
            "Disconnected from mud.org:4000. Reconnecting in 3s..."
        );
    }
}
