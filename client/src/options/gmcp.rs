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

use crate::gmcp::{GmcpRoute, GmcpRouter};
use crate::session::Host;
use crate::{ClientConfig, SessionEvent};
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply, TelnetCommand};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

const PING: &str = "Core.Ping";

///
/// GMCP handshake, routing and keep-alive.
///
/// When the server offers GMCP we answer `DO`, introduce ourselves with
/// `Core.Hello` and announce our packages. The keep-alive sends
/// `Core.Ping` every interval while the option is on; the server's echo
/// gives the round-trip time.
///
pub(crate) struct GmcpHandler {
    router: GmcpRouter,
    client_name: String,
    client_version: String,
    supports: Vec<String>,
    ping_interval: Option<Duration>,
    next_ping: Option<Instant>,
    ping_sent: Option<Instant>,
}

impl GmcpHandler {
    pub(crate) fn new(config: &ClientConfig, router: GmcpRouter) -> Self {
        Self {
            router,
            client_name: config.gmcp_client_name.clone(),
            client_version: config.gmcp_client_version.clone(),
            supports: config.gmcp_supports.clone(),
            ping_interval: config.gmcp_ping_interval.filter(|interval| !interval.is_zero()),
            next_ping: None,
            ping_sent: None,
        }
    }

    fn cancel(&mut self) {
        self.next_ping = None;
        self.ping_sent = None;
    }
}

impl OptionCallbacks<Host> for GmcpHandler {
    fn on_will(&mut self, host: &mut Host) -> Reply {
        host.negotiate(TelnetCommand::Do, option::GMCP);
        let hello = json!({ "client": self.client_name, "version": self.client_version });
        host.send_gmcp(&GmcpMessage::new("Core.Hello", Some(hello.to_string())));
        if !self.supports.is_empty() {
            let supports = json!(self.supports);
            host.send_gmcp(&GmcpMessage::new("Core.Supports.Set", Some(supports.to_string())));
        }
        self.next_ping = self.ping_interval.map(|interval| Instant::now() + interval);
        Reply::Suppress
    }

    fn on_wont(&mut self, _host: &mut Host) -> Reply {
        self.cancel();
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        let message = match GmcpMessage::parse(payload) {
            Ok(message) => message,
            Err(error) => {
                warn!("Ignoring GMCP payload: {}", error);
                return Handled::No;
            }
        };
        trace!("GMCP {}", message);
        if message.package().eq_ignore_ascii_case(PING) {
            if let Some(sent) = self.ping_sent.take() {
                let rtt = Instant::now().saturating_duration_since(sent);
                debug!("GMCP round trip {:?}", rtt);
                host.round_trip = Some(rtt);
            }
            return Handled::Yes;
        }
        match self.router.route(message) {
            GmcpRoute::Handled(Some(event)) => host.emit(event),
            GmcpRoute::Handled(None) => {}
            GmcpRoute::Unknown(message) => host.emit(SessionEvent::Gmcp(message)),
        }
        Handled::Yes
    }

    fn on_disconnect(&mut self, _host: &mut Host) {
        self.cancel();
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.next_ping
    }

    fn on_timer(&mut self, host: &mut Host, now: Instant) {
        trace!("GMCP keep-alive");
        host.send_gmcp(&GmcpMessage::command(PING));
        self.ping_sent = Some(now);
        self.next_ping = self.ping_interval.map(|interval| now + interval);
    }
}
