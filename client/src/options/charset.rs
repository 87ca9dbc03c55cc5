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

use crate::SessionEvent;
use crate::format::{self, format_template};
use crate::session::Host;
use mudlink_telnetcodec::charset::CharsetMessage;
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply, TelnetCommand};
use tracing::{debug, info, warn};

/// CHARSET negotiation against the session's encoding codec.
pub(crate) struct CharsetHandler;

impl CharsetHandler {
    fn switch(host: &mut Host, name: &str) {
        match host.codec.set_encoding(name) {
            Ok(proper) => {
                let proper = proper.to_string();
                info!("Encoding switched to {}", proper);
                host.emit(SessionEvent::EncodingChanged(proper));
            }
            Err(error) => {
                warn!("Cannot switch encoding: {}", error);
                host.emit(SessionEvent::Error(format_template(
                    format::ENCODING_ERROR,
                    &[name],
                    &[],
                )));
            }
        }
    }
}

impl OptionCallbacks<Host> for CharsetHandler {
    fn on_do(&mut self, host: &mut Host) -> Reply {
        host.negotiate(TelnetCommand::Will, option::CHARSET);
        let request = CharsetMessage::Request(host.codec.offer());
        host.subnegotiate(option::CHARSET, &request.to_bytes());
        Reply::Suppress
    }

    fn on_will(&mut self, _host: &mut Host) -> Reply {
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        match CharsetMessage::parse(payload) {
            Ok(CharsetMessage::Request(names)) => {
                let offered: Vec<&str> = names.iter().map(String::as_str).collect();
                match host.codec.negotiate(&offered) {
                    Some(name) => {
                        debug!("Accepting charset {} from {:?}", name, offered);
                        let reply = CharsetMessage::Accepted(name.to_string());
                        host.subnegotiate(option::CHARSET, &reply.to_bytes());
                        Self::switch(host, name);
                    }
                    None => {
                        debug!("Rejecting charsets {:?}", offered);
                        host.subnegotiate(option::CHARSET, &CharsetMessage::Rejected.to_bytes());
                    }
                }
                Handled::Yes
            }
            Ok(CharsetMessage::Accepted(name)) => {
                Self::switch(host, &name);
                Handled::Yes
            }
            Ok(CharsetMessage::Rejected | CharsetMessage::TTableRejected) => {
                debug!("Server rejected our charset request");
                Handled::Yes
            }
            Err(error) => {
                warn!("Ignoring CHARSET payload: {}", error);
                Handled::No
            }
        }
    }
}
