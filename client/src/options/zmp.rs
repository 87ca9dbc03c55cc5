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
use crate::session::Host;
use chrono::Utc;
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::zmp::ZmpCommand;
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply};
use tracing::{debug, warn};

/// `zmp.time` reply layout, always UTC.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Commands answered here. Anything else is passed up.
const SUPPORTED: &[&str] = &["zmp.ping", "zmp.check"];

pub(crate) struct ZmpHandler;

impl ZmpHandler {
    fn supports(name: &str) -> bool {
        match name.strip_suffix('.') {
            Some(package) => package == "zmp",
            None => SUPPORTED.contains(&name),
        }
    }

    fn reply(host: &mut Host, command: &ZmpCommand) {
        host.subnegotiate(option::ZMP, &command.to_bytes());
    }
}

impl OptionCallbacks<Host> for ZmpHandler {
    fn on_will(&mut self, _host: &mut Host) -> Reply {
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        let command = match ZmpCommand::parse(payload) {
            Ok(command) => command,
            Err(error) => {
                warn!("Ignoring ZMP payload: {}", error);
                return Handled::No;
            }
        };
        match command.name.as_str() {
            "zmp.ping" => {
                let now = Utc::now().format(TIME_FORMAT).to_string();
                Self::reply(host, &ZmpCommand::new("zmp.time", vec![now]));
            }
            "zmp.check" => {
                let subject = command.args.first().cloned().unwrap_or_default();
                let answer = if Self::supports(&subject) {
                    "zmp.support"
                } else {
                    "zmp.no-support"
                };
                debug!("{} {}", answer, subject);
                Self::reply(host, &ZmpCommand::new(answer, vec![subject]));
            }
            _ => host.emit(SessionEvent::Zmp(command)),
        }
        Handled::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports() {
        assert!(ZmpHandler::supports("zmp."));
        assert!(ZmpHandler::supports("zmp.ping"));
        assert!(!ZmpHandler::supports("color."));
        assert!(!ZmpHandler::supports("zmp.input"));
    }
}
