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

use crate::session::Host;
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::ttype::TerminalType;
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply};
use tracing::{debug, warn};

const FALLBACK_TYPE: &str = "UNKNOWN";

/// Answers `SEND` with the next configured terminal type. Once the list is
/// exhausted the last name repeats, which tells the server the cycle ended.
pub(crate) struct TtypeHandler {
    types: Vec<String>,
    next: usize,
}

impl TtypeHandler {
    pub(crate) fn new(types: Vec<String>) -> Self {
        Self { types, next: 0 }
    }

    fn advance(&mut self) -> &str {
        let Some(last) = self.types.len().checked_sub(1) else {
            return FALLBACK_TYPE;
        };
        let index = self.next.min(last);
        self.next = index + 1;
        &self.types[index]
    }
}

impl OptionCallbacks<Host> for TtypeHandler {
    fn on_do(&mut self, _host: &mut Host) -> Reply {
        self.next = 0;
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        match TerminalType::parse(payload) {
            Ok(TerminalType::Send) => {
                let name = self.advance().to_string();
                debug!("Sending terminal type {}", name);
                host.subnegotiate(option::TTYPE, &TerminalType::Is(name).to_bytes());
                Handled::Yes
            }
            Ok(TerminalType::Is(_)) => Handled::No,
            Err(error) => {
                warn!("Ignoring TTYPE payload: {}", error);
                Handled::No
            }
        }
    }

    fn on_disconnect(&mut self, _host: &mut Host) {
        self.next = 0;
    }
}
