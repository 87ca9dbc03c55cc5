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
use mudlink_telnetcodec::msdp;
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply};
use tracing::warn;

pub(crate) struct MsdpHandler;

impl OptionCallbacks<Host> for MsdpHandler {
    fn on_will(&mut self, _host: &mut Host) -> Reply {
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        match msdp::parse(payload) {
            Ok(variables) => {
                host.emit(SessionEvent::Msdp(variables));
                Handled::Yes
            }
            Err(error) => {
                warn!("Ignoring MSDP payload: {}", error);
                Handled::No
            }
        }
    }
}
