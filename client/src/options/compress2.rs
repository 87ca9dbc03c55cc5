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
use mudlink_telnetcodec::{Handled, OptionCallbacks, Reply};
use tracing::debug;

/// MCCP2. `IAC SB COMPRESS2 IAC SE` is the last plain sequence; everything
/// after it is zlib data until the stream ends.
#[derive(Default)]
pub(crate) struct Compress2Handler {
    remote_enabled: bool,
}

impl OptionCallbacks<Host> for Compress2Handler {
    fn on_will(&mut self, _host: &mut Host) -> Reply {
        self.remote_enabled = true;
        Reply::Accept
    }

    fn on_wont(&mut self, host: &mut Host) -> Reply {
        self.remote_enabled = false;
        host.compression.disable();
        Reply::Accept
    }

    fn on_dont(&mut self, host: &mut Host) -> Reply {
        host.compression.disable();
        Reply::Accept
    }

    fn on_subnegotiation(&mut self, host: &mut Host, payload: &[u8]) -> Handled {
        if !payload.is_empty() {
            return Handled::No;
        }
        if !self.remote_enabled {
            debug!("Ignoring compression start, COMPRESS2 was never negotiated");
            return Handled::Yes;
        }
        debug!("Compression starting");
        host.compression.enable();
        Handled::Yes
    }

    fn on_disconnect(&mut self, host: &mut Host) {
        self.remote_enabled = false;
        host.compression.disable();
    }
}
