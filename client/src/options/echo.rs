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
use mudlink_telnetcodec::{OptionCallbacks, Reply};

/// Remote echo, used by servers to hide password entry.
#[derive(Default)]
pub(crate) struct EchoHandler {
    remote: bool,
}

impl EchoHandler {
    fn set(&mut self, host: &mut Host, remote: bool) {
        if self.remote != remote {
            self.remote = remote;
            host.emit(SessionEvent::EchoChanged(remote));
        }
    }
}

impl OptionCallbacks<Host> for EchoHandler {
    fn on_will(&mut self, host: &mut Host) -> Reply {
        self.set(host, true);
        Reply::Accept
    }

    fn on_wont(&mut self, host: &mut Host) -> Reply {
        self.set(host, false);
        Reply::Accept
    }

    fn on_disconnect(&mut self, host: &mut Host) {
        self.set(host, false);
    }
}
