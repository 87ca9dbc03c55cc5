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

use crate::session::{Host, ViewportProvider};
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::naws::WindowSize;
use mudlink_telnetcodec::{OptionCallbacks, Reply, TelnetCommand};
use tracing::debug;

/// Window size reporting. We only offer NAWS when asked.
pub(crate) struct NawsHandler;

impl OptionCallbacks<Host> for NawsHandler {
    fn on_do(&mut self, host: &mut Host) -> Reply {
        // WILL has to precede the first report.
        host.negotiate(TelnetCommand::Will, option::NAWS);
        report_window_size(host);
        Reply::Suppress
    }
}

/// Send the host's current viewport as `IAC SB NAWS w16 h16 IAC SE`.
pub(crate) fn report_window_size(host: &mut Host) {
    let (cols, rows) = host.viewport_size();
    let size = WindowSize::new(cols, rows);
    debug!("Reporting window size {}", size);
    host.subnegotiate(option::NAWS, &size.to_bytes());
}
