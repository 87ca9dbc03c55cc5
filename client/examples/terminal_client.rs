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

//! Terminal Client Example
//!
//! Connects to a MUD, prints its output and forwards stdin lines.
//!
//! ```text
//! cargo run -p mudlink-client --example terminal_client -- aardmud.org 4000
//! ```

use async_trait::async_trait;
use mudlink_client::{
    ClientCommand, ClientConfig, ClientHandler, ConnectionEvent, TerminalClient,
};
use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_terminal::DisplayEvent;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info, warn};

struct Printer {
    config: ClientConfig,
}

#[async_trait]
impl ClientHandler for Printer {
    async fn on_output(&self, display: &[DisplayEvent]) {
        let mut stdout = std::io::stdout().lock();
        for event in display {
            let _ = match event {
                DisplayEvent::Run(run) => write!(stdout, "{}", run.text),
                DisplayEvent::LineBreak => writeln!(stdout),
                DisplayEvent::Bell => write!(stdout, "\x07"),
                DisplayEvent::Clear => write!(stdout, "\x1b[2J\x1b[H"),
                DisplayEvent::EraseLine | DisplayEvent::Evict(_) => Ok(()),
            };
        }
        let _ = stdout.flush();
    }

    async fn on_connection(&self, event: ConnectionEvent) {
        info!("{}", event.status_line(&self.config));
    }

    async fn on_gmcp(&self, message: &GmcpMessage) {
        info!("GMCP {}", message);
    }

    async fn on_echo_changed(&self, remote_echo: bool) {
        info!("Remote echo {}", if remote_echo { "on" } else { "off" });
    }

    async fn on_encoding_changed(&self, encoding: &str) {
        info!("Encoding is now {}", encoding);
    }

    async fn on_error(&self, message: &str) {
        warn!("{}", message);
    }

    async fn on_reconnect_attempt(&self, attempt: usize) -> bool {
        info!("Reconnection attempt #{}", attempt);
        true
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port = args.next().map_or(Ok(4000), |port| port.parse())?;

    let config = ClientConfig::new(host, port)
        .with_auto_reconnect(true)
        .with_reconnect_delay(Duration::from_secs(3))
        .with_max_reconnect_attempts(Some(5));
    let (mut client, commands) = TerminalClient::new(config.clone());

    // Stdin is blocking, so read it on its own thread. /quit disconnects.
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let command = if line == "/quit" {
                ClientCommand::Disconnect
            } else {
                ClientCommand::Send(line)
            };
            if commands.blocking_send(command).is_err() {
                break;
            }
        }
    });

    client.run(Arc::new(Printer { config })).await?;
    Ok(())
}
