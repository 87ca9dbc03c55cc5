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

//! Client configuration

use mudlink_telnetcodec::DEFAULT_MAX_SUBNEGOTIATION_LEN;
use mudlink_terminal::ScrollbackConfig;
use std::time::Duration;

/// MUD client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Reconnect after the connection drops
    pub auto_reconnect: bool,

    /// Delay before reconnection attempt
    pub reconnect_delay: Duration,

    /// Maximum number of consecutive failed attempts (None for unlimited)
    pub max_reconnect_attempts: Option<usize>,

    /// Buffer size for incoming data
    pub buffer_size: usize,

    /// Names reported through TTYPE, in order. The last one repeats.
    pub terminal_types: Vec<String>,

    /// Terminal width in columns
    pub terminal_width: u16,

    /// Terminal height in rows
    pub terminal_height: u16,

    /// Encodings offered in CHARSET negotiation, most preferred first
    pub encoding_preferences: Vec<String>,

    /// Encoding used until the server negotiates another
    pub default_encoding: String,

    /// Viewports of history kept in the scrollback
    pub scrollback_screens: usize,

    /// Lines the scrollback never trims below
    pub scrollback_min_lines: usize,

    /// Client name sent in `Core.Hello`
    pub gmcp_client_name: String,

    /// Client version sent in `Core.Hello`
    pub gmcp_client_version: String,

    /// Packages announced with `Core.Supports.Set`, e.g. `Char 1`
    pub gmcp_supports: Vec<String>,

    /// Interval between `Core.Ping` keep-alives (None to disable)
    pub gmcp_ping_interval: Option<Duration>,

    /// Largest subnegotiation payload accepted before resynchronizing
    pub max_subnegotiation_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4000,
            connect_timeout: Duration::from_secs(10),
            auto_reconnect: false,
            reconnect_delay: Duration::from_secs(5),
            max_reconnect_attempts: Some(3),
            buffer_size: 8192,
            terminal_types: vec!["MUDLINK".to_string(), "XTERM-256COLOR".to_string()],
            terminal_width: 80,
            terminal_height: 24,
            encoding_preferences: vec!["UTF-8".to_string(), "ISO-8859-1".to_string()],
            default_encoding: "UTF-8".to_string(),
            scrollback_screens: 40,
            scrollback_min_lines: 500,
            gmcp_client_name: env!("CARGO_PKG_NAME").to_string(),
            gmcp_client_version: env!("CARGO_PKG_VERSION").to_string(),
            gmcp_supports: vec![
                "Core 1".to_string(),
                "Char 1".to_string(),
                "Room 1".to_string(),
            ],
            gmcp_ping_interval: Some(Duration::from_secs(60)),
            max_subnegotiation_len: DEFAULT_MAX_SUBNEGOTIATION_LEN,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable automatic reconnection
    pub fn with_auto_reconnect(mut self, enabled: bool) -> Self {
        self.auto_reconnect = enabled;
        self
    }

    /// Set the reconnection delay
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set the maximum reconnection attempts
    pub fn with_max_reconnect_attempts(mut self, max: Option<usize>) -> Self {
        self.max_reconnect_attempts = max;
        self
    }

    /// Set the read buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Set the TTYPE cycle
    pub fn with_terminal_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminal_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial terminal size
    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set the encoding preferences and the starting encoding
    pub fn with_encodings<I, S>(mut self, preferences: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encoding_preferences = preferences.into_iter().map(Into::into).collect();
        self.default_encoding = default.into();
        self
    }

    /// Set the scrollback retention
    pub fn with_scrollback(mut self, screens: usize, min_lines: usize) -> Self {
        self.scrollback_screens = screens;
        self.scrollback_min_lines = min_lines;
        self
    }

    /// Set the name and version sent in `Core.Hello`
    pub fn with_gmcp_client(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.gmcp_client_name = name.into();
        self.gmcp_client_version = version.into();
        self
    }

    /// Set the packages announced with `Core.Supports.Set`
    pub fn with_gmcp_supports<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gmcp_supports = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the GMCP keep-alive interval
    pub fn with_gmcp_ping_interval(mut self, interval: Option<Duration>) -> Self {
        self.gmcp_ping_interval = interval;
        self
    }

    /// Set the subnegotiation size limit
    pub fn with_max_subnegotiation_len(mut self, max: usize) -> Self {
        self.max_subnegotiation_len = max;
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Scrollback policy for the configured viewport
    pub fn scrollback_config(&self) -> ScrollbackConfig {
        ScrollbackConfig {
            viewport_rows: usize::from(self.terminal_height),
            screens: self.scrollback_screens,
            min_lines: self.scrollback_min_lines,
        }
    }
}
