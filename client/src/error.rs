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

//! Client error types

use mudlink_charset::CharsetError;
use mudlink_terminal::TerminalError;
use std::io;

/// Client result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Connection timeout
    #[error("Connection timeout")]
    ConnectionTimeout,

    /// Connection closed by server
    #[error("Connection closed by server")]
    ConnectionClosed,

    /// Connection refused
    #[error("Connection refused")]
    ConnectionRefused,

    /// Reconnection failed
    #[error("Reconnection failed after {0} attempts")]
    ReconnectionFailed(usize),

    /// Encoding configuration rejected
    #[error("Encoding error: {0}")]
    Charset(#[from] CharsetError),

    /// Scrollback configuration rejected
    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut => Self::ConnectionTimeout,
            io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Self::ConnectionClosed,
            _ => Self::Io(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "nope");
        assert_eq!(ClientError::from(refused), ClientError::ConnectionRefused);
        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        assert_eq!(ClientError::from(reset), ClientError::ConnectionClosed);
        let other = io::Error::other("disk on fire");
        assert_eq!(
            ClientError::from(other).to_string(),
            "I/O error: disk on fire"
        );
    }

    #[test]
    fn test_charset_error_wraps() {
        let error: ClientError = CharsetError::UnknownEncoding("x".into()).into();
        assert_eq!(error.to_string(), "Encoding error: unknown encoding 'x'");
    }
}
