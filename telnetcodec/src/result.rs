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

use crate::TelnetOption;

/// Result type for Telnet codec operations.
pub type TelnetResult<T> = Result<T, TelnetError>;

/// Errors raised while encoding or decoding Telnet payloads.
///
/// Framing itself never fails: garbage is skipped and partial frames are
/// buffered. These errors come from option payloads that a handler tried to
/// interpret, and from the transport when the codec is driven through
/// `tokio_util`.
#[derive(Debug, thiserror::Error)]
pub enum TelnetError {
    /// Underlying I/O failure while driving the codec.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A subnegotiation payload was shorter than its format requires.
    #[error("{option} payload too short: needed {required} bytes, got {available}")]
    InsufficientData {
        /// Option the payload belongs to.
        option: TelnetOption,
        /// Bytes the format requires.
        required: usize,
        /// Bytes that were present.
        available: usize,
    },

    /// A subnegotiation payload did not follow its option's grammar.
    #[error("{option} payload malformed: {reason}")]
    MalformedPayload {
        /// Option the payload belongs to.
        option: TelnetOption,
        /// What was wrong with it.
        reason: String,
    },

    /// A subnegotiation payload carried text that was not valid UTF-8.
    #[error("{option} payload is not valid UTF-8")]
    InvalidUtf8 {
        /// Option the payload belongs to.
        option: TelnetOption,
    },
}

impl TelnetError {
    /// Shorthand for [`TelnetError::MalformedPayload`].
    pub fn malformed(option: TelnetOption, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            option,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = TelnetError::InsufficientData {
            option: TelnetOption::NAWS,
            required: 4,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "NAWS payload too short: needed 4 bytes, got 2"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: TelnetError = io.into();
        assert!(matches!(err, TelnetError::Io(_)));
    }
}
