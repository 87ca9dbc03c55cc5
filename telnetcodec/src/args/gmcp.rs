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

use crate::{TelnetError, TelnetOption, TelnetResult};
use std::fmt;

///
/// GMCP (Generic Mud Communication Protocol) Message
///
/// Each message is a dotted package path optionally followed by a single
/// space and a JSON document.
///
/// ```text
/// Core.Hello {"client": "mudlink", "version": "0.1.0"}
/// Char.Vitals {"hp": 100, "maxhp": 120}
/// Core.Ping
/// ```
///
/// # References
///
/// - [GMCP Protocol Specification](https://tintin.mudhalla.net/protocols/gmcp/)
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmcpMessage {
    package: String,
    data: Option<String>,
}

impl GmcpMessage {
    /// Creates a new GMCP message with a package name and optional data.
    ///
    /// ```
    /// use mudlink_telnetcodec::gmcp::GmcpMessage;
    ///
    /// let msg = GmcpMessage::new("Core.Hello", Some(r#"{"client":"MyClient"}"#));
    /// assert_eq!(msg.package(), "Core.Hello");
    /// ```
    pub fn new<S: Into<String>, D: Into<String>>(package: S, data: Option<D>) -> Self {
        Self {
            package: package.into(),
            data: data.map(Into::into),
        }
    }

    /// Creates a GMCP message without data.
    pub fn command<S: Into<String>>(package: S) -> Self {
        Self {
            package: package.into(),
            data: None,
        }
    }

    /// Parses an unescaped GMCP payload.
    ///
    /// Everything up to the first space is the package; the rest, if any,
    /// is the data.
    pub fn parse(bytes: &[u8]) -> TelnetResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| TelnetError::InvalidUtf8 {
            option: TelnetOption::GMCP,
        })?;
        let text = text.trim_start();
        if text.is_empty() {
            return Err(TelnetError::malformed(TelnetOption::GMCP, "empty package"));
        }
        Ok(match text.split_once(' ') {
            Some((package, data)) => Self {
                package: package.to_string(),
                data: Some(data.trim().to_string()).filter(|d| !d.is_empty()),
            },
            None => Self {
                package: text.to_string(),
                data: None,
            },
        })
    }

    /// Returns the package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the JSON data if present.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Unescaped payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for GmcpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        if let Some(ref data) = self.data {
            write!(f, " {}", data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gmcp_parse_with_data() {
        let msg = GmcpMessage::parse(b"Core.Hello {\"client\":\"Test\"}").unwrap();
        assert_eq!(msg.package(), "Core.Hello");
        assert_eq!(msg.data(), Some(r#"{"client":"Test"}"#));
    }

    #[test]
    fn test_gmcp_parse_without_data() {
        let msg = GmcpMessage::parse(b"Core.Ping").unwrap();
        assert_eq!(msg.package(), "Core.Ping");
        assert_eq!(msg.data(), None);
    }

    #[test]
    fn test_gmcp_parse_trailing_space_has_no_data() {
        let msg = GmcpMessage::parse(b"Core.Goodbye ").unwrap();
        assert_eq!(msg.data(), None);
    }

    #[test]
    fn test_gmcp_parse_rejects_empty_and_invalid() {
        assert!(GmcpMessage::parse(b"").is_err());
        assert!(GmcpMessage::parse(&[0xC3]).is_err());
    }

    #[test]
    fn test_gmcp_to_bytes() {
        let msg = GmcpMessage::new("Char.Vitals", Some(r#"{"hp":100}"#));
        assert_eq!(msg.to_bytes(), br#"Char.Vitals {"hp":100}"#.to_vec());
        assert_eq!(GmcpMessage::command("Core.Ping").to_bytes(), b"Core.Ping".to_vec());
    }
}
