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

//! CHARSET subnegotiation ([RFC 2066](https://tools.ietf.org/html/rfc2066))
//!
//! ```text
//! IAC SB CHARSET REQUEST [ "[TTABLE]" <version> ] <sep> <name> { <sep> <name> } IAC SE
//! IAC SB CHARSET ACCEPTED <name> IAC SE
//! IAC SB CHARSET REJECTED IAC SE
//! ```

use crate::consts::charset;
use crate::{TelnetError, TelnetOption, TelnetResult};

const TTABLE_MARKER: &[u8] = b"[TTABLE]";

/// Separator used for requests we send.
pub const DEFAULT_SEPARATOR: u8 = b';';

/// A decoded CHARSET subnegotiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharsetMessage {
    /// Offer of character sets, in the sender's order of preference.
    Request(Vec<String>),
    /// The receiver picked this character set.
    Accepted(String),
    /// None of the offered character sets is acceptable.
    Rejected,
    /// The receiver cannot handle a translation table.
    TTableRejected,
}

impl CharsetMessage {
    /// Parse an unescaped CHARSET payload.
    pub fn parse(payload: &[u8]) -> TelnetResult<CharsetMessage> {
        let Some((&code, rest)) = payload.split_first() else {
            return Err(TelnetError::InsufficientData {
                option: TelnetOption::Charset,
                required: 1,
                available: 0,
            });
        };
        match code {
            charset::REQUEST => {
                let rest = match rest.strip_prefix(TTABLE_MARKER) {
                    // Skip the translation-table version byte.
                    Some(after) => after.get(1..).unwrap_or_default(),
                    None => rest,
                };
                let Some((&separator, names)) = rest.split_first() else {
                    return Ok(CharsetMessage::Request(Vec::new()));
                };
                names
                    .split(|&b| b == separator)
                    .filter(|name| !name.is_empty())
                    .map(to_string)
                    .collect::<TelnetResult<Vec<_>>>()
                    .map(CharsetMessage::Request)
            }
            charset::ACCEPTED => Ok(CharsetMessage::Accepted(to_string(rest)?)),
            charset::REJECTED => Ok(CharsetMessage::Rejected),
            charset::TTABLE_REJECTED => Ok(CharsetMessage::TTableRejected),
            other => Err(TelnetError::malformed(
                TelnetOption::Charset,
                format!("unsupported CHARSET code {other}"),
            )),
        }
    }

    /// Unescaped payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CharsetMessage::Request(names) => {
                let mut out = vec![charset::REQUEST];
                for name in names {
                    out.push(DEFAULT_SEPARATOR);
                    out.extend_from_slice(name.as_bytes());
                }
                out
            }
            CharsetMessage::Accepted(name) => {
                let mut out = vec![charset::ACCEPTED];
                out.extend_from_slice(name.as_bytes());
                out
            }
            CharsetMessage::Rejected => vec![charset::REJECTED],
            CharsetMessage::TTableRejected => vec![charset::TTABLE_REJECTED],
        }
    }
}

fn to_string(bytes: &[u8]) -> TelnetResult<String> {
    std::str::from_utf8(bytes)
        .map(|s| s.trim().to_string())
        .map_err(|_| TelnetError::InvalidUtf8 {
            option: TelnetOption::Charset,
        })
}
