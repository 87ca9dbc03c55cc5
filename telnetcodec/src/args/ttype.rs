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

//! Terminal Type ([RFC 1091](https://tools.ietf.org/html/rfc1091))

use crate::consts::ttype;
use crate::{TelnetError, TelnetOption, TelnetResult};

/// A decoded TTYPE subnegotiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalType {
    /// The server asks for the next terminal type.
    Send,
    /// A terminal type name.
    Is(String),
}

impl TerminalType {
    /// Parse an unescaped TTYPE payload.
    pub fn parse(payload: &[u8]) -> TelnetResult<TerminalType> {
        match payload.split_first() {
            Some((&ttype::SEND, _)) => Ok(TerminalType::Send),
            Some((&ttype::IS, name)) => String::from_utf8(name.to_vec())
                .map(TerminalType::Is)
                .map_err(|_| TelnetError::InvalidUtf8 {
                    option: TelnetOption::TTYPE,
                }),
            Some((&other, _)) => Err(TelnetError::malformed(
                TelnetOption::TTYPE,
                format!("unknown TTYPE code {other}"),
            )),
            None => Err(TelnetError::InsufficientData {
                option: TelnetOption::TTYPE,
                required: 1,
                available: 0,
            }),
        }
    }

    /// Unescaped payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            TerminalType::Send => vec![ttype::SEND],
            TerminalType::Is(name) => {
                let mut out = vec![ttype::IS];
                out.extend_from_slice(name.as_bytes());
                out
            }
        }
    }
}
