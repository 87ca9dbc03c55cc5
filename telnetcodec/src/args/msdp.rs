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

//! Mud Server Data Protocol
//!
//! <https://tintin.mudhalla.net/protocols/msdp/>
//!
//! A payload is a list of `VAR <name> VAL <value>` pairs. A value is a
//! string, an array (`ARRAY_OPEN { VAL <value> } ARRAY_CLOSE`) or a table
//! (`TABLE_OPEN { VAR <name> VAL <value> } TABLE_CLOSE`). A bare `VAR` with
//! several `VAL`s is the legacy array form and is read as an array.

use crate::consts::msdp;
use crate::{TelnetError, TelnetOption, TelnetResult};
use std::fmt;

const MAX_DEPTH: usize = 32;

/// One MSDP value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MsdpValue {
    /// Plain string value.
    String(String),
    /// Ordered list of values.
    Array(Vec<MsdpValue>),
    /// Ordered list of named values.
    Table(Vec<(String, MsdpValue)>),
}

impl MsdpValue {
    /// Shorthand for a string value.
    pub fn string(value: impl Into<String>) -> Self {
        MsdpValue::String(value.into())
    }

    /// String content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MsdpValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Look up a table entry by name.
    pub fn get(&self, key: &str) -> Option<&MsdpValue> {
        match self {
            MsdpValue::Table(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        match self {
            MsdpValue::String(value) => out.extend_from_slice(value.as_bytes()),
            MsdpValue::Array(values) => {
                out.push(msdp::ARRAY_OPEN);
                for value in values {
                    out.push(msdp::VAL);
                    value.write(out);
                }
                out.push(msdp::ARRAY_CLOSE);
            }
            MsdpValue::Table(entries) => {
                out.push(msdp::TABLE_OPEN);
                write_pairs(entries, out);
                out.push(msdp::TABLE_CLOSE);
            }
        }
    }
}

impl fmt::Display for MsdpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsdpValue::String(value) => write!(f, "{value:?}"),
            MsdpValue::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            MsdpValue::Table(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Parse an unescaped MSDP payload into its top-level variables.
pub fn parse(payload: &[u8]) -> TelnetResult<Vec<(String, MsdpValue)>> {
    let mut reader = Reader { bytes: payload, pos: 0 };
    let pairs = reader.pairs(0)?;
    if reader.pos < payload.len() {
        return Err(malformed(format!(
            "unexpected byte {:#X} at offset {}",
            payload[reader.pos], reader.pos
        )));
    }
    Ok(pairs)
}

/// Encode variables as an unescaped MSDP payload.
pub fn encode(pairs: &[(String, MsdpValue)]) -> Vec<u8> {
    let mut out = Vec::new();
    write_pairs(pairs, &mut out);
    out
}

/// Payload for a client command such as `REPORT` or `LIST`.
pub fn command(name: &str, arguments: &[&str]) -> Vec<u8> {
    let value = match arguments {
        [single] => MsdpValue::string(*single),
        many => MsdpValue::Array(many.iter().map(|a| MsdpValue::string(*a)).collect()),
    };
    encode(&[(name.to_string(), value)])
}

fn write_pairs(pairs: &[(String, MsdpValue)], out: &mut Vec<u8>) {
    for (name, value) in pairs {
        out.push(msdp::VAR);
        out.extend_from_slice(name.as_bytes());
        out.push(msdp::VAL);
        value.write(out);
    }
}

fn malformed(reason: String) -> TelnetError {
    TelnetError::malformed(TelnetOption::MSDP, reason)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, marker: u8) -> TelnetResult<()> {
        match self.peek() {
            Some(byte) if byte == marker => {
                self.pos += 1;
                Ok(())
            }
            other => Err(malformed(format!(
                "expected {marker:#X}, found {other:?} at offset {}",
                self.pos
            ))),
        }
    }

    fn string(&mut self) -> TelnetResult<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !(msdp::VAR..=msdp::ARRAY_CLOSE).contains(&b))
        {
            self.pos += 1;
        }
        String::from_utf8(self.bytes[start..self.pos].to_vec()).map_err(|_| {
            TelnetError::InvalidUtf8 {
                option: TelnetOption::MSDP,
            }
        })
    }

    fn pairs(&mut self, depth: usize) -> TelnetResult<Vec<(String, MsdpValue)>> {
        let mut pairs = Vec::new();
        while self.peek() == Some(msdp::VAR) {
            self.pos += 1;
            let name = self.string()?;
            self.expect(msdp::VAL)?;
            let mut value = self.value(depth)?;
            if self.peek() == Some(msdp::VAL) {
                let mut values = vec![value];
                while self.peek() == Some(msdp::VAL) {
                    self.pos += 1;
                    values.push(self.value(depth)?);
                }
                value = MsdpValue::Array(values);
            }
            pairs.push((name, value));
        }
        Ok(pairs)
    }

    fn value(&mut self, depth: usize) -> TelnetResult<MsdpValue> {
        if depth >= MAX_DEPTH {
            return Err(malformed("nesting too deep".to_string()));
        }
        match self.peek() {
            Some(msdp::TABLE_OPEN) => {
                self.pos += 1;
                let entries = self.pairs(depth + 1)?;
                self.expect(msdp::TABLE_CLOSE)?;
                Ok(MsdpValue::Table(entries))
            }
            Some(msdp::ARRAY_OPEN) => {
                self.pos += 1;
                let mut values = Vec::new();
                while self.peek() == Some(msdp::VAL) {
                    self.pos += 1;
                    values.push(self.value(depth + 1)?);
                }
                self.expect(msdp::ARRAY_CLOSE)?;
                Ok(MsdpValue::Array(values))
            }
            _ => self.string().map(MsdpValue::String),
        }
    }
}
