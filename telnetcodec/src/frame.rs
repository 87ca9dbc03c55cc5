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

use crate::{TelnetSide, consts};
use bytes::Bytes;
use std::fmt::Formatter;

/// Option negotiation verb.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetCommand {
    /// `IAC WILL`: sender offers to perform an option.
    Will,
    /// `IAC WONT`: sender refuses or stops performing an option.
    Wont,
    /// `IAC DO`: sender asks the receiver to perform an option.
    Do,
    /// `IAC DONT`: sender asks the receiver to stop performing an option.
    Dont,
}

impl TelnetCommand {
    /// Wire byte of the verb.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetCommand::Will => consts::WILL,
            TelnetCommand::Wont => consts::WONT,
            TelnetCommand::Do => consts::DO,
            TelnetCommand::Dont => consts::DONT,
        }
    }

    /// Verb for a wire byte, if it is one.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            consts::WILL => Some(TelnetCommand::Will),
            consts::WONT => Some(TelnetCommand::Wont),
            consts::DO => Some(TelnetCommand::Do),
            consts::DONT => Some(TelnetCommand::Dont),
            _ => None,
        }
    }

    /// Side of the connection a received verb talks about.
    ///
    /// A received WILL/WONT describes the sender (the remote side); a received
    /// DO/DONT asks about us.
    pub fn side(self) -> TelnetSide {
        match self {
            TelnetCommand::Will | TelnetCommand::Wont => TelnetSide::Remote,
            TelnetCommand::Do | TelnetCommand::Dont => TelnetSide::Local,
        }
    }
}

impl std::fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetCommand::Will => write!(f, "WILL"),
            TelnetCommand::Wont => write!(f, "WONT"),
            TelnetCommand::Do => write!(f, "DO"),
            TelnetCommand::Dont => write!(f, "DONT"),
        }
    }
}

///
/// One unit of demultiplexed inbound Telnet traffic.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Frame {
    /// Plain data with `IAC IAC` already collapsed to a single `0xFF`.
    Text(Bytes),
    /// `IAC <verb> <option>`
    Command(TelnetCommand, u8),
    /// `IAC SB <option> <payload> IAC SE` with the payload unescaped.
    Subnegotiation(u8, Bytes),
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Frame::Text(data) => write!(f, "Text({} bytes)", data.len()),
            Frame::Command(command, option) => write!(
                f,
                "IAC {command} {}",
                crate::TelnetOption::from_u8(*option)
            ),
            Frame::Subnegotiation(option, payload) => write!(
                f,
                "IAC SB {} ({} bytes) IAC SE",
                crate::TelnetOption::from_u8(*option),
                payload.len()
            ),
        }
    }
}

///
/// One unit of outbound Telnet traffic, encoded by [`crate::TelnetEncoder`].
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OutboundFrame {
    /// Raw data, IAC-escaped on the way out.
    Data(Bytes),
    /// `IAC <verb> <option>`
    Negotiate(TelnetCommand, u8),
    /// `IAC SB <option> <payload> IAC SE`, payload IAC-escaped on the way out.
    Subnegotiate(u8, Bytes),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_round_trip() {
        for cmd in [
            TelnetCommand::Will,
            TelnetCommand::Wont,
            TelnetCommand::Do,
            TelnetCommand::Dont,
        ] {
            assert_eq!(TelnetCommand::from_u8(cmd.to_u8()), Some(cmd));
        }
        assert_eq!(TelnetCommand::from_u8(consts::SB), None);
    }

    #[test]
    fn test_command_side() {
        assert_eq!(TelnetCommand::Will.side(), TelnetSide::Remote);
        assert_eq!(TelnetCommand::Dont.side(), TelnetSide::Local);
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::Command(TelnetCommand::Do, consts::option::NAWS);
        assert_eq!(frame.to_string(), "IAC DO NAWS");
    }
}
