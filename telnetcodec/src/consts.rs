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

//! Telnet wire constants

/// End of subnegotiation parameters.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// The data stream portion of a Synch.
pub const DM: u8 = 242;
/// NVT character BRK.
pub const BRK: u8 = 243;
/// Interrupt Process.
pub const IP: u8 = 244;
/// Abort Output.
pub const AO: u8 = 245;
/// Are You There.
pub const AYT: u8 = 246;
/// Erase Character.
pub const EC: u8 = 247;
/// Erase Line.
pub const EL: u8 = 248;
/// Go Ahead.
pub const GA: u8 = 249;
/// Subnegotiation Begin.
pub const SB: u8 = 250;
/// Sender wants to enable an option locally.
pub const WILL: u8 = 251;
/// Sender refuses or stops an option locally.
pub const WONT: u8 = 252;
/// Sender asks the receiver to enable an option.
pub const DO: u8 = 253;
/// Sender asks the receiver to disable an option.
pub const DONT: u8 = 254;
/// Interpret As Command.
pub const IAC: u8 = 255;
/// End of Record command (RFC 885).
pub const EOR: u8 = 239;

/// Telnet option codes used by MUD clients.
pub mod option {
    /// Echo (RFC 857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead (RFC 858)
    pub const SGA: u8 = 3;
    /// Terminal Type (RFC 1091)
    pub const TTYPE: u8 = 24;
    /// End of Record (RFC 885)
    pub const EOR: u8 = 25;
    /// Negotiate About Window Size (RFC 1073)
    pub const NAWS: u8 = 31;
    /// Character set (RFC 2066)
    pub const CHARSET: u8 = 42;
    /// Mud Server Data Protocol
    pub const MSDP: u8 = 69;
    /// Mud Server Status Protocol
    pub const MSSP: u8 = 70;
    /// Mud Client Compression Protocol v1
    pub const COMPRESS: u8 = 85;
    /// Mud Client Compression Protocol v2
    pub const COMPRESS2: u8 = 86;
    /// Zenith Mud Protocol
    pub const ZMP: u8 = 93;
    /// Generic Mud Communication Protocol
    pub const GMCP: u8 = 201;
}

/// CHARSET subnegotiation codes (RFC 2066).
pub mod charset {
    /// Request a character set from an offered list.
    pub const REQUEST: u8 = 1;
    /// Accept one of the offered character sets.
    pub const ACCEPTED: u8 = 2;
    /// Reject every offered character set.
    pub const REJECTED: u8 = 3;
    /// Translation table announcement.
    pub const TTABLE_IS: u8 = 4;
    /// Translation table refused.
    pub const TTABLE_REJECTED: u8 = 5;
    /// Translation table acknowledged.
    pub const TTABLE_ACK: u8 = 6;
    /// Translation table needs resending.
    pub const TTABLE_NAK: u8 = 7;
}

/// TTYPE subnegotiation codes (RFC 1091).
pub mod ttype {
    /// Terminal type follows.
    pub const IS: u8 = 0;
    /// Request the next terminal type.
    pub const SEND: u8 = 1;
}

/// MSDP structural markers.
pub mod msdp {
    /// Variable name follows.
    pub const VAR: u8 = 1;
    /// Variable value follows.
    pub const VAL: u8 = 2;
    /// Opens a table value.
    pub const TABLE_OPEN: u8 = 3;
    /// Closes a table value.
    pub const TABLE_CLOSE: u8 = 4;
    /// Opens an array value.
    pub const ARRAY_OPEN: u8 = 5;
    /// Closes an array value.
    pub const ARRAY_CLOSE: u8 = 6;
}
