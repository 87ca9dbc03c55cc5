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

use crate::consts::option;
use std::fmt::Formatter;

///
/// [Telnet Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// a MUD client has an opinion about. Everything else is carried as
/// [`TelnetOption::Unknown`] and refused by default.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`option::TTYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TTYPE,
    /// [`option::EOR`] End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    EOR,
    /// [`option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    NAWS,
    /// [`option::CHARSET`] Character Set [RFC2066](https://tools.ietf.org/html/rfc2066)
    Charset,
    /// [`option::MSDP`] Mud Server Data Protocol
    MSDP,
    /// [`option::MSSP`] Mud Server Status Protocol
    MSSP,
    /// [`option::COMPRESS`] Mud Client Compression Protocol v1
    Compress1,
    /// [`option::COMPRESS2`] Mud Client Compression Protocol v2
    Compress2,
    /// [`option::ZMP`] Zenith Mud Protocol
    ZMP,
    /// [`option::GMCP`] Generic Mud Communication Protocol
    GMCP,
    /// Any option without a dedicated variant
    Unknown(u8),
}

impl TelnetOption {
    /// Wire code of this option.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::Echo => option::ECHO,
            TelnetOption::SuppressGoAhead => option::SGA,
            TelnetOption::TTYPE => option::TTYPE,
            TelnetOption::EOR => option::EOR,
            TelnetOption::NAWS => option::NAWS,
            TelnetOption::Charset => option::CHARSET,
            TelnetOption::MSDP => option::MSDP,
            TelnetOption::MSSP => option::MSSP,
            TelnetOption::Compress1 => option::COMPRESS,
            TelnetOption::Compress2 => option::COMPRESS2,
            TelnetOption::ZMP => option::ZMP,
            TelnetOption::GMCP => option::GMCP,
            TelnetOption::Unknown(byte) => byte,
        }
    }

    /// Option for a wire code.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            option::ECHO => TelnetOption::Echo,
            option::SGA => TelnetOption::SuppressGoAhead,
            option::TTYPE => TelnetOption::TTYPE,
            option::EOR => TelnetOption::EOR,
            option::NAWS => TelnetOption::NAWS,
            option::CHARSET => TelnetOption::Charset,
            option::MSDP => TelnetOption::MSDP,
            option::MSSP => TelnetOption::MSSP,
            option::COMPRESS => TelnetOption::Compress1,
            option::COMPRESS2 => TelnetOption::Compress2,
            option::ZMP => TelnetOption::ZMP,
            option::GMCP => TelnetOption::GMCP,
            byte => TelnetOption::Unknown(byte),
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::TTYPE => write!(f, "TTYPE"),
            TelnetOption::EOR => write!(f, "EOR"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::Charset => write!(f, "CHARSET"),
            TelnetOption::MSDP => write!(f, "MSDP"),
            TelnetOption::MSSP => write!(f, "MSSP"),
            TelnetOption::Compress1 => write!(f, "COMPRESS"),
            TelnetOption::Compress2 => write!(f, "COMPRESS2"),
            TelnetOption::ZMP => write!(f, "ZMP"),
            TelnetOption::GMCP => write!(f, "GMCP"),
            TelnetOption::Unknown(byte) => write!(f, "Unknown({byte})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Which end of the connection an option applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetSide {
    /// This client performs the option (WILL/WONT from us, DO/DONT from the server).
    Local,
    /// The server performs the option (WILL/WONT from the server, DO/DONT from us).
    Remote,
}

impl std::fmt::Display for TelnetSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetSide::Local => write!(f, "Local"),
            TelnetSide::Remote => write!(f, "Remote"),
        }
    }
}

///
/// Per-option negotiation state.
///
/// `want_*` records that we asked for the option ourselves, `enabled_*` that
/// the negotiation for that side completed positively. Both are cleared on
/// disconnect.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptionState {
    /// We sent WILL and are waiting for the answer.
    pub want_local: bool,
    /// We sent DO and are waiting for the answer.
    pub want_remote: bool,
    /// We perform the option.
    pub enabled_local: bool,
    /// The server performs the option.
    pub enabled_remote: bool,
}

impl OptionState {
    /// Whether the option is enabled on `side`.
    pub fn enabled(&self, side: TelnetSide) -> bool {
        match side {
            TelnetSide::Local => self.enabled_local,
            TelnetSide::Remote => self.enabled_remote,
        }
    }

    pub(crate) fn set_enabled(&mut self, side: TelnetSide, enabled: bool) {
        match side {
            TelnetSide::Local => {
                self.enabled_local = enabled;
                self.want_local = false;
            }
            TelnetSide::Remote => {
                self.enabled_remote = enabled;
                self.want_remote = false;
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = OptionState::default();
    }
}
