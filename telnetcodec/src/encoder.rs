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

use crate::{OutboundFrame, TelnetCommand, TelnetError, consts};
use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

///
/// Outbound half of the Telnet codec.
///
/// Data and subnegotiation payloads have every `0xFF` doubled; negotiation
/// commands are written verbatim.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct TelnetEncoder;

impl TelnetEncoder {
    /// Write `data` to `dst` with IAC doubled.
    pub fn escape_into(data: &[u8], dst: &mut BytesMut) {
        dst.reserve(data.len() + data.iter().filter(|&&b| b == consts::IAC).count());
        for &byte in data {
            if byte == consts::IAC {
                dst.put_u8(consts::IAC);
            }
            dst.put_u8(byte);
        }
    }

    /// Write `IAC <verb> <option>`.
    pub fn negotiate(command: TelnetCommand, option: u8, dst: &mut BytesMut) {
        dst.reserve(3);
        dst.put_u8(consts::IAC);
        dst.put_u8(command.to_u8());
        dst.put_u8(option);
    }

    /// Write `IAC SB <option> <escaped payload> IAC SE`.
    pub fn subnegotiate(option: u8, payload: &[u8], dst: &mut BytesMut) {
        dst.reserve(5);
        dst.put_u8(consts::IAC);
        dst.put_u8(consts::SB);
        dst.put_u8(option);
        Self::escape_into(payload, dst);
        dst.put_u8(consts::IAC);
        dst.put_u8(consts::SE);
    }
}

impl Encoder<OutboundFrame> for TelnetEncoder {
    type Error = TelnetError;

    fn encode(&mut self, item: OutboundFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            OutboundFrame::Data(data) => Self::escape_into(&data, dst),
            OutboundFrame::Negotiate(command, option) => Self::negotiate(command, option, dst),
            OutboundFrame::Subnegotiate(option, payload) => {
                Self::subnegotiate(option, &payload, dst)
            }
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for TelnetEncoder {
    type Error = TelnetError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        Self::escape_into(item, dst);
        Ok(())
    }
}
