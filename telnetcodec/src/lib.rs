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

//! # mudlink Telnet Codec
//!
//! The Telnet layer of a MUD client: it turns a raw inbound byte stream into
//! frames, decides which options to agree to, and writes correctly escaped
//! outbound bytes.
//!
//! ## Core Components
//!
//! ### [`FrameDemuxer`]
//!
//! Splits inbound bytes into [`Frame::Text`], [`Frame::Command`] and
//! [`Frame::Subnegotiation`]. Partial commands and subnegotiations are held
//! back until they complete, so the frames do not depend on how the transport
//! happened to cut the stream. The demuxer is also a `tokio_util`
//! [`Decoder`](tokio_util::codec::Decoder).
//!
//! ### [`OptionNegotiator`]
//!
//! Keeps one [`OptionState`] per option and dispatches `WILL`/`WONT`/`DO`/`DONT`
//! and subnegotiation payloads to [`OptionCallbacks`] registered at
//! construction time. Options nobody registered are refused.
//!
//! ### [`TelnetEncoder`]
//!
//! Outbound data and subnegotiations with `IAC` doubled.
//!
//! ## Usage Example
//!
//! ```rust
//! use mudlink_telnetcodec::{Frame, FrameDemuxer, OptionNegotiator, TelnetCommand, consts};
//!
//! let mut demux = FrameDemuxer::new();
//! let mut wire: Vec<u8> = Vec::new();
//! let mut negotiator = OptionNegotiator::<Vec<u8>>::builder()
//!     .accept(consts::option::SGA)
//!     .build();
//!
//! for frame in demux.feed(b"Welcome!\xFF\xFB\x03\xFF\xFD\x18") {
//!     match frame {
//!         Frame::Text(text) => assert_eq!(&text[..], b"Welcome!"),
//!         Frame::Command(command, option) => negotiator.handle_command(&mut wire, command, option),
//!         Frame::Subnegotiation(option, payload) => {
//!             negotiator.handle_subnegotiation(&mut wire, option, &payload)
//!         }
//!     }
//! }
//!
//! // WILL SGA accepted, DO TTYPE refused (no handler).
//! assert_eq!(wire, [0xFF, 0xFD, 0x03, 0xFF, 0xFC, 0x18]);
//! ```
//!
//! ## IAC Escaping
//!
//! `0xFF` is the command introducer, so a literal `0xFF` is sent as
//! `IAC IAC`, both in the data stream and inside subnegotiation payloads.
//! The demuxer collapses the pair; the encoder produces it.
//!
//! ## MUD Protocol Extensions
//!
//! Typed payloads for the options MUDs rely on live in [`charset`],
//! [`gmcp`], [`msdp`], [`naws`], [`ttype`] and [`zmp`].

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
pub mod consts;
mod demux;
mod encoder;
mod frame;
mod negotiator;
mod options;
mod result;

pub use self::args::{charset, gmcp, msdp, naws, ttype, zmp};
pub use self::demux::{DEFAULT_MAX_SUBNEGOTIATION_LEN, FrameDemuxer};
pub use self::encoder::TelnetEncoder;
pub use self::frame::{Frame, OutboundFrame, TelnetCommand};
pub use self::negotiator::{
    Handled, IacSink, OptionCallbacks, OptionHandler, OptionNegotiator, OptionNegotiatorBuilder,
    Reply,
};
pub use self::options::{OptionState, TelnetOption, TelnetSide};
pub use self::result::{TelnetError, TelnetResult};

#[cfg(test)]
mod tests {
    use super::{Frame, FrameDemuxer, OptionNegotiator, TelnetEncoder, consts};
    use bytes::{Bytes, BytesMut};

    #[test]
    fn demux_then_negotiate() {
        let mut demux = FrameDemuxer::new();
        let mut wire = BytesMut::new();
        let mut negotiator = OptionNegotiator::<BytesMut>::builder()
            .accept(consts::option::EOR)
            .build();

        let frames = demux.feed(&[
            b'L',
            b'o',
            b'g',
            b'i',
            b'n',
            b':',
            consts::IAC,
            consts::WILL,
            consts::option::EOR,
            consts::IAC,
            consts::DO,
            consts::option::MSSP,
            b' ',
        ]);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], Frame::Text(Bytes::from_static(b"Login:")));
        for frame in &frames {
            if let Frame::Command(command, option) = frame {
                negotiator.handle_command(&mut wire, *command, *option);
            }
        }
        assert_eq!(
            &wire[..],
            &[
                consts::IAC,
                consts::DO,
                consts::option::EOR,
                consts::IAC,
                consts::WONT,
                consts::option::MSSP
            ]
        );
    }

    #[test]
    fn encoded_text_demuxes_back() {
        let mut wire = BytesMut::new();
        TelnetEncoder::escape_into(&[b'a', 0xFF, b'b'], &mut wire);
        let mut demux = FrameDemuxer::new();
        assert_eq!(
            demux.feed(&wire),
            vec![Frame::Text(Bytes::from_static(&[b'a', 0xFF, b'b']))]
        );
    }
}
