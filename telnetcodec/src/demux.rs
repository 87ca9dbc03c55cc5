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

use crate::{Frame, TelnetCommand, TelnetError, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, trace, warn};

/// Default upper bound on a buffered, unterminated subnegotiation.
pub const DEFAULT_MAX_SUBNEGOTIATION_LEN: usize = 8192;

///
/// Splits an inbound byte stream into [`Frame`]s.
///
/// Text before an `IAC` is emitted as soon as it is seen. Negotiation
/// commands and subnegotiations that arrive split across deliveries stay in
/// the internal buffer until the rest of the frame shows up, so the same
/// stream produces the same frames no matter where it was cut (adjacent
/// [`Frame::Text`] values aside).
///
/// The demuxer is also a [`Decoder`], so it can be driven by
/// `tokio_util::codec::FramedRead` over a transport that needs no
/// decompression stage.
///
#[derive(Debug)]
pub struct FrameDemuxer {
    buffer: BytesMut,
    max_subnegotiation_len: usize,
}

/// Outcome of scanning for the end of a subnegotiation.
enum Subnegotiation {
    Complete { option: u8, payload: BytesMut, len: usize },
    Incomplete { payload_len: usize },
}

impl FrameDemuxer {
    /// Create a demuxer with the default subnegotiation limit.
    pub fn new() -> FrameDemuxer {
        FrameDemuxer::with_max_subnegotiation_len(DEFAULT_MAX_SUBNEGOTIATION_LEN)
    }

    /// Create a demuxer that abandons subnegotiations longer than `max` bytes.
    pub fn with_max_subnegotiation_len(max: usize) -> FrameDemuxer {
        FrameDemuxer {
            buffer: BytesMut::with_capacity(4096),
            max_subnegotiation_len: max,
        }
    }

    /// Append `bytes` and return every frame that is now complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Frame> {
        self.extend(bytes);
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame() {
            frames.push(frame);
        }
        frames
    }

    /// Append `bytes` without decoding them.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Decode the next complete frame from the internal buffer.
    pub fn next_frame(&mut self) -> Option<Frame> {
        decode_frame(&mut self.buffer, self.max_subnegotiation_len)
    }

    /// Bytes buffered but not yet part of a complete frame.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Remove and return everything still buffered.
    ///
    /// Used when the stream switches representation mid-buffer, e.g. once
    /// MCCP2 starts the remaining bytes are compressed and must not be framed.
    pub fn take_pending(&mut self) -> BytesMut {
        self.buffer.split()
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!("Discarding {} pending bytes on reset", self.buffer.len());
        }
        self.buffer.clear();
    }
}

impl Default for FrameDemuxer {
    fn default() -> Self {
        FrameDemuxer::new()
    }
}

impl Decoder for FrameDemuxer {
    type Item = Frame;
    type Error = TelnetError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(decode_frame(src, self.max_subnegotiation_len))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                if !src.is_empty() {
                    debug!("Dropping {} bytes of incomplete frame at EOF", src.len());
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

/// Pull one frame off the front of `src`, leaving incomplete frames in place.
fn decode_frame(src: &mut BytesMut, max_subnegotiation_len: usize) -> Option<Frame> {
    let mut text = BytesMut::new();
    loop {
        let Some(pos) = src.iter().position(|&b| b == consts::IAC) else {
            text.extend_from_slice(&src.split_to(src.len()));
            break;
        };
        if pos > 0 {
            text.extend_from_slice(&src.split_to(pos));
        }
        let Some(&second) = src.get(1) else {
            // Lone IAC at the end of the buffer.
            break;
        };
        match second {
            consts::IAC => {
                src.advance(2);
                text.put_u8(consts::IAC);
            }
            consts::GA | consts::NOP | consts::EOR => {
                trace!("Discarding IAC {:#X}", second);
                src.advance(2);
            }
            consts::SE
            | consts::DM
            | consts::BRK
            | consts::IP
            | consts::AO
            | consts::AYT
            | consts::EC
            | consts::EL => {
                debug!("Ignoring unsupported command IAC {:#X}", second);
                src.advance(2);
            }
            consts::WILL | consts::WONT | consts::DO | consts::DONT => {
                if !text.is_empty() {
                    break;
                }
                let Some(&option) = src.get(2) else {
                    break;
                };
                let command = TelnetCommand::from_u8(second)?;
                src.advance(3);
                let frame = Frame::Command(command, option);
                trace!("Decoded {}", frame);
                return Some(frame);
            }
            consts::SB => {
                if !text.is_empty() {
                    break;
                }
                match scan_subnegotiation(src) {
                    Some(Subnegotiation::Complete {
                        option,
                        payload,
                        len,
                    }) => {
                        src.advance(len);
                        let frame = Frame::Subnegotiation(option, payload.freeze());
                        trace!("Decoded {}", frame);
                        return Some(frame);
                    }
                    Some(Subnegotiation::Incomplete { payload_len })
                        if payload_len > max_subnegotiation_len =>
                    {
                        warn!(
                            "Abandoning unterminated subnegotiation after {} bytes",
                            payload_len
                        );
                        // Drop IAC SB <option> and resynchronize on what follows.
                        src.advance(src.len().min(3));
                    }
                    _ => break,
                }
            }
            other => {
                warn!("Received unknown command {:#X} after IAC, skipping IAC", other);
                src.advance(1);
            }
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(Frame::Text(text.freeze()))
    }
}

/// Scan `src` (which starts with `IAC SB`) for the terminating `IAC SE`.
///
/// Returns `None` when even the option byte is missing.
fn scan_subnegotiation(src: &BytesMut) -> Option<Subnegotiation> {
    let option = *src.get(2)?;
    let mut payload = BytesMut::new();
    let mut index = 3;
    while index < src.len() {
        let byte = src[index];
        if byte != consts::IAC {
            payload.put_u8(byte);
            index += 1;
            continue;
        }
        match src.get(index + 1) {
            None => break,
            Some(&consts::SE) => {
                return Some(Subnegotiation::Complete {
                    option,
                    payload,
                    len: index + 2,
                });
            }
            Some(&consts::IAC) => payload.put_u8(consts::IAC),
            Some(&stray) => {
                debug!("Stray IAC {:#X} inside subnegotiation {}", stray, option);
                payload.put_u8(stray);
            }
        }
        index += 2;
    }
    Some(Subnegotiation::Incomplete {
        payload_len: payload.len(),
    })
}
