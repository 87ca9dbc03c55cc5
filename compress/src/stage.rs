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

use crate::{CompressError, CompressResult};
use flate2::{Decompress, FlushDecompress, Status};
use tracing::{debug, trace, warn};

/// Output growth step while inflating.
const CHUNK_SIZE: usize = 16 * 1024;

/// Output of one [`CompressionStage::feed`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inflated {
    /// Plain bytes ready for the Telnet demuxer.
    pub data: Vec<u8>,
    /// Uncompressed bytes that followed the end of the zlib stream. Only
    /// set when the server ended compression inside this delivery, in which
    /// case the stage is no longer active.
    pub trailing: Option<Vec<u8>>,
}

///
/// MCCP2 decompression stage.
///
/// Inactive stages pass bytes through untouched. At most one zlib stream is
/// live at a time; enabling an already active stage keeps the current one.
///
#[derive(Default)]
pub struct CompressionStage {
    session: Option<Decompress>,
}

impl std::fmt::Debug for CompressionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionStage")
            .field("active", &self.is_active())
            .finish()
    }
}

impl CompressionStage {
    /// Create an inactive stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start inflating. Everything fed from now on is treated as zlib data.
    pub fn enable(&mut self) {
        if self.session.is_some() {
            debug!("Compression already active");
            return;
        }
        debug!("Compression enabled");
        self.session = Some(Decompress::new(true));
    }

    /// Stop inflating and drop the decompressor state.
    pub fn disable(&mut self) {
        if self.session.take().is_some() {
            debug!("Compression disabled");
        }
    }

    /// Whether inbound bytes are currently inflated.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Inflate `input`, or pass it through if the stage is inactive.
    pub fn feed(&mut self, input: &[u8]) -> CompressResult<Inflated> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Inflated {
                data: input.to_vec(),
                trailing: None,
            });
        };

        let mut data = Vec::with_capacity(input.len().saturating_mul(4).max(64));
        let mut consumed = 0;
        loop {
            if data.len() == data.capacity() {
                data.reserve(CHUNK_SIZE);
            }
            let in_before = session.total_in();
            let out_before = data.len();
            let status =
                match session.decompress_vec(&input[consumed..], &mut data, FlushDecompress::None) {
                    Ok(status) => status,
                    Err(source) => {
                        let at = consumed;
                        warn!("Decompression failed after {} bytes: {}", at, source);
                        self.session = None;
                        return Err(CompressError::Corrupt {
                            source,
                            inflated: data,
                            remaining: input[at..].to_vec(),
                        });
                    }
                };
            // Bounded by input.len(), so it fits in usize.
            consumed += usize::try_from(session.total_in() - in_before).unwrap_or(usize::MAX);
            consumed = consumed.min(input.len());

            if status == Status::StreamEnd {
                debug!("Compressed stream ended by server");
                self.session = None;
                let trailing = input[consumed..].to_vec();
                return Ok(Inflated {
                    data,
                    trailing: Some(trailing),
                });
            }

            let output_full = data.len() == data.capacity();
            let progressed = session.total_in() != in_before || data.len() != out_before;
            if (consumed == input.len() && !output_full) || !progressed {
                break;
            }
        }
        trace!("Inflated {} bytes into {}", input.len(), data.len());
        Ok(Inflated {
            data,
            trailing: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_inactive_stage_passes_through() {
        let mut stage = CompressionStage::new();
        let out = stage.feed(b"\xFF\xFA\x56\xFF\xF0").unwrap();
        assert_eq!(out.data, b"\xFF\xFA\x56\xFF\xF0");
        assert_eq!(out.trailing, None);
    }

    #[test]
    fn test_stream_end_returns_trailing_plain_bytes() {
        let mut input = compress(b"compressed part");
        input.extend_from_slice(b"plain part");
        let mut stage = CompressionStage::new();
        stage.enable();
        let out = stage.feed(&input).unwrap();
        assert_eq!(out.data, b"compressed part");
        assert_eq!(out.trailing.as_deref(), Some(&b"plain part"[..]));
        assert!(!stage.is_active());
    }

    #[test]
    fn test_large_output_grows_buffer() {
        let text = "The quick brown fox jumps over the lazy dog.\r\n".repeat(4000);
        let mut stage = CompressionStage::new();
        stage.enable();
        let out = stage.feed(&compress(text.as_bytes())).unwrap();
        assert_eq!(out.data, text.as_bytes());
    }

    #[test]
    fn test_corrupt_input_disables_stage() {
        let mut stage = CompressionStage::new();
        stage.enable();
        let err = stage.feed(b"this is not zlib").unwrap_err();
        assert!(matches!(err, CompressError::Corrupt { .. }));
        assert!(!stage.is_active());
        assert_eq!(stage.feed(b"ok").unwrap().data, b"ok");
    }

    #[test]
    fn test_disable_drops_state() {
        let mut stage = CompressionStage::new();
        stage.enable();
        stage.disable();
        assert!(!stage.is_active());
        assert_eq!(stage.feed(b"x").unwrap().data, b"x");
    }
}
