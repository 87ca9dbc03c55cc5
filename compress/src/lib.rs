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

//! # MCCP2 Inflate Stage
//!
//! Once a MUD server sends `IAC SB COMPRESS2 IAC SE`, everything it sends
//! afterwards (Telnet commands included) is one zlib stream. This crate
//! provides the stage that sits between the transport and the Telnet
//! demuxer and turns that stream back into plain bytes.
//!
//! ## Usage
//!
//! ```rust
//! use mudlink_compress::CompressionStage;
//! # use std::io::Write;
//! # let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
//! # encoder.write_all(b"You are standing in a field.\r\n").unwrap();
//! # let compressed = encoder.finish().unwrap();
//!
//! let mut stage = CompressionStage::new();
//! assert_eq!(stage.feed(b"plain").unwrap().data, b"plain");
//!
//! stage.enable();
//! let (head, tail) = compressed.split_at(7);
//! let mut text = stage.feed(head).unwrap().data;
//! text.extend(stage.feed(tail).unwrap().data);
//! assert_eq!(text, b"You are standing in a field.\r\n");
//!
//! // The server finished the stream, so the stage switched itself off.
//! assert!(!stage.is_active());
//! ```
//!
//! ## Stream Boundaries
//!
//! The decompressor keeps its sliding window between calls, so network
//! deliveries can cut the compressed stream anywhere. When the server ends
//! the zlib stream, bytes that follow it in the same delivery are returned
//! uncompressed in [`Inflated::trailing`].
//!
//! ## Failure
//!
//! Corrupt input disables the stage and returns [`CompressError::Corrupt`]
//! carrying everything needed to continue the session uncompressed.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod result;
mod stage;

pub use self::result::{CompressError, CompressResult};
pub use self::stage::{CompressionStage, Inflated};
