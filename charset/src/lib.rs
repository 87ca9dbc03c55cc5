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

//! # Character Sets for MUD Sessions
//!
//! MUD servers still speak a wide range of legacy encodings. This crate
//! wraps them behind [`EncodingProvider`] and keeps the session's active
//! choice in an [`EncodingCodec`], which also answers RFC 2066 CHARSET
//! offers.
//!
//! ```rust
//! use mudlink_charset::EncodingCodec;
//!
//! let mut codec = EncodingCodec::with_builtin("utf-8").unwrap();
//!
//! // A character split across two network reads.
//! let bytes = "\u{e9}t\u{e9}".as_bytes();
//! let mut text = codec.feed(&bytes[..1]);
//! text.push_str(&codec.feed(&bytes[1..]));
//! assert_eq!(text, "\u{e9}t\u{e9}");
//!
//! // The server offers Big5 and Latin-1; UTF-8 is not on the list.
//! let chosen = codec.negotiate(&["BIG5", "ISO-8859-1"]).unwrap();
//! codec.set_encoding(chosen).unwrap();
//! assert_eq!(codec.current().id(), "iso-8859-1");
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod codec;
mod provider;
mod result;

pub use self::codec::EncodingCodec;
pub use self::provider::{EncodingProvider, EncodingRsProvider, builtin_providers};
pub use self::result::{CharsetError, CharsetResult};
