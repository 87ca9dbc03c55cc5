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

//! Encoding providers
//!
//! A provider turns bytes from the wire into text and back for one
//! character set. Decoding never fails: malformed bytes become U+FFFD and a
//! multi-byte sequence cut off at the end of the input is handed back as a
//! remainder so the caller can complete it with the next delivery.

use encoding_rs::{DecoderResult, Encoding};
use std::fmt;

/// One character set the client can speak.
pub trait EncodingProvider: Send + Sync + fmt::Debug {
    /// Short identifier used in configuration, e.g. `utf-8`.
    fn id(&self) -> &str;

    /// Name advertised in CHARSET negotiation, e.g. `UTF-8`.
    fn proper_name(&self) -> &str;

    /// Decode `bytes`, returning the text and the length of the incomplete
    /// trailing sequence that was not decoded.
    fn decode(&self, bytes: &[u8]) -> (String, usize);

    /// Encode `text` for the wire.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Whether a name offered by a server refers to this provider.
    fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        name.eq_ignore_ascii_case(self.id()) || name.eq_ignore_ascii_case(self.proper_name())
    }
}

/// Any character set supported by `encoding_rs`.
#[derive(Clone, Copy)]
pub struct EncodingRsProvider {
    id: &'static str,
    proper_name: &'static str,
    encoding: &'static Encoding,
}

impl EncodingRsProvider {
    /// Wrap an `encoding_rs` encoding under the given names.
    pub fn new(id: &'static str, proper_name: &'static str, encoding: &'static Encoding) -> Self {
        EncodingRsProvider {
            id,
            proper_name,
            encoding,
        }
    }

    /// Look an encoding up by WHATWG label.
    pub fn for_label(id: &'static str, proper_name: &'static str) -> Option<Self> {
        Encoding::for_label(id.as_bytes()).map(|encoding| Self::new(id, proper_name, encoding))
    }
}

impl fmt::Debug for EncodingRsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingRsProvider")
            .field("id", &self.id)
            .field("encoding", &self.encoding.name())
            .finish()
    }
}

impl EncodingProvider for EncodingRsProvider {
    fn id(&self) -> &str {
        self.id
    }

    fn proper_name(&self) -> &str {
        self.proper_name
    }

    fn decode(&self, bytes: &[u8]) -> (String, usize) {
        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let mut text = String::with_capacity(bytes.len() * 2);
        let mut input = bytes;
        loop {
            if let Some(needed) = decoder.max_utf8_buffer_length_without_replacement(input.len()) {
                text.reserve(needed);
            }
            let (result, read) = decoder.decode_to_string_without_replacement(input, &mut text, true);
            input = &input[read..];
            match result {
                DecoderResult::InputEmpty => return (text, 0),
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(bad, after) => {
                    let span = usize::from(bad) + usize::from(after);
                    if input.is_empty() && span <= read {
                        // Cut off by the end of the input, not malformed.
                        return (text, span);
                    }
                    text.push(char::REPLACEMENT_CHARACTER);
                }
            }
        }
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = self.encoding.encode(text);
        if unmappable {
            tracing::debug!(encoding = self.id, "Unmappable characters replaced on encode");
        }
        bytes.into_owned()
    }

    fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        name.eq_ignore_ascii_case(self.id)
            || name.eq_ignore_ascii_case(self.proper_name)
            || Encoding::for_label(name.as_bytes()) == Some(self.encoding)
    }
}

/// The providers every client ships with.
pub fn builtin_providers() -> Vec<Box<dyn EncodingProvider>> {
    let table = [
        ("utf-8", "UTF-8", encoding_rs::UTF_8),
        ("iso-8859-1", "ISO-8859-1", encoding_rs::WINDOWS_1252),
        ("big5", "BIG5", encoding_rs::BIG5),
        ("gbk", "GBK", encoding_rs::GBK),
        ("shift_jis", "SHIFT_JIS", encoding_rs::SHIFT_JIS),
        ("euc-kr", "EUC-KR", encoding_rs::EUC_KR),
        ("koi8-r", "KOI8-R", encoding_rs::KOI8_R),
    ];
    table
        .into_iter()
        .map(|(id, proper_name, encoding)| {
            Box::new(EncodingRsProvider::new(id, proper_name, encoding)) as Box<dyn EncodingProvider>
        })
        .collect()
}
