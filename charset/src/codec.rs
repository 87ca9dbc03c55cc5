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

use crate::provider::{EncodingProvider, builtin_providers};
use crate::{CharsetError, CharsetResult};
use std::fmt;

/// The session's active character set plus everything it may switch to.
///
/// Holds the bytes of an incomplete multi-byte sequence between
/// [`EncodingCodec::feed`] calls so deliveries can split characters.
pub struct EncodingCodec {
    providers: Vec<Box<dyn EncodingProvider>>,
    preferences: Vec<String>,
    current: usize,
    default: usize,
    pending: Vec<u8>,
}

impl EncodingCodec {
    /// Build a codec from injected providers.
    ///
    /// `preferences` lists ids or proper names in the order they are offered
    /// to the server; `default_id` selects the starting encoding.
    pub fn new(
        providers: Vec<Box<dyn EncodingProvider>>,
        preferences: Vec<String>,
        default_id: &str,
    ) -> CharsetResult<Self> {
        if providers.is_empty() {
            return Err(CharsetError::NoProviders);
        }
        let current = find_in(&providers, default_id)
            .ok_or_else(|| CharsetError::UnknownEncoding(default_id.to_string()))?;
        Ok(EncodingCodec {
            providers,
            preferences,
            current,
            default: current,
            pending: Vec::new(),
        })
    }

    /// Built-in providers, preferring UTF-8 and starting in `default_id`.
    pub fn with_builtin(default_id: &str) -> CharsetResult<Self> {
        let providers = builtin_providers();
        let preferences = providers.iter().map(|p| p.id().to_string()).collect();
        Self::new(providers, preferences, default_id)
    }

    /// The active provider.
    pub fn current(&self) -> &dyn EncodingProvider {
        self.providers[self.current].as_ref()
    }

    /// Proper names of the preferred encodings, for a CHARSET REQUEST.
    pub fn offer(&self) -> Vec<String> {
        self.preferences
            .iter()
            .filter_map(|pref| find_in(&self.providers, pref))
            .map(|index| self.providers[index].proper_name().to_string())
            .collect()
    }

    /// Decode with the active encoding, returning the undecoded tail.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]) {
        let (text, rest) = self.current().decode(bytes);
        (text, &bytes[bytes.len() - rest..])
    }

    /// Decode a delivery, carrying an incomplete trailing sequence over to the
    /// next call.
    pub fn feed(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);
        let (text, rest) = self.current().decode(&input);
        input.drain(..input.len() - rest);
        self.pending = input;
        text
    }

    /// Bytes held back waiting for the rest of a character.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Encode outbound text with the active encoding.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        self.current().encode(text)
    }

    /// Choose one of the names a server offered.
    ///
    /// Keeps the active encoding when offered, then walks the preference
    /// list, then accepts anything registered. The name is returned as the
    /// server spelled it.
    pub fn negotiate<'a>(&self, offered: &[&'a str]) -> Option<&'a str> {
        let offered_for = |provider: &dyn EncodingProvider| {
            offered.iter().copied().find(|name| provider.matches(name))
        };
        if let Some(name) = offered_for(self.current()) {
            return Some(name);
        }
        for pref in &self.preferences {
            if let Some(index) = find_in(&self.providers, pref) {
                if let Some(name) = offered_for(self.providers[index].as_ref()) {
                    return Some(name);
                }
            }
        }
        offered
            .iter()
            .copied()
            .find(|name| find_in(&self.providers, name).is_some())
    }

    /// Switch the active encoding. Pending partial bytes are discarded.
    pub fn set_encoding(&mut self, name: &str) -> CharsetResult<&str> {
        let index = find_in(&self.providers, name)
            .ok_or_else(|| CharsetError::UnknownEncoding(name.to_string()))?;
        if !self.pending.is_empty() {
            tracing::debug!(
                discarded = self.pending.len(),
                "Dropping partial sequence on encoding switch"
            );
            self.pending.clear();
        }
        self.current = index;
        tracing::debug!(encoding = self.providers[index].id(), "Encoding switched");
        Ok(self.providers[index].proper_name())
    }

    /// Return to the starting encoding and drop any partial sequence.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.current = self.default;
    }

    /// Whether some provider answers to `name`.
    pub fn supports(&self, name: &str) -> bool {
        find_in(&self.providers, name).is_some()
    }
}

impl fmt::Debug for EncodingCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingCodec")
            .field("current", &self.current().id())
            .field("preferences", &self.preferences)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

fn find_in(providers: &[Box<dyn EncodingProvider>], name: &str) -> Option<usize> {
    providers.iter().position(|p| p.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn codec() -> EncodingCodec {
        EncodingCodec::with_builtin("utf-8").unwrap()
    }

    #[test]
    fn test_unknown_default_is_error() {
        assert_eq!(
            EncodingCodec::with_builtin("ebcdic").unwrap_err(),
            CharsetError::UnknownEncoding("ebcdic".into())
        );
        assert_eq!(
            EncodingCodec::new(Vec::new(), Vec::new(), "utf-8").unwrap_err(),
            CharsetError::NoProviders
        );
    }

    #[test]
    fn test_decode_returns_tail_slice() {
        let bytes = "\u{2603}".as_bytes();
        let (text, rest) = codec().decode(&bytes[..2]);
        assert!(text.is_empty());
        assert_eq!(rest, &bytes[..2]);
    }

    #[test]
    fn test_feed_joins_split_character() {
        let mut codec = codec();
        let bytes = "snow \u{2603}!".as_bytes();
        assert_eq!(codec.feed(&bytes[..6]), "snow ");
        assert_eq!(codec.pending().len(), 1);
        assert_eq!(codec.feed(&bytes[6..]), "\u{2603}!");
        assert!(codec.pending().is_empty());
    }

    #[test]
    fn test_negotiate_prefers_current() {
        let mut codec = codec();
        codec.set_encoding("big5").unwrap();
        assert_eq!(codec.negotiate(&["UTF-8", "Big5"]), Some("Big5"));
    }

    #[test]
    fn test_negotiate_walks_preferences() {
        let codec = EncodingCodec::new(
            builtin_providers(),
            vec!["gbk".into(), "utf-8".into()],
            "iso-8859-1",
        )
        .unwrap();
        assert_eq!(codec.negotiate(&["UTF-8", "GBK"]), Some("GBK"));
    }

    #[test]
    fn test_negotiate_falls_back_to_registry() {
        let codec = EncodingCodec::new(builtin_providers(), Vec::new(), "utf-8").unwrap();
        assert_eq!(codec.negotiate(&["X-UNKNOWN", "KOI8-R"]), Some("KOI8-R"));
        assert_eq!(codec.negotiate(&["X-UNKNOWN"]), None);
        assert_eq!(codec.negotiate(&[]), None);
    }

    #[test]
    fn test_negotiate_is_repeatable() {
        let codec = codec();
        let offered = ["ISO-8859-1", "utf-8"];
        assert_eq!(codec.negotiate(&offered), codec.negotiate(&offered));
    }

    #[test]
    #[traced_test]
    fn test_set_encoding_clears_pending() {
        let mut codec = codec();
        codec.feed(&[0xE2, 0x98]);
        assert_eq!(codec.set_encoding("KOI8-R").unwrap(), "KOI8-R");
        assert!(codec.pending().is_empty());
        assert!(logs_contain("Dropping partial sequence"));
    }

    #[test]
    fn test_offer_uses_proper_names() {
        let codec = EncodingCodec::new(
            builtin_providers(),
            vec!["utf-8".into(), "nope".into(), "big5".into()],
            "utf-8",
        )
        .unwrap();
        assert_eq!(codec.offer(), vec!["UTF-8".to_string(), "BIG5".to_string()]);
    }
}
