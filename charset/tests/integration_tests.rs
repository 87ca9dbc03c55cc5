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

use mudlink_charset::{EncodingCodec, EncodingProvider, builtin_providers};
use proptest::prelude::*;

fn feed_in_chunks(codec: &mut EncodingCodec, bytes: &[u8], chunk: usize) -> String {
    bytes.chunks(chunk).map(|piece| codec.feed(piece)).collect()
}

// ============================================================================
// Split Deliveries
// ============================================================================

#[test]
fn big5_byte_at_a_time() {
    let mut codec = EncodingCodec::with_builtin("big5").unwrap();
    let wire = codec.encode("\u{4F60}\u{597D}, world");
    assert_eq!(feed_in_chunks(&mut codec, &wire, 1), "\u{4F60}\u{597D}, world");
}

#[test]
fn shift_jis_split_after_lead_byte() {
    let mut codec = EncodingCodec::with_builtin("shift_jis").unwrap();
    let wire = codec.encode("\u{65E5}\u{672C}");
    assert_eq!(wire.len(), 4);
    assert_eq!(codec.feed(&wire[..3]), "\u{65E5}");
    assert_eq!(codec.feed(&wire[3..]), "\u{672C}");
}

#[test]
fn malformed_middle_bytes_do_not_stall() {
    let mut codec = EncodingCodec::with_builtin("utf-8").unwrap();
    assert_eq!(codec.feed(b"hp \xC0\xC0 low"), "hp \u{FFFD}\u{FFFD} low");
    assert!(codec.pending().is_empty());
}

proptest! {
    #[test]
    fn utf8_any_chunking_matches_whole(text in "\\PC{0,64}", chunk in 1usize..8) {
        let mut codec = EncodingCodec::with_builtin("utf-8").unwrap();
        prop_assert_eq!(feed_in_chunks(&mut codec, text.as_bytes(), chunk), text);
    }

    #[test]
    fn every_provider_round_trips_ascii(text in "[ -~]{0,64}") {
        for provider in builtin_providers() {
            let wire = provider.encode(&text);
            prop_assert_eq!(provider.decode(&wire), (text.clone(), 0));
        }
    }
}

// ============================================================================
// Negotiation
// ============================================================================

#[test]
fn accepted_name_switches_codec() {
    let mut codec = EncodingCodec::with_builtin("iso-8859-1").unwrap();
    let offered = ["big5", "UTF-8"];
    let chosen = codec.negotiate(&offered).unwrap();
    assert_eq!(chosen, "UTF-8");
    codec.set_encoding(chosen).unwrap();
    assert_eq!(codec.current().proper_name(), "UTF-8");
    assert_eq!(codec.negotiate(&offered), Some("UTF-8"));
}
