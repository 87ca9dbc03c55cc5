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

use flate2::Compression;
use flate2::write::ZlibEncoder;
use mudlink_client::gmcp::GmcpRouter;
use mudlink_client::{ClientConfig, ConnectionEvent, Session, SessionEvent};
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::consts::{DO, IAC, SB, SE, WILL};
use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_terminal::{DisplayEvent, StyleState, StyledRun};
use proptest::prelude::*;
use std::io::Write;
use std::time::Duration;
use tracing_test::traced_test;

fn config() -> ClientConfig {
    ClientConfig::new("localhost", 4000).with_gmcp_ping_interval(None)
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn sb(option: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![IAC, SB, option];
    out.extend_from_slice(payload);
    out.extend_from_slice(&[IAC, SE]);
    out
}

fn output_text(events: &[SessionEvent]) -> String {
    let mut text = String::new();
    for event in events {
        if let SessionEvent::Output(display) = event {
            for item in display {
                match item {
                    DisplayEvent::Run(run) => text.push_str(&run.text),
                    DisplayEvent::LineBreak => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

// =============================================================================
// Terminal output
// =============================================================================

#[test]
fn hello_red_world() {
    let mut session = Session::new(&config()).unwrap();
    let events = session.on_bytes(b"Hello \x1b[31mRed\x1b[0m World\r\n");
    let SessionEvent::Output(display) = &events[0] else {
        panic!("expected output, got {events:?}");
    };
    let runs: Vec<_> = display
        .iter()
        .filter_map(|event| match event {
            DisplayEvent::Run(run) => Some((run.text.as_str(), run.style.fg)),
            _ => None,
        })
        .collect();
    assert_eq!(runs, vec![("Hello ", 7), ("Red", 1), (" World", 7)]);
    assert_eq!(display.last(), Some(&DisplayEvent::LineBreak));
    assert_eq!(*session.terminal().style(), StyleState::default());
}

#[test]
fn scrollback_follows_resize() {
    let mut session = Session::new(&config().with_scrollback(2, 10)).unwrap();
    let many: String = (0..100).map(|i| format!("line {i}\n")).collect();
    session.on_bytes(many.as_bytes());
    assert_eq!(session.terminal().scrollback().len(), 48);

    let events = session.resize(80, 10);
    assert_eq!(events, vec![SessionEvent::Output(vec![DisplayEvent::Evict(28)])]);
    assert_eq!(session.terminal().scrollback().len(), 20);
}

// =============================================================================
// CHARSET
// =============================================================================

#[test]
fn charset_accepted_utf8_switches_decoding() {
    let config = config().with_encodings(["UTF-8", "ISO-8859-1"], "ISO-8859-1");
    let mut session = Session::new(&config).unwrap();
    assert_eq!(session.encoding(), "ISO-8859-1");

    session.on_bytes(&[IAC, DO, option::CHARSET]);
    let mut expected = vec![IAC, WILL, option::CHARSET];
    expected.extend(sb(option::CHARSET, b"\x01;UTF-8;ISO-8859-1"));
    assert_eq!(&session.take_outbound()[..], &expected[..]);

    let mut bytes = sb(option::CHARSET, b"\x02UTF-8");
    bytes.extend_from_slice("café\r\n".as_bytes());
    let events = session.on_bytes(&bytes);
    assert_eq!(events[0], SessionEvent::EncodingChanged("UTF-8".to_string()));
    assert_eq!(output_text(&events), "café\n");
    assert_eq!(session.encoding(), "UTF-8");
}

#[test]
fn charset_server_request_is_answered_in_its_spelling() {
    let mut session = Session::new(&config()).unwrap();
    session.on_bytes(&[IAC, WILL, option::CHARSET]);
    session.take_outbound();

    let events = session.on_bytes(&sb(option::CHARSET, b"\x01 big5 utf8"));
    assert_eq!(events, vec![SessionEvent::EncodingChanged("UTF-8".to_string())]);
    assert_eq!(
        &session.take_outbound()[..],
        &sb(option::CHARSET, b"\x02utf8")[..]
    );
}

#[test]
fn charset_unknown_accepted_name_reports_error() {
    let mut session = Session::new(&config()).unwrap();
    let events = session.on_bytes(&sb(option::CHARSET, b"\x02X-KLINGON"));
    assert_eq!(
        events,
        vec![SessionEvent::Error(
            "Server selected an unsupported encoding: X-KLINGON".to_string()
        )]
    );
    assert_eq!(session.encoding(), "UTF-8");
}

// =============================================================================
// MCCP2
// =============================================================================

#[test]
fn compress2_start_and_data_in_one_buffer() {
    let mut session = Session::new(&config()).unwrap();
    session.on_bytes(&[IAC, WILL, option::COMPRESS2]);
    assert_eq!(&session.take_outbound()[..], &[IAC, DO, option::COMPRESS2]);

    let mut inner = b"Welcome\r\n".to_vec();
    inner.extend_from_slice(&[IAC, WILL, option::ECHO]);
    inner.extend_from_slice(b"Password: ");

    let mut bytes = b"plain ".to_vec();
    bytes.extend(sb(option::COMPRESS2, &[]));
    bytes.extend(zlib(&inner));
    let events = session.on_bytes(&bytes);

    assert_eq!(output_text(&events), "plain Welcome\nPassword: ");
    assert!(events.contains(&SessionEvent::EchoChanged(true)));
    assert_eq!(&session.take_outbound()[..], &[IAC, DO, option::ECHO]);
}

#[test]
fn compress2_stream_end_returns_to_plain() {
    let mut session = Session::new(&config()).unwrap();
    session.on_bytes(&[IAC, WILL, option::COMPRESS2]);

    let mut bytes = sb(option::COMPRESS2, &[]);
    bytes.extend(zlib(b"inside "));
    bytes.extend_from_slice(b"outside");
    let events = session.on_bytes(&bytes);
    assert_eq!(output_text(&events), "inside outside");

    let events = session.on_bytes(b" again");
    assert_eq!(output_text(&events), " again");
}

#[test]
fn compress2_split_across_deliveries() {
    let mut session = Session::new(&config()).unwrap();
    session.on_bytes(&[IAC, WILL, option::COMPRESS2]);

    let mut bytes = sb(option::COMPRESS2, &[]);
    bytes.extend(zlib(b"one two three four"));
    let text: String = bytes
        .iter()
        .map(|byte| output_text(&session.on_bytes(&[*byte])))
        .collect();
    assert_eq!(text, "one two three four");
}

#[test]
fn compress2_start_without_negotiation_is_ignored() {
    let mut session = Session::new(&config()).unwrap();
    let mut bytes = sb(option::COMPRESS2, &[]);
    bytes.extend_from_slice(b"still plain");
    let events = session.on_bytes(&bytes);
    assert_eq!(output_text(&events), "still plain");
}

#[test]
#[traced_test]
fn corrupt_compression_fails_open() {
    let mut session = Session::new(&config()).unwrap();
    session.on_bytes(&[IAC, WILL, option::COMPRESS2]);

    let mut bytes = sb(option::COMPRESS2, &[]);
    bytes.extend_from_slice(b"not zlib at all");
    let events = session.on_bytes(&bytes);
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::Error(message) if message.starts_with("Compression error:")
    )));
    assert!(logs_contain("Continuing uncompressed"));

    let events = session.on_bytes(b"still here");
    assert_eq!(output_text(&events), "still here");
}

// =============================================================================
// Reconnect
// =============================================================================

#[test]
fn reconnect_drops_partial_escape_and_style() {
    let mut session = Session::new(&config()).unwrap();
    session.connect();
    session.on_bytes(b"x\x1b[31");
    session.disconnect(true);
    session.connect();

    let events = session.on_bytes(b"mhello");
    assert_eq!(
        events,
        vec![SessionEvent::Output(vec![DisplayEvent::Run(StyledRun::new(
            "mhello",
            StyleState::default()
        ))])]
    );
}

#[test]
fn reconnect_drops_partial_character() {
    let mut session = Session::new(&config()).unwrap();
    session.connect();
    session.on_bytes(&[b'x', 0xE2, 0x98]);
    session.disconnect(true);
    session.connect();
    assert_eq!(output_text(&session.on_bytes(b"hi")), "hi");
}

#[test]
fn reconnect_restores_default_encoding() {
    let config = config().with_encodings(["UTF-8", "ISO-8859-1"], "ISO-8859-1");
    let mut session = Session::new(&config).unwrap();
    session.on_bytes(&[IAC, WILL, option::CHARSET]);
    session.on_bytes(&sb(option::CHARSET, b"\x01;UTF-8"));
    assert_eq!(session.encoding(), "UTF-8");

    let events = session.disconnect(true);
    assert_eq!(
        events,
        vec![
            SessionEvent::EncodingChanged("ISO-8859-1".to_string()),
            SessionEvent::Connection(ConnectionEvent::Disconnected { will_retry: true }),
        ]
    );
    assert_eq!(session.encoding(), "ISO-8859-1");
}

// =============================================================================
// GMCP
// =============================================================================

#[test]
fn gmcp_handshake_and_routing() {
    let router = GmcpRouter::builder()
        .route(
            "Char.Vitals",
            |_: &GmcpMessage, data: Option<&serde_json::Value>| {
                let hp = data?.get("hp")?.as_u64()?;
                Some(SessionEvent::Error(format!("hp {hp}")))
            },
        )
        .build();
    let config = config()
        .with_gmcp_client("TestClient", "1.2")
        .with_gmcp_supports(["Char 1"]);
    let mut session = Session::with_gmcp_router(&config, router).unwrap();

    session.on_bytes(&[IAC, WILL, option::GMCP]);
    let out = session.take_outbound();
    assert!(out.starts_with(&[IAC, DO, option::GMCP]));
    assert!(contains(
        &out,
        br#"Core.Hello {"client":"TestClient","version":"1.2"}"#
    ));
    assert!(contains(&out, br#"Core.Supports.Set ["Char 1"]"#));

    let events = session.on_bytes(&sb(option::GMCP, br#"char.vitals {"hp": 12}"#));
    assert_eq!(events, vec![SessionEvent::Error("hp 12".to_string())]);

    let events = session.on_bytes(&sb(option::GMCP, br#"Room.Info {"num": 1}"#));
    assert_eq!(
        events,
        vec![SessionEvent::Gmcp(GmcpMessage::new(
            "Room.Info",
            Some(r#"{"num": 1}"#)
        ))]
    );
}

#[test]
fn gmcp_keepalive_runs_only_while_connected() {
    let config = config().with_gmcp_ping_interval(Some(Duration::from_secs(30)));
    let mut session = Session::new(&config).unwrap();
    assert_eq!(session.next_deadline(), None);

    session.on_bytes(&[IAC, WILL, option::GMCP]);
    session.take_outbound();
    let deadline = session.next_deadline().expect("keep-alive armed");

    session.poll_timers(deadline);
    assert_eq!(
        &session.take_outbound()[..],
        &sb(option::GMCP, b"Core.Ping")[..]
    );
    assert_eq!(session.next_deadline(), Some(deadline + Duration::from_secs(30)));

    session.on_bytes(&sb(option::GMCP, b"Core.Ping"));
    assert!(session.round_trip().is_some());

    let events = session.disconnect(false);
    assert_eq!(
        events,
        vec![SessionEvent::Connection(ConnectionEvent::Disconnected {
            will_retry: false
        })]
    );
    assert_eq!(session.next_deadline(), None);
    assert_eq!(session.round_trip(), None);
}

// =============================================================================
// Fragmentation
// =============================================================================

fn transcript() -> Vec<u8> {
    let mut bytes = b"\x1b[1;32mWelcome\x1b[0m to the ".to_vec();
    bytes.extend_from_slice(&[IAC, WILL, option::SGA, IAC, DO, option::TTYPE]);
    bytes.extend_from_slice("realm of caf\u{e9}\r\n".as_bytes());
    bytes.extend(sb(option::TTYPE, &[1]));
    bytes.extend_from_slice(&[IAC, WILL, option::GMCP]);
    bytes.extend(sb(option::GMCP, br#"Room.Info {"name": "Gate"}"#));
    bytes.extend_from_slice(b"\x1b[33mA \xFF\xFF sign\x1b[0m\r\n> ");
    bytes
}

fn replay(chunks: &[&[u8]]) -> (Vec<String>, Vec<u8>, usize) {
    let mut session = Session::new(&config()).unwrap();
    let mut gmcp = 0;
    for chunk in chunks {
        for event in session.on_bytes(chunk) {
            if matches!(event, SessionEvent::Gmcp(_)) {
                gmcp += 1;
            }
        }
    }
    let mut lines = session.terminal().scrollback().plain_lines();
    lines.push(
        session
            .terminal()
            .scrollback()
            .pending()
            .iter()
            .map(|run| run.text.as_str())
            .collect(),
    );
    (lines, session.take_outbound().to_vec(), gmcp)
}

proptest! {
    #[test]
    fn split_points_do_not_change_results(a in 0usize..200, b in 0usize..200) {
        let bytes = transcript();
        let (lo, hi) = {
            let a = a % (bytes.len() + 1);
            let b = b % (bytes.len() + 1);
            (a.min(b), a.max(b))
        };
        let whole = replay(&[&bytes]);
        let split = replay(&[&bytes[..lo], &bytes[lo..hi], &bytes[hi..]]);
        prop_assert_eq!(whole, split);
    }
}
