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

use crate::format::{self, format_template};
use crate::gmcp::GmcpRouter;
use crate::options;
use crate::{ClientConfig, ClientResult, ConnectionEvent, SessionEvent};
use bytes::{Bytes, BytesMut};
use mudlink_charset::EncodingCodec;
use mudlink_compress::{CompressError, CompressionStage, Inflated};
use mudlink_telnetcodec::consts::option;
use mudlink_telnetcodec::gmcp::GmcpMessage;
use mudlink_telnetcodec::msdp;
use mudlink_telnetcodec::{
    Frame, FrameDemuxer, IacSink, OptionNegotiator, OptionState, TelnetCommand, TelnetEncoder,
    TelnetSide,
};
use mudlink_terminal::AnsiTerminalEngine;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace, warn};

/// Source of the terminal size reported through NAWS.
pub trait ViewportProvider {
    /// Current `(columns, rows)`.
    fn viewport_size(&self) -> (u16, u16);
}

///
/// Per-connection services the option handlers work against.
///
/// Owns the outbound queue, the event queue and the parts of the pipeline
/// negotiation can reconfigure (encoding and compression).
///
#[derive(Debug)]
pub(crate) struct Host {
    outbound: BytesMut,
    events: Vec<SessionEvent>,
    viewport: (u16, u16),
    pub(crate) codec: EncodingCodec,
    pub(crate) compression: CompressionStage,
    pub(crate) round_trip: Option<Duration>,
}

impl IacSink for Host {
    fn send_iac(&mut self, bytes: &[u8]) {
        self.outbound.extend_from_slice(bytes);
    }
}

impl ViewportProvider for Host {
    fn viewport_size(&self) -> (u16, u16) {
        self.viewport
    }
}

impl Host {
    pub(crate) fn negotiate(&mut self, command: TelnetCommand, option: u8) {
        TelnetEncoder::negotiate(command, option, &mut self.outbound);
    }

    pub(crate) fn subnegotiate(&mut self, option: u8, payload: &[u8]) {
        TelnetEncoder::subnegotiate(option, payload, &mut self.outbound);
    }

    pub(crate) fn send_gmcp(&mut self, message: &GmcpMessage) {
        self.subnegotiate(option::GMCP, &message.to_bytes());
    }

    /// Queue an event. Adjacent output batches are merged.
    pub(crate) fn emit(&mut self, event: SessionEvent) {
        if let SessionEvent::Output(display) = event {
            if display.is_empty() {
                return;
            }
            if let Some(SessionEvent::Output(last)) = self.events.last_mut() {
                last.extend(display);
            } else {
                self.events.push(SessionEvent::Output(display));
            }
        } else {
            self.events.push(event);
        }
    }
}

///
/// The single-threaded core of one MUD connection.
///
/// Inbound bytes pass through decompression, Telnet framing, option
/// negotiation, character decoding and the ANSI terminal engine, in that
/// order. Everything the server must see is queued for
/// [`Session::take_outbound`].
///
/// ```
/// use mudlink_client::{ClientConfig, Session, SessionEvent};
///
/// let mut session = Session::new(&ClientConfig::default()).unwrap();
/// let events = session.on_bytes(b"Hello\r\n");
/// assert!(matches!(events[0], SessionEvent::Output(_)));
///
/// session.send_line("look");
/// assert_eq!(&session.take_outbound()[..], b"look\r\n");
/// ```
///
pub struct Session {
    demux: FrameDemuxer,
    negotiator: OptionNegotiator<Host>,
    host: Host,
    engine: AnsiTerminalEngine,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("encoding", &self.encoding())
            .field("compressing", &self.host.compression.is_active())
            .field("viewport", &self.host.viewport)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with the default GMCP routes.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Self::with_gmcp_router(config, GmcpRouter::with_defaults().build())
    }

    /// Create a session that routes GMCP through `router`.
    pub fn with_gmcp_router(config: &ClientConfig, router: GmcpRouter) -> ClientResult<Self> {
        let providers = mudlink_charset::builtin_providers();
        let codec = EncodingCodec::new(
            providers,
            config.encoding_preferences.clone(),
            &config.default_encoding,
        )?;
        let engine = AnsiTerminalEngine::new(config.scrollback_config())?;
        Ok(Self {
            demux: FrameDemuxer::with_max_subnegotiation_len(config.max_subnegotiation_len),
            negotiator: options::negotiator(config, router),
            host: Host {
                outbound: BytesMut::new(),
                events: Vec::new(),
                viewport: (config.terminal_width, config.terminal_height),
                codec,
                compression: CompressionStage::new(),
                round_trip: None,
            },
            engine,
        })
    }

    /// Feed bytes read from the transport.
    #[instrument(skip_all, fields(len = bytes.len()))]
    pub fn on_bytes(&mut self, bytes: &[u8]) -> Vec<SessionEvent> {
        let plain = self.inflate(bytes);
        self.demux.extend(&plain);
        while let Some(frame) = self.demux.next_frame() {
            let was_compressing = self.host.compression.is_active();
            self.dispatch(frame);
            if !was_compressing && self.host.compression.is_active() {
                // Whatever followed the start marker is compressed.
                let rest = self.demux.take_pending();
                let plain = self.inflate(&rest);
                self.demux.extend(&plain);
            }
        }
        self.take_events()
    }

    /// Encode and queue `text` without a line terminator.
    pub fn send_text(&mut self, text: &str) {
        let encoded = self.host.codec.encode(text);
        TelnetEncoder::escape_into(&encoded, &mut self.host.outbound);
    }

    /// Encode and queue `text` followed by CR LF.
    pub fn send_line(&mut self, text: &str) {
        self.send_text(text);
        self.host.outbound.extend_from_slice(b"\r\n");
    }

    /// Queue a GMCP message. Returns `false` when GMCP is not enabled.
    pub fn send_gmcp(&mut self, message: &GmcpMessage) -> bool {
        if !self.negotiator.is_enabled(option::GMCP, TelnetSide::Remote) {
            return false;
        }
        self.host.send_gmcp(message);
        true
    }

    /// Queue an MSDP command such as `REPORT`. Returns `false` when MSDP is
    /// not enabled.
    pub fn send_msdp(&mut self, command: &str, arguments: &[&str]) -> bool {
        if !self.negotiator.is_enabled(option::MSDP, TelnetSide::Remote) {
            return false;
        }
        self.host
            .subnegotiate(option::MSDP, &msdp::command(command, arguments));
        true
    }

    /// Whether outbound bytes are waiting.
    pub fn has_outbound(&self) -> bool {
        !self.host.outbound.is_empty()
    }

    /// Drain everything queued for the transport.
    pub fn take_outbound(&mut self) -> Bytes {
        self.host.outbound.split().freeze()
    }

    /// The transport connected.
    pub fn connect(&mut self) -> Vec<SessionEvent> {
        info!("Session connected");
        self.demux.reset();
        self.negotiator.connect(&mut self.host);
        self.host
            .emit(SessionEvent::Connection(ConnectionEvent::Connected));
        self.take_events()
    }

    /// The transport closed. Negotiated state, timers, the encoding and any
    /// partial escape sequence are dropped. Scrollback is kept.
    pub fn disconnect(&mut self, will_retry: bool) -> Vec<SessionEvent> {
        info!("Session disconnected (will_retry: {})", will_retry);
        self.negotiator.disconnect(&mut self.host);
        self.host.compression.disable();
        self.demux.reset();
        self.host.outbound.clear();
        self.host.round_trip = None;
        let previous = self.host.codec.current().id().to_string();
        self.host.codec.reset();
        if self.host.codec.current().id() != previous {
            let name = self.host.codec.current().proper_name().to_string();
            self.host.emit(SessionEvent::EncodingChanged(name));
        }
        self.engine.reset_stream();
        self.host
            .emit(SessionEvent::Connection(ConnectionEvent::Disconnected { will_retry }));
        self.take_events()
    }

    /// The viewport changed size.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Vec<SessionEvent> {
        if self.host.viewport == (cols, rows) {
            return Vec::new();
        }
        debug!("Viewport resized to {}x{}", cols, rows);
        self.host.viewport = (cols, rows);
        if self.negotiator.is_enabled(option::NAWS, TelnetSide::Local) {
            options::report_window_size(&mut self.host);
        }
        if let Some(event) = self.engine.set_viewport_rows(usize::from(rows)) {
            self.host.emit(SessionEvent::Output(vec![event]));
        }
        self.take_events()
    }

    /// Earliest instant [`Session::poll_timers`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.negotiator.next_deadline()
    }

    /// Run handler timers due at `now`.
    pub fn poll_timers(&mut self, now: Instant) -> Vec<SessionEvent> {
        self.negotiator.poll_timers(&mut self.host, now);
        self.take_events()
    }

    /// Negotiation state of `option`.
    pub fn option_state(&self, option: u8) -> OptionState {
        self.negotiator.state(option)
    }

    /// Proper name of the active encoding.
    pub fn encoding(&self) -> &str {
        self.host.codec.current().proper_name()
    }

    /// Last measured GMCP keep-alive round trip.
    pub fn round_trip(&self) -> Option<Duration> {
        self.host.round_trip
    }

    /// The terminal engine and its scrollback.
    pub fn terminal(&self) -> &AnsiTerminalEngine {
        &self.engine
    }

    fn dispatch(&mut self, frame: Frame) {
        match frame {
            Frame::Text(bytes) => {
                let text = self.host.codec.feed(&bytes);
                if !text.is_empty() {
                    let display = self.engine.feed(&text);
                    self.host.emit(SessionEvent::Output(display));
                }
            }
            Frame::Command(command, option) => {
                self.negotiator
                    .handle_command(&mut self.host, command, option);
            }
            Frame::Subnegotiation(option, payload) => {
                trace!("SB {} ({} bytes)", option, payload.len());
                self.negotiator
                    .handle_subnegotiation(&mut self.host, option, &payload);
            }
        }
    }

    /// Run `bytes` through the compression stage. Plain bytes come back
    /// unchanged. A corrupt stream is dropped and the rest of the delivery
    /// is treated as plain.
    fn inflate(&mut self, bytes: &[u8]) -> Vec<u8> {
        if !self.host.compression.is_active() || bytes.is_empty() {
            return bytes.to_vec();
        }
        match self.host.compression.feed(bytes) {
            Ok(Inflated { mut data, trailing }) => {
                if let Some(trailing) = trailing {
                    debug!("Compression ended, {} plain bytes follow", trailing.len());
                    data.extend_from_slice(&trailing);
                }
                data
            }
            Err(CompressError::Corrupt {
                source,
                mut inflated,
                remaining,
            }) => {
                warn!("Continuing uncompressed after: {}", source);
                let reason = source.to_string();
                self.host.emit(SessionEvent::Error(format_template(
                    format::COMPRESSION_ERROR,
                    &[&reason],
                    &[],
                )));
                inflated.extend_from_slice(&remaining);
                inflated
            }
        }
    }

    fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.host.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudlink_telnetcodec::consts::{DO, IAC, SB, SE, WILL, WONT};
    use mudlink_terminal::{DisplayEvent, StyleState, StyledRun};

    fn session() -> Session {
        Session::new(&ClientConfig::default().with_gmcp_ping_interval(None)).unwrap()
    }

    fn text_of(events: &[SessionEvent]) -> String {
        events
            .iter()
            .filter_map(|event| match event {
                SessionEvent::Output(display) => Some(display),
                _ => None,
            })
            .flatten()
            .filter_map(|event| match event {
                DisplayEvent::Run(run) => Some(run.text.clone()),
                DisplayEvent::LineBreak => Some("\n".to_string()),
                _ => None,
            })
            .collect()
    }

    // ===========================================================================
    // Text
    // ===========================================================================

    #[test]
    fn test_text_becomes_output() {
        let mut session = session();
        let events = session.on_bytes(b"Hello\r\nWorld");
        assert_eq!(
            events,
            vec![SessionEvent::Output(vec![
                DisplayEvent::Run(StyledRun::new("Hello", StyleState::default())),
                DisplayEvent::LineBreak,
                DisplayEvent::Run(StyledRun::new("World", StyleState::default())),
            ])]
        );
    }

    #[test]
    fn test_output_around_negotiation_is_merged() {
        let mut session = session();
        let events = session.on_bytes(&[b'a', IAC, WILL, option::SGA, b'b']);
        assert_eq!(events.len(), 1);
        assert_eq!(text_of(&events), "ab");
        assert_eq!(&session.take_outbound()[..], &[IAC, DO, option::SGA]);
    }

    #[test]
    fn test_send_line_escapes_iac() {
        let mut session = Session::new(
            &ClientConfig::default().with_encodings(["ISO-8859-1"], "ISO-8859-1"),
        )
        .unwrap();
        session.send_line("\u{ff}");
        assert_eq!(&session.take_outbound()[..], &[0xFF, 0xFF, b'\r', b'\n']);
        assert!(!session.has_outbound());
    }

    // ===========================================================================
    // Negotiation
    // ===========================================================================

    #[test]
    fn test_naws_reports_and_resizes() {
        let mut session = session();
        session.on_bytes(&[IAC, DO, option::NAWS]);
        assert_eq!(
            &session.take_outbound()[..],
            &[IAC, WILL, option::NAWS, IAC, SB, option::NAWS, 0, 80, 0, 24, IAC, SE]
        );

        session.resize(255, 40);
        assert_eq!(
            &session.take_outbound()[..],
            &[IAC, SB, option::NAWS, 0, 255, 255, 0, 40, IAC, SE]
        );
        assert!(session.resize(255, 40).is_empty());
        assert!(!session.has_outbound());
    }

    #[test]
    fn test_resize_without_naws_sends_nothing() {
        let mut session = session();
        session.resize(100, 30);
        assert!(!session.has_outbound());
    }

    #[test]
    fn test_ttype_cycle() {
        let mut session = Session::new(
            &ClientConfig::default()
                .with_terminal_types(["ONE", "TWO"])
                .with_gmcp_ping_interval(None),
        )
        .unwrap();
        session.on_bytes(&[IAC, DO, option::TTYPE]);
        session.take_outbound();

        let send = [IAC, SB, option::TTYPE, 1, IAC, SE];
        let mut names = Vec::new();
        for _ in 0..3 {
            session.on_bytes(&send);
            let out = session.take_outbound();
            names.push(String::from_utf8_lossy(&out[4..out.len() - 2]).into_owned());
        }
        assert_eq!(names, vec!["ONE", "TWO", "TWO"]);
    }

    #[test]
    fn test_echo_toggles() {
        let mut session = session();
        assert_eq!(
            session.on_bytes(&[IAC, WILL, option::ECHO]),
            vec![SessionEvent::EchoChanged(true)]
        );
        assert_eq!(
            session.on_bytes(&[IAC, WONT, option::ECHO]),
            vec![SessionEvent::EchoChanged(false)]
        );
    }

    #[test]
    fn test_disconnect_reports_echo_off_and_resets_state() {
        let mut session = session();
        session.on_bytes(&[IAC, WILL, option::ECHO]);
        let events = session.disconnect(true);
        assert_eq!(
            events,
            vec![
                SessionEvent::EchoChanged(false),
                SessionEvent::Connection(ConnectionEvent::Disconnected { will_retry: true }),
            ]
        );
        assert!(!session.option_state(option::ECHO).enabled_remote);
    }

    #[test]
    fn test_charset_request_rejected_when_nothing_fits() {
        let mut session = session();
        session.on_bytes(&[IAC, WILL, option::CHARSET]);
        session.take_outbound();
        let mut request = vec![IAC, SB, option::CHARSET, 1];
        request.extend_from_slice(b";X-NOPE");
        request.extend_from_slice(&[IAC, SE]);
        assert!(session.on_bytes(&request).is_empty());
        assert_eq!(
            &session.take_outbound()[..],
            &[IAC, SB, option::CHARSET, 3, IAC, SE]
        );
        assert_eq!(session.encoding(), "UTF-8");
    }

    #[test]
    fn test_msdp_event() {
        let mut session = session();
        session.on_bytes(&[IAC, WILL, option::MSDP]);
        assert!(session.send_msdp("REPORT", &["HEALTH"]));
        session.take_outbound();

        let mut frame = vec![IAC, SB, option::MSDP, 1];
        frame.extend_from_slice(b"HEALTH");
        frame.push(2);
        frame.extend_from_slice(b"99");
        frame.extend_from_slice(&[IAC, SE]);
        assert_eq!(
            session.on_bytes(&frame),
            vec![SessionEvent::Msdp(vec![(
                "HEALTH".to_string(),
                msdp::MsdpValue::string("99")
            )])]
        );
    }

    #[test]
    fn test_zmp_ping_and_check() {
        let mut session = session();
        session.on_bytes(&[IAC, WILL, option::ZMP]);
        session.take_outbound();

        let mut check = vec![IAC, SB, option::ZMP];
        check.extend_from_slice(b"zmp.check\0zmp.\0");
        check.extend_from_slice(&[IAC, SE]);
        session.on_bytes(&check);
        let out = session.take_outbound();
        assert_eq!(&out[3..out.len() - 2], b"zmp.support\0zmp.\0");

        let mut ping = vec![IAC, SB, option::ZMP];
        ping.extend_from_slice(b"zmp.ping\0");
        ping.extend_from_slice(&[IAC, SE]);
        session.on_bytes(&ping);
        let out = session.take_outbound();
        assert!(out[3..].starts_with(b"zmp.time\0"));
        let stamp = std::str::from_utf8(&out[12..out.len() - 3]).unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());

        let mut custom = vec![IAC, SB, option::ZMP];
        custom.extend_from_slice(b"color.define\0red\0");
        custom.extend_from_slice(&[IAC, SE]);
        assert!(matches!(
            &session.on_bytes(&custom)[..],
            [SessionEvent::Zmp(command)] if command.name == "color.define"
        ));
    }

    #[test]
    fn test_send_gmcp_requires_option() {
        let mut session = session();
        assert!(!session.send_gmcp(&GmcpMessage::command("Char.Skills.Get")));
        session.on_bytes(&[IAC, WILL, option::GMCP]);
        session.take_outbound();
        assert!(session.send_gmcp(&GmcpMessage::command("Char.Skills.Get")));
        assert_eq!(&session.take_outbound()[3..18], b"Char.Skills.Get");
    }
}
