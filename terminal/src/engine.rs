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

use crate::{DisplayEvent, Scrollback, ScrollbackConfig, StyledRun, TerminalResult};
use mudlink_ansicodec::{AnsiParser, AnsiSequence, ControlSequence, StyleState};

/// Cursor commands that make no sense for an append-only scrollback.
const UNSUPPORTED: &[char] = &['A', 'B', 'D', 'F', 'G', 'S', 'T', 'n', 's', 'u', 'l', 'h'];

/// Turns decoded server text into display events.
///
/// MUD output is treated as an append-only stream of lines. The handful of
/// cursor and erase commands MUDs actually use are approximated: home plus
/// erase-display clears the screen, erase-line drops the current line, and
/// forward motion becomes spaces.
#[derive(Debug)]
pub struct AnsiTerminalEngine {
    parser: AnsiParser,
    style: StyleState,
    scrollback: Scrollback,
    ready_to_clear: bool,
    warned_unsupported: bool,
}

impl AnsiTerminalEngine {
    /// Engine with the given retention policy.
    pub fn new(config: ScrollbackConfig) -> TerminalResult<Self> {
        Ok(AnsiTerminalEngine {
            parser: AnsiParser::new(),
            style: StyleState::default(),
            scrollback: Scrollback::new(config)?,
            ready_to_clear: false,
            warned_unsupported: false,
        })
    }

    /// Style applied to the next character.
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Rendered history.
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// Interpret a chunk of decoded text.
    pub fn feed(&mut self, text: &str) -> Vec<DisplayEvent> {
        let mut events = Vec::new();
        for sequence in self.parser.feed(text) {
            match sequence {
                AnsiSequence::Text(text) => self.write(&mut events, text),
                AnsiSequence::Control(ch) => self.control(&mut events, ch),
                AnsiSequence::Csi(csi) => self.csi(&mut events, &csi),
                AnsiSequence::Osc(body) => tracing::debug!(%body, "Ignoring OSC"),
                AnsiSequence::Escape(ch) => tracing::debug!(?ch, "Ignoring escape"),
                AnsiSequence::Str => {}
            }
        }
        events
    }

    /// Change the viewport height.
    pub fn set_viewport_rows(&mut self, rows: usize) -> Option<DisplayEvent> {
        match self.scrollback.set_viewport_rows(rows) {
            0 => None,
            evicted => Some(DisplayEvent::Evict(evicted)),
        }
    }

    /// Forget style and any partial sequence. History is kept.
    pub fn reset_stream(&mut self) {
        self.parser.clear();
        self.style.reset();
        self.ready_to_clear = false;
    }

    /// Forget style, partial sequences and history.
    pub fn reset(&mut self) {
        self.parser.clear();
        self.style.reset();
        self.scrollback.clear();
        self.ready_to_clear = false;
    }

    fn write(&mut self, events: &mut Vec<DisplayEvent>, text: String) {
        self.ready_to_clear = false;
        self.scrollback.push_run(StyledRun::new(text.clone(), self.style));
        match events.last_mut() {
            Some(DisplayEvent::Run(last)) if last.style == self.style => last.text.push_str(&text),
            _ => events.push(DisplayEvent::Run(StyledRun::new(text, self.style))),
        }
    }

    fn line_break(&mut self, events: &mut Vec<DisplayEvent>) {
        events.push(DisplayEvent::LineBreak);
        let evicted = self.scrollback.break_line();
        if evicted > 0 {
            events.push(DisplayEvent::Evict(evicted));
        }
    }

    fn control(&mut self, events: &mut Vec<DisplayEvent>, ch: char) {
        match ch {
            '\n' => self.line_break(events),
            '\x07' => events.push(DisplayEvent::Bell),
            '\t' => self.write(events, "\t".to_string()),
            _ => {}
        }
    }

    fn csi(&mut self, events: &mut Vec<DisplayEvent>, csi: &ControlSequence) {
        if csi.private.is_some() || !csi.intermediates.is_empty() {
            tracing::debug!(?csi, "Ignoring private control sequence");
            return;
        }
        match csi.final_char {
            'm' => self.style.apply_sgr(&csi.sgr_params()),
            'H' | 'f' => {
                self.ready_to_clear = csi.param(0, 1) <= 1 && csi.param(1, 1) <= 1;
            }
            'J' => match csi.param(0, 0) {
                2 => self.clear(events),
                0 if self.ready_to_clear => self.clear(events),
                mode => tracing::debug!(mode, "Ignoring erase in display"),
            },
            'K' => match csi.param(0, 0) {
                2 => {
                    if self.scrollback.erase_line() {
                        events.push(DisplayEvent::EraseLine);
                    }
                }
                mode => tracing::debug!(mode, "Ignoring erase in line"),
            },
            '@' | 'C' => {
                let count = usize::from(csi.param(0, 1).max(1));
                self.write(events, " ".repeat(count));
            }
            'E' => {
                for _ in 0..csi.param(0, 1).max(1) {
                    self.line_break(events);
                }
            }
            ch if UNSUPPORTED.contains(&ch) => {
                if !self.warned_unsupported {
                    self.warned_unsupported = true;
                    tracing::warn!(
                        command = %ch,
                        "Cursor addressing is not supported; further occurrences are ignored silently"
                    );
                }
            }
            ch => tracing::debug!(command = %ch, "Unknown control sequence"),
        }
    }

    fn clear(&mut self, events: &mut Vec<DisplayEvent>) {
        self.scrollback.clear();
        self.style.reset();
        self.ready_to_clear = false;
        events.push(DisplayEvent::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn engine() -> AnsiTerminalEngine {
        AnsiTerminalEngine::new(ScrollbackConfig::default()).unwrap()
    }

    fn red() -> StyleState {
        StyleState {
            fg: 1,
            ..StyleState::default()
        }
    }

    fn run(text: &str, style: StyleState) -> DisplayEvent {
        DisplayEvent::Run(StyledRun::new(text, style))
    }

    // ===========================================================================
    // Text and Styles
    // ===========================================================================

    #[test]
    fn test_hello_red_world() {
        let mut engine = engine();
        assert_eq!(
            engine.feed("Hello\x1B[31mRed\x1B[0m World\r\n"),
            vec![
                run("Hello", StyleState::default()),
                run("Red", red()),
                run(" World", StyleState::default()),
                DisplayEvent::LineBreak,
            ]
        );
        assert_eq!(engine.scrollback().plain_lines(), vec!["Hello Red World"]);
    }

    #[test]
    fn test_style_persists_across_feeds() {
        let mut engine = engine();
        engine.feed("\x1b[31");
        assert_eq!(engine.feed("mstill red"), vec![run("still red", red())]);
        assert_eq!(engine.feed("\x1b[m"), Vec::<DisplayEvent>::new());
        assert!(engine.style().is_default());
    }

    #[test]
    fn test_bare_newline_and_lone_cr() {
        let mut engine = engine();
        assert_eq!(
            engine.feed("a\nb\rc"),
            vec![
                run("a", StyleState::default()),
                DisplayEvent::LineBreak,
                run("bc", StyleState::default()),
            ]
        );
    }

    #[test]
    fn test_newline_inside_sequence_still_breaks() {
        let mut engine = engine();
        assert_eq!(
            engine.feed("a\x1b[\nmb"),
            vec![
                run("a", StyleState::default()),
                DisplayEvent::LineBreak,
                run("b", StyleState::default()),
            ]
        );
    }

    #[test]
    fn test_reset_stream_keeps_history() {
        let mut engine = engine();
        engine.feed("kept\r\nx\x1b[31");
        engine.reset_stream();
        assert_eq!(engine.feed("mhello"), vec![run("mhello", StyleState::default())]);
        assert_eq!(engine.scrollback().plain_lines()[0], "kept");
    }

    #[test]
    fn test_bell_and_tab() {
        let mut engine = engine();
        assert_eq!(
            engine.feed("\x07x\ty"),
            vec![DisplayEvent::Bell, run("x\ty", StyleState::default())]
        );
    }

    // ===========================================================================
    // Cursor Approximations
    // ===========================================================================

    #[test]
    fn test_home_then_erase_below_clears() {
        let mut engine = engine();
        engine.feed("\x1b[1mold\r\n");
        assert_eq!(engine.feed("\x1b[H\x1b[J"), vec![DisplayEvent::Clear]);
        assert!(engine.scrollback().is_empty());
        assert!(engine.style().is_default());
    }

    #[test]
    fn test_erase_below_without_home_is_ignored() {
        let mut engine = engine();
        engine.feed("old\r\n");
        assert_eq!(engine.feed("\x1b[J"), Vec::<DisplayEvent>::new());
        assert_eq!(engine.feed("\x1b[5;10H\x1b[0J"), Vec::<DisplayEvent>::new());
        assert_eq!(engine.scrollback().len(), 1);
    }

    #[test]
    fn test_erase_display_two_clears() {
        let mut engine = engine();
        engine.feed("old\r\n");
        assert_eq!(engine.feed("\x1b[2J"), vec![DisplayEvent::Clear]);
    }

    #[test]
    fn test_erase_line() {
        let mut engine = engine();
        engine.feed("kept\r\nprompt> ");
        assert_eq!(engine.feed("\x1b[2K"), vec![DisplayEvent::EraseLine]);
        assert!(engine.scrollback().pending().is_empty());
        assert_eq!(engine.scrollback().len(), 1);
        assert_eq!(engine.feed("\x1b[2K"), vec![DisplayEvent::EraseLine]);
        assert_eq!(engine.scrollback().len(), 0);
        assert_eq!(engine.feed("\x1b[2K"), Vec::<DisplayEvent>::new());
    }

    #[test]
    fn test_forward_and_next_line() {
        let mut engine = engine();
        assert_eq!(
            engine.feed("a\x1b[3Cb\x1b[@c"),
            vec![run("a   b c", StyleState::default())]
        );
        assert_eq!(
            engine.feed("\x1b[2E"),
            vec![DisplayEvent::LineBreak, DisplayEvent::LineBreak]
        );
    }

    #[test]
    #[traced_test]
    fn test_unsupported_warns_once() {
        let mut engine = engine();
        engine.feed("\x1b[2A\x1b[s\x1b[u");
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("Cursor addressing is not supported"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one warning, got {n}")),
            }
        });
    }

    // ===========================================================================
    // Scrollback
    // ===========================================================================

    #[test]
    fn test_eviction_events() {
        let mut engine = AnsiTerminalEngine::new(ScrollbackConfig {
            viewport_rows: 2,
            screens: 1,
            min_lines: 0,
        })
        .unwrap();
        let events = engine.feed("1\n2\n3\n");
        assert_eq!(events.last(), Some(&DisplayEvent::Evict(1)));
        assert_eq!(engine.scrollback().plain_lines(), vec!["2", "3"]);
        engine.feed("4\n");
        assert_eq!(engine.set_viewport_rows(1), Some(DisplayEvent::Evict(1)));
        assert_eq!(engine.set_viewport_rows(1), None);
    }
}
