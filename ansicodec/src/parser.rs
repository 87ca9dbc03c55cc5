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

use crate::consts::{BEL, ESC, MAX_PARAMETER_COUNT, MAX_SEQUENCE_LENGTH};
use crate::{AnsiError, AnsiResult};

/// Internal state machine states for the ANSI parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Plain text.
    Ground,
    /// After ESC, waiting for the byte that picks the sequence type.
    Escape,
    /// Inside `ESC [ <params> <intermediates> <final>`.
    Csi,
    /// Inside `ESC ] <data>`, terminated by BEL or `ESC \`.
    Osc,
    /// Inside a DCS, SOS, PM or APC string, terminated by `ESC \`.
    Str,
    /// Saw ESC inside an OSC or other string; `\` ends it.
    StrEscape { osc: bool },
}

/// A parsed CSI sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlSequence {
    /// Numeric parameters; `None` where the parameter was empty.
    pub params: Vec<Option<u16>>,
    /// Private marker such as `?` in `ESC [ ? 25 h`.
    pub private: Option<char>,
    /// Intermediate characters (0x20 to 0x2F).
    pub intermediates: String,
    /// The final character (0x40 to 0x7E) naming the command.
    pub final_char: char,
}

impl ControlSequence {
    /// Parameter `index`, or `default` when absent or empty.
    pub fn param(&self, index: usize, default: u16) -> u16 {
        self.params.get(index).copied().flatten().unwrap_or(default)
    }

    /// Parameters as SGR codes: empty entries read as `0`, and `ESC [ m`
    /// yields an empty list.
    pub fn sgr_params(&self) -> Vec<u16> {
        self.params.iter().map(|p| p.unwrap_or(0)).collect()
    }

    /// Whether this is Select Graphic Rendition.
    pub fn is_sgr(&self) -> bool {
        self.final_char == 'm' && self.private.is_none() && self.intermediates.is_empty()
    }

    fn parse(body: &str, final_char: char) -> ControlSequence {
        let mut sequence = ControlSequence {
            final_char,
            ..ControlSequence::default()
        };
        let mut params = body;
        if let Some(first) = params.chars().next().filter(|c| matches!(c, '<'..='?')) {
            sequence.private = Some(first);
            params = &params[1..];
        }
        let split = params
            .find(|c: char| ('\x20'..='\x2F').contains(&c))
            .unwrap_or(params.len());
        sequence.intermediates = params[split..].to_string();
        let params = &params[..split];
        if !params.is_empty() {
            sequence.params = params
                .split([';', ':'])
                .take(MAX_PARAMETER_COUNT)
                .map(|p| {
                    if p.is_empty() {
                        None
                    } else {
                        Some(
                            p.bytes().filter(u8::is_ascii_digit).fold(0u16, |acc, d| {
                                acc.saturating_mul(10).saturating_add(u16::from(d - b'0'))
                            }),
                        )
                    }
                })
                .collect();
        }
        sequence
    }
}

/// One unit of parsed terminal output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnsiSequence {
    /// A run of printable text.
    Text(String),
    /// A C0 or C1 control character other than ESC.
    Control(char),
    /// A complete CSI sequence.
    Csi(ControlSequence),
    /// Operating System Command payload.
    Osc(String),
    /// A two-character escape such as `ESC 7` or `ESC c`.
    Escape(char),
    /// A DCS, SOS, PM or APC string. Content is discarded.
    Str,
}

/// Streaming ANSI parser.
///
/// Works on decoded text, so multi-byte characters never need to be
/// reassembled here. Any sequence left incomplete at the end of a
/// [`AnsiParser::feed`] call is kept for the next call.
#[derive(Clone, Debug)]
pub struct AnsiParser {
    /// Accumulated body of the sequence being parsed.
    buffer: String,
    state: State,
}

impl Default for AnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiParser {
    /// Creates a parser in the ground state.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            state: State::Ground,
        }
    }

    /// Discard any partial sequence.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::Ground;
    }

    /// Whether a sequence is in progress.
    pub fn in_sequence(&self) -> bool {
        self.state != State::Ground
    }

    /// Parse a chunk of text. Runs of printable characters are merged.
    ///
    /// Over-long sequences are abandoned with a warning and parsing resumes
    /// in the ground state.
    pub fn feed(&mut self, text: &str) -> Vec<AnsiSequence> {
        let mut out = Vec::new();
        let mut run = String::new();
        for ch in text.chars() {
            if self.state == State::Ground && ch != ESC && !is_control(ch) {
                run.push(ch);
                continue;
            }
            match self.next(ch) {
                Ok(Some(AnsiSequence::Text(t))) => run.push_str(&t),
                Ok(Some(sequence)) => {
                    if !run.is_empty() {
                        out.push(AnsiSequence::Text(std::mem::take(&mut run)));
                    }
                    out.push(sequence);
                }
                Ok(None) => {}
                Err(error) => tracing::warn!(%error, "Abandoned escape sequence"),
            }
        }
        if !run.is_empty() {
            out.push(AnsiSequence::Text(run));
        }
        out
    }

    /// Process one character.
    ///
    /// Returns `Ok(None)` while a sequence is still incomplete.
    pub fn next(&mut self, ch: char) -> AnsiResult<Option<AnsiSequence>> {
        if self.buffer.len() >= MAX_SEQUENCE_LENGTH {
            let error = AnsiError::SequenceTooLong {
                length: self.buffer.len(),
                max: MAX_SEQUENCE_LENGTH,
            };
            self.clear();
            return Err(error);
        }

        match self.state {
            State::Ground => Ok(self.process_ground(ch)),
            State::Escape => Ok(self.process_escape(ch)),
            State::Csi => self.process_csi(ch),
            State::Osc => Ok(self.process_string(ch, true)),
            State::Str => Ok(self.process_string(ch, false)),
            State::StrEscape { osc } => Ok(self.process_string_escape(ch, osc)),
        }
    }

    fn process_ground(&mut self, ch: char) -> Option<AnsiSequence> {
        match ch {
            ESC => {
                self.state = State::Escape;
                self.buffer.clear();
                None
            }
            _ if is_control(ch) => Some(AnsiSequence::Control(ch)),
            _ => Some(AnsiSequence::Text(ch.to_string())),
        }
    }

    fn process_escape(&mut self, ch: char) -> Option<AnsiSequence> {
        self.state = State::Ground;
        match ch {
            '[' => {
                self.state = State::Csi;
                None
            }
            ']' => {
                self.state = State::Osc;
                None
            }
            'P' | 'X' | '^' | '_' => {
                self.state = State::Str;
                None
            }
            // A lone ST outside a string.
            '\\' => None,
            ESC => {
                self.state = State::Escape;
                None
            }
            _ => Some(AnsiSequence::Escape(ch)),
        }
    }

    fn process_csi(&mut self, ch: char) -> AnsiResult<Option<AnsiSequence>> {
        match ch {
            '\x40'..='\x7E' => {
                self.state = State::Ground;
                let body = std::mem::take(&mut self.buffer);
                Ok(Some(AnsiSequence::Csi(ControlSequence::parse(&body, ch))))
            }
            '\x20'..='\x3F' => {
                self.buffer.push(ch);
                Ok(None)
            }
            ESC => {
                // Interrupted by a new sequence.
                self.buffer.clear();
                self.state = State::Escape;
                Ok(None)
            }
            // CAN and SUB cancel the sequence.
            '\x18' | '\x1A' => {
                self.clear();
                Ok(None)
            }
            // Other C0 controls execute without ending the sequence.
            '\x00'..='\x1F' => Ok(Some(AnsiSequence::Control(ch))),
            _ => {
                self.clear();
                Err(AnsiError::MalformedSequence { found: ch })
            }
        }
    }

    fn process_string(&mut self, ch: char, osc: bool) -> Option<AnsiSequence> {
        match ch {
            BEL if osc => {
                self.state = State::Ground;
                Some(AnsiSequence::Osc(std::mem::take(&mut self.buffer)))
            }
            ESC => {
                self.state = State::StrEscape { osc };
                None
            }
            _ => {
                self.buffer.push(ch);
                None
            }
        }
    }

    fn process_string_escape(&mut self, ch: char, osc: bool) -> Option<AnsiSequence> {
        if ch == '\\' {
            self.state = State::Ground;
            let body = std::mem::take(&mut self.buffer);
            return Some(if osc { AnsiSequence::Osc(body) } else { AnsiSequence::Str });
        }
        self.state = if osc { State::Osc } else { State::Str };
        self.buffer.push(ESC);
        self.process_string(ch, osc)
    }
}

fn is_control(ch: char) -> bool {
    matches!(ch, '\x00'..='\x1F' | '\x7F' | '\u{80}'..='\u{9F}')
}
