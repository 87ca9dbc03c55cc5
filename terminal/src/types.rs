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

use mudlink_ansicodec::StyleState;

/// Text printed in one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// The text, without line breaks.
    pub text: String,
    /// Style in effect when the text arrived.
    pub style: StyleState,
}

impl StyledRun {
    /// Pair text with a style snapshot.
    pub fn new(text: impl Into<String>, style: StyleState) -> Self {
        StyledRun {
            text: text.into(),
            style,
        }
    }
}

/// Instructions for an append-only display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Append text to the current line.
    Run(StyledRun),
    /// End the current line.
    LineBreak,
    /// Drop everything shown so far.
    Clear,
    /// Drop the unfinished current line, or the last finished line when
    /// nothing has been written since the last break.
    EraseLine,
    /// Drop this many of the oldest finished lines.
    Evict(usize),
    /// Ring the bell.
    Bell,
}
