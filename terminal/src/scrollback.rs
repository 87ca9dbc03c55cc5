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

//! Bounded history of rendered lines

use crate::{StyledRun, TerminalError, TerminalResult};
use std::collections::VecDeque;

/// Retention policy for finished lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollbackConfig {
    /// Height of the visible area in lines.
    pub viewport_rows: usize,
    /// How many viewports of history to keep.
    pub screens: usize,
    /// Never keep fewer than this many lines.
    pub min_lines: usize,
}

impl Default for ScrollbackConfig {
    fn default() -> Self {
        ScrollbackConfig {
            viewport_rows: 24,
            screens: 40,
            min_lines: 500,
        }
    }
}

impl ScrollbackConfig {
    /// Reject policies that could not keep one screen.
    pub fn validate(&self) -> TerminalResult<()> {
        if self.viewport_rows == 0 {
            return Err(TerminalError::InvalidScrollback(
                "viewport_rows must be at least 1",
            ));
        }
        if self.screens == 0 {
            return Err(TerminalError::InvalidScrollback("screens must be at least 1"));
        }
        Ok(())
    }

    /// Number of finished lines kept after eviction.
    pub fn retained_lines(&self) -> usize {
        self.viewport_rows
            .saturating_mul(self.screens)
            .max(self.min_lines)
    }
}

/// Finished lines plus the line still being written.
#[derive(Clone, Debug)]
pub struct Scrollback {
    config: ScrollbackConfig,
    lines: VecDeque<Vec<StyledRun>>,
    pending: Vec<StyledRun>,
}

impl Scrollback {
    /// Empty history with the given policy.
    pub fn new(config: ScrollbackConfig) -> TerminalResult<Self> {
        config.validate()?;
        Ok(Scrollback {
            config,
            lines: VecDeque::new(),
            pending: Vec::new(),
        })
    }

    /// Current policy.
    pub fn config(&self) -> &ScrollbackConfig {
        &self.config
    }

    /// Append a run to the unfinished line, merging with the previous run
    /// when the style matches.
    pub fn push_run(&mut self, run: StyledRun) {
        match self.pending.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => self.pending.push(run),
        }
    }

    /// Finish the current line. Returns how many old lines were evicted.
    pub fn break_line(&mut self) -> usize {
        self.lines.push_back(std::mem::take(&mut self.pending));
        self.enforce()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
    }

    /// Drop the unfinished line, or the last finished line if nothing is
    /// pending. Returns whether anything was removed.
    pub fn erase_line(&mut self) -> bool {
        if self.pending.is_empty() {
            self.lines.pop_back().is_some()
        } else {
            self.pending.clear();
            true
        }
    }

    /// Change the viewport height and apply the policy again.
    pub fn set_viewport_rows(&mut self, rows: usize) -> usize {
        self.config.viewport_rows = rows.max(1);
        self.enforce()
    }

    /// Finished lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &[StyledRun]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Number of finished lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.pending.is_empty()
    }

    /// Runs of the unfinished line.
    pub fn pending(&self) -> &[StyledRun] {
        &self.pending
    }

    /// Finished lines as plain text.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|run| run.text.as_str()).collect())
            .collect()
    }

    fn enforce(&mut self) -> usize {
        let keep = self.config.retained_lines();
        if self.lines.len() <= keep {
            return 0;
        }
        let evicted = self.lines.len() - keep;
        self.lines.drain(..evicted);
        tracing::trace!(evicted, kept = keep, "Scrollback trimmed");
        evicted
    }
}
