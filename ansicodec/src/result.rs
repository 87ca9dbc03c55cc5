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

//! Error types for the ansicodec crate.

/// Result type alias for operations that may fail with an [`AnsiError`].
pub type AnsiResult<T> = Result<T, AnsiError>;

/// Errors raised while parsing ANSI input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnsiError {
    /// ANSI sequence exceeds maximum allowed length.
    ///
    /// The parser has already reset itself to plain text.
    #[error("Sequence too long: {length} characters (maximum allowed: {max})")]
    SequenceTooLong {
        /// The length reached when the sequence was abandoned
        length: usize,
        /// The maximum allowed length
        max: usize,
    },

    /// A CSI sequence was interrupted by a character that cannot appear in it.
    #[error("Malformed control sequence: unexpected {found:?}")]
    MalformedSequence {
        /// The offending character
        found: char,
    },
}
