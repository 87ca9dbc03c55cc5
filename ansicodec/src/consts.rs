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

/// Escape, introduces every sequence.
pub const ESC: char = '\x1B';

/// Bell. Also terminates an OSC string.
pub const BEL: char = '\x07';

/// Maximum length of an ANSI escape sequence in characters.
///
/// Standard sequences are well under 20 characters. Anything longer is
/// treated as garbage and abandoned so a stray ESC cannot swallow the rest
/// of the stream.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Maximum number of parameters kept from one CSI sequence. Extra
/// parameters are dropped.
pub const MAX_PARAMETER_COUNT: usize = 32;

/// Foreground colour index after a reset (white).
pub const DEFAULT_FOREGROUND: u8 = 7;

/// Background colour index after a reset (black).
pub const DEFAULT_BACKGROUND: u8 = 0;
